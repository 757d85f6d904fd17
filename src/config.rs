use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_OUTPUT_PATH: &str = "output.c";
pub const DEFAULT_LOG_LEVEL: &str = "warn";

const VALID_LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    pub output: Option<OutputConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: Some(PathBuf::from(DEFAULT_OUTPUT_PATH)),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Some(DEFAULT_LOG_LEVEL.to_string()),
        }
    }
}

impl Config {
    /// Load configuration from an optional TOML file, falling back to defaults
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match config_path {
            Some(path) => {
                tracing::debug!("Loading config from: {}", path.display());
                let content = std::fs::read_to_string(path)?;
                Self::from_toml(&content)?
            }
            None => {
                tracing::debug!("No config file given, using defaults");
                Self::from_defaults()
            }
        };

        Ok(config)
    }

    /// Parse a TOML document, apply defaults and validate
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let mut config = toml::from_str::<Config>(content)?;
        config.apply_defaults();
        config.validate()?;
        Ok(config)
    }

    pub fn from_defaults() -> Self {
        let mut config = Config::default();
        config.apply_defaults();
        config
    }

    fn apply_defaults(&mut self) {
        let output = self.output.get_or_insert_with(OutputConfig::default);
        if output.path.is_none() {
            output.path = OutputConfig::default().path;
        }

        let logging = self.logging.get_or_insert_with(LoggingConfig::default);
        if logging.level.is_none() {
            logging.level = LoggingConfig::default().level;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(ref output) = self.output {
            if let Some(ref path) = output.path {
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidValue(
                        "output.path must not be empty".to_string(),
                    ));
                }
            }
        }

        if let Some(ref logging) = self.logging {
            if let Some(ref level) = logging.level {
                if !VALID_LOG_LEVELS.contains(&level.to_lowercase().as_str()) {
                    return Err(ConfigError::InvalidValue(format!(
                        "logging.level must be one of {}, got {level}",
                        VALID_LOG_LEVELS.join(", ")
                    )));
                }
            }
        }

        Ok(())
    }

    /// Destination file used when `--output` is not given
    pub fn output_path(&self) -> &Path {
        self.output
            .as_ref()
            .and_then(|output| output.path.as_deref())
            .unwrap_or_else(|| Path::new(DEFAULT_OUTPUT_PATH))
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|logging| logging.level.as_deref())
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }
}
