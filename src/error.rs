use crate::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EncoderError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to write output file {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl EncoderError {
    /// Wrap an IO failure on the destination file with its path
    pub fn output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EncoderError::Output {
            path: path.into(),
            source,
        }
    }

    /// Short label used when logging the error
    pub fn kind(&self) -> &'static str {
        match self {
            EncoderError::Config(_) => "configuration",
            EncoderError::Output { .. } => "output",
            EncoderError::InvalidData(_) => "invalid data",
        }
    }
}
