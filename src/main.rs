use clap::Parser;
use std::path::PathBuf;
use tracing::{debug, error, info, Level};
use tracing_subscriber::{self, EnvFilter};

use strencode::config::Config;
use strencode::encoder::EncodedString;
use strencode::error::EncoderError;

#[derive(Parser)]
#[command(name = "strencode")]
#[command(about = "Encode a string to C array format")]
#[command(version)]
#[command(allow_negative_numbers = true)]
struct Cli {
    /// The input string to encode
    input_string: String,

    /// Output file name (defaults to output.c)
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Enable verbose logging (equivalent to --log-level debug)
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Output path from the CLI, falling back to the configured one
    fn output_path(&self, config: &Config) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| config.output_path().to_path_buf())
    }
}

/// Initialize logging on stderr so stdout only carries the confirmation
fn init_logging(config: &Config, cli: &Cli) -> Result<(), EncoderError> {
    let log_level = if cli.verbose {
        "debug"
    } else if let Some(ref level) = cli.log_level {
        level.as_str()
    } else {
        config.log_level()
    };

    let _level = match log_level.to_lowercase().as_str() {
        "error" => Level::ERROR,
        "warn" => Level::WARN,
        "info" => Level::INFO,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => {
            return Err(EncoderError::InvalidData(format!(
                "Invalid log level: {log_level}. Valid levels are: error, warn, info, debug, trace"
            )));
        }
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .map_err(|e| EncoderError::InvalidData(format!("Failed to create log filter: {e}")))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .init();

    debug!("Logging initialized with level: {}", log_level);
    Ok(())
}

fn report_error(error: &EncoderError) {
    match error {
        EncoderError::Config(_) => {
            error!("Configuration error: {}", error);
            error!("Please check your configuration file");
        }
        EncoderError::Output { .. } => {
            error!("{}", error);
        }
        _ => {
            error!("Application error ({}): {}", error.kind(), error);
            debug!("Error details: {:?}", error);
        }
    }
}

fn main() -> Result<(), EncoderError> {
    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing_subscriber::fmt().with_writer(std::io::stderr).init();
            let error = EncoderError::Config(e);
            report_error(&error);
            return Err(error);
        }
    };

    if let Err(e) = init_logging(&config, &cli) {
        eprintln!("Failed to initialize logging: {e}");
        return Err(e);
    }

    debug!("Configuration file path: {:?}", cli.config);

    let output = cli.output_path(&config);
    let encoded = EncodedString::new(cli.input_string.as_str());
    info!(
        "Encoded {} input characters into {}",
        encoded.original_len(),
        encoded.literal()
    );

    if let Err(e) = encoded.write_to(&output) {
        report_error(&e);
        return Err(e);
    }

    println!("Encoded string written to {}", output.display());
    Ok(())
}
