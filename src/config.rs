//! Configuration

use std::{path::PathBuf, time::Duration};

use clap::{Args, Parser};

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Walk-out store simulator configuration
#[derive(Debug, Parser)]
#[command(name = "walkout", about = "Walk-out self-checkout simulator", long_about = None)]
pub struct Config {
    /// Catalog fixture file (YAML); the bundled grocery catalog when omitted
    #[arg(short, long, env = "WALKOUT_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Delay before each assistant reply, in milliseconds
    #[arg(long, env = "WALKOUT_ASSISTANT_DELAY_MS", default_value_t = 1500)]
    pub assistant_delay_ms: u64,

    /// Logging settings
    #[command(flatten)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        Self::try_parse()
    }

    /// Delay before each assistant reply.
    pub fn assistant_delay(&self) -> Duration {
        Duration::from_millis(self.assistant_delay_ms)
    }
}
