//! Logging subscriber initialisation.

use std::io;

use thiserror::Error;
use tracing_subscriber::{
    EnvFilter, Registry,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::{LogFormat, LoggingConfig};

/// Errors raised while initialising logging.
#[derive(Debug, Error)]
pub enum LoggingError {
    /// Failed to initialise tracing subscriber.
    #[error("failed to initialise tracing subscriber: {0}")]
    TracingSubscriber(#[from] tracing_subscriber::util::TryInitError),
}

/// Install the global subscriber. Logs go to stderr so stdout stays readable.
///
/// `RUST_LOG` directives take precedence over the configured level.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    match config.log_format {
        LogFormat::Compact => init_with_layer(
            config,
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(true)
                .with_writer(io::stderr),
        ),
        LogFormat::Json => init_with_layer(
            config,
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_target(true)
                .with_writer(io::stderr),
        ),
    }
}

fn build_env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
}

fn init_with_layer<L>(config: &LoggingConfig, fmt_layer: L) -> Result<(), LoggingError>
where
    L: Layer<Registry> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(build_env_filter(config))
        .try_init()?;

    Ok(())
}
