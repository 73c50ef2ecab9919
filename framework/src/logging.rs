//! Tracing subscriber setup
//!
//! Every line emitted while serving a request carries the `request_id` of
//! the span opened by `RequestIdMiddleware`.

use crate::config::{LogConfig, LogFormat};
use crate::error::FrameworkError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber
///
/// `RUST_LOG` wins over `LOG_LEVEL` when both are set. Fails if a subscriber
/// is already installed.
pub fn init(config: &LogConfig) -> Result<(), FrameworkError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| FrameworkError::config(format!("invalid log level: {}", e)))?;

    let installed = match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_current_span(true).with_span_list(false))
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .try_init(),
    };

    installed.map_err(|e| FrameworkError::config(format!("logging already initialised: {}", e)))
}
