//! Tracing subscriber setup
//!
//! Logs go to standard error so that standard output carries only results.
//! `RUST_LOG` takes precedence over the configured level.

use crate::config::{LogFormat, LoggingConfig};
use modeinfer_core::{InferError, InferResult};
use tracing_subscriber::EnvFilter;

/// Build the filter for `level`, unless `RUST_LOG` is set
pub fn env_filter(level: &str) -> InferResult<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level)
        .map_err(|err| InferError::configuration(Some("logging.level"), err.to_string()))
}

pub fn init_tracing(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = env_filter(&config.level)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    let result = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };
    result.map_err(|err| anyhow::anyhow!("failed to initialise tracing: {err}"))
}
