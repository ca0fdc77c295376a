//! Structured logging

use tracing_subscriber::EnvFilter;

use crate::{
    config::Config,
    error::{Error, Result},
};

/// Install the JSON tracing subscriber for a service
///
/// `RUST_LOG` takes precedence over `service.log_level` when set.
pub fn init_tracing(config: &Config) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.service.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_current_span(true)
        .try_init()
        .map_err(|e| Error::Tracing(e.to_string()))?;

    tracing::info!("Tracing initialized for service: {}", config.service.name);

    Ok(())
}
