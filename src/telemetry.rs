//! Logging setup.
//!
//! The library only emits `tracing` events; installing a subscriber is the
//! embedding application's call. [`init_logging`] is the stock choice.

use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;
use crate::error::{ConfigError, FeedResult};

/// Environment variable that overrides [`LoggingConfig::level`].
pub const LOG_ENV: &str = "LIVEFEED_LOG";

/// Build the filter: `LIVEFEED_LOG` if set and valid, else `cfg.level`.
///
/// # Errors
/// `ConfigError::Invalid` if `cfg.level` is not a valid filter directive.
pub fn build_filter(cfg: &LoggingConfig) -> Result<EnvFilter, ConfigError> {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return Ok(filter);
    }
    EnvFilter::try_new(&cfg.level).map_err(|e| ConfigError::Invalid {
        field: "logging.level".to_string(),
        reason: e.to_string(),
    })
}

/// Install a global fmt subscriber.
///
/// Returns `Ok(false)` if a global subscriber was already installed.
///
/// # Errors
/// See [`build_filter`].
pub fn init_logging(cfg: &LoggingConfig) -> FeedResult<bool> {
    let filter = build_filter(cfg)?;
    let installed = if cfg.json {
        tracing_subscriber::fmt()
            .json()
            .with_target(true)
            .with_env_filter(filter)
            .try_init()
            .is_ok()
    } else {
        tracing_subscriber::fmt()
            .with_target(true)
            .with_env_filter(filter)
            .try_init()
            .is_ok()
    };
    if installed {
        tracing::info!(json = cfg.json, "logging initialized");
    }
    Ok(installed)
}
