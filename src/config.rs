//! Environment configuration
//!
//! Handles reading tunables from the process environment.

use std::time::Duration;
use thiserror::Error;

/// Environment variable overriding the visual progress cycle, in milliseconds.
pub const PROGRESS_CYCLE_ENV: &str = "SECONDLOCK_PROGRESS_CYCLE_MS";

/// Default visual progress cycle.
pub const DEFAULT_PROGRESS_CYCLE: Duration = Duration::from_secs(30);

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{name} is not a valid number of milliseconds: {value:?}")]
    InvalidNumber { name: &'static str, value: String },
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

/// Returns the visual progress cycle.
///
/// Priority:
/// 1. Environment variable `SECONDLOCK_PROGRESS_CYCLE_MS`
/// 2. Default of 30 seconds
///
/// # Errors
///
/// Returns error if the variable is set but is not a positive integer.
pub fn progress_cycle() -> Result<Duration, ConfigError> {
    let Ok(raw) = std::env::var(PROGRESS_CYCLE_ENV) else {
        return Ok(DEFAULT_PROGRESS_CYCLE);
    };

    let millis: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
        name: PROGRESS_CYCLE_ENV,
        value: raw.clone(),
    })?;

    if millis == 0 {
        return Err(ConfigError::Zero(PROGRESS_CYCLE_ENV));
    }

    Ok(Duration::from_millis(millis))
}

/// Like [`progress_cycle`], falling back to the default on a bad value.
pub fn progress_cycle_or_default() -> Duration {
    progress_cycle().unwrap_or_else(|e| {
        #[cfg(feature = "tracing")]
        tracing::warn!("Ignoring progress cycle override: {}", e);
        #[cfg(not(feature = "tracing"))]
        let _ = e;
        DEFAULT_PROGRESS_CYCLE
    })
}
