//! Dispatcher configuration, layered from defaults, an optional config file,
//! and environment variables (`NAVDISPATCH_*`) the way the teacher layers
//! `AppConfig` from `.env` plus process environment.

use std::time::Duration;

use serde::Deserialize;

use crate::error::SharedError;

/// Tunables for the worker loop and its callback delivery.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// How often the worker wakes on its own even without a notification,
    /// to recover from a missed signal (spec §4.5 step 1's condvar wait is
    /// unbounded; this is the ambient, operationally-necessary fallback).
    pub recovery_poll_interval_secs: u64,
    /// Timeout applied to a request when the caller doesn't specify one.
    pub default_timeout_secs: u64,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            recovery_poll_interval_secs: 30,
            default_timeout_secs: 20,
        }
    }
}

impl DispatcherConfig {
    /// Loads layered config: built-in defaults, then `dispatcher.toml` if
    /// present in the working directory, then `NAVDISPATCH_*` environment
    /// variables (e.g. `NAVDISPATCH_DEFAULT_TIMEOUT_SECS=30`).
    pub fn load() -> Result<Self, SharedError> {
        let defaults = Self::default();
        let built = config::Config::builder()
            .set_default(
                "recovery_poll_interval_secs",
                defaults.recovery_poll_interval_secs,
            )?
            .set_default("default_timeout_secs", defaults.default_timeout_secs)?
            .add_source(config::File::with_name("dispatcher").required(false))
            .add_source(config::Environment::with_prefix("NAVDISPATCH"))
            .build()?;

        Ok(built.try_deserialize()?)
    }

    pub fn recovery_poll_interval(&self) -> Duration {
        Duration::from_secs(self.recovery_poll_interval_secs)
    }

    pub fn default_timeout(&self) -> Duration {
        Duration::from_secs(self.default_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let cfg = DispatcherConfig::default();
        assert_eq!(cfg.recovery_poll_interval_secs, 30);
        assert_eq!(cfg.default_timeout_secs, 20);
    }
}
