use crate::{ConfigError, ConfigErrorResult, ensure_range};

use std::time::Duration;

use serde::Deserialize;

pub const MIN_INTERVAL_SECS: u64 = 1;
pub const MAX_INTERVAL_SECS: u64 = 3600;
pub const DEFAULT_INTERVAL_SECS: u64 = 10;

pub const MIN_PROBE_TIMEOUT_SECS: u64 = 1;
pub const MAX_PROBE_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 2;

/// Background readiness polling
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    pub interval_secs: u64,
    pub probe_timeout_secs: u64,
    /// Re-probe services the monitor auto-stopped and promote them on recovery
    pub recover_auto_stopped: bool,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            interval_secs: DEFAULT_INTERVAL_SECS,
            probe_timeout_secs: DEFAULT_PROBE_TIMEOUT_SECS,
            recover_auto_stopped: false,
        }
    }
}

impl HealthConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        ensure_range(
            "health.interval_secs",
            self.interval_secs,
            MIN_INTERVAL_SECS,
            MAX_INTERVAL_SECS,
        )?;
        ensure_range(
            "health.probe_timeout_secs",
            self.probe_timeout_secs,
            MIN_PROBE_TIMEOUT_SECS,
            MAX_PROBE_TIMEOUT_SECS,
        )?;

        if self.probe_timeout_secs >= self.interval_secs {
            return Err(ConfigError::config(format!(
                "health.probe_timeout_secs ({}) must be less than interval_secs ({})",
                self.probe_timeout_secs, self.interval_secs
            )));
        }

        Ok(())
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}
