use crate::{ConfigErrorResult, ensure_range};

use std::time::Duration;

use serde::Deserialize;

pub const MIN_STARTUP_GRACE_MS: u64 = 0;
pub const MAX_STARTUP_GRACE_MS: u64 = 60_000;
pub const DEFAULT_STARTUP_GRACE_MS: u64 = 3000;

pub const MIN_SHUTDOWN_TIMEOUT_SECS: u64 = 1;
pub const MAX_SHUTDOWN_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_SHUTDOWN_TIMEOUT_SECS: u64 = 5;

/// Child process lifecycle
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SupervisorConfig {
    /// Wait after spawn before the readiness probe
    pub startup_grace_ms: u64,
    /// SIGTERM to SIGKILL escalation window
    pub shutdown_timeout_secs: u64,
    /// Default working directory for launch commands
    pub working_dir: Option<String>,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            startup_grace_ms: DEFAULT_STARTUP_GRACE_MS,
            shutdown_timeout_secs: DEFAULT_SHUTDOWN_TIMEOUT_SECS,
            working_dir: None,
        }
    }
}

impl SupervisorConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        ensure_range(
            "supervisor.startup_grace_ms",
            self.startup_grace_ms,
            MIN_STARTUP_GRACE_MS,
            MAX_STARTUP_GRACE_MS,
        )?;
        ensure_range(
            "supervisor.shutdown_timeout_secs",
            self.shutdown_timeout_secs,
            MIN_SHUTDOWN_TIMEOUT_SECS,
            MAX_SHUTDOWN_TIMEOUT_SECS,
        )
    }

    pub fn startup_grace(&self) -> Duration {
        Duration::from_millis(self.startup_grace_ms)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}
