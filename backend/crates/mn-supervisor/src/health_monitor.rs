use crate::HealthProbe;

use std::time::Duration;

use log::{info, warn};
use mn_core::{ServiceRegistry, ServiceStatus, ShutdownGuard};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Background readiness loop.
///
/// Services that were never started (stopped, no process) are skipped.
/// Running services take `healthy` from the probe and are auto-stopped when it
/// fails. An auto-stopped service stays stopped unless `recover_auto_stopped`
/// is set, in which case a passing probe promotes it back to running.
pub struct HealthMonitor {
    registry: ServiceRegistry,
    probe: HealthProbe,
    interval: Duration,
    recover_auto_stopped: bool,
}

impl HealthMonitor {
    pub fn new(
        registry: ServiceRegistry,
        probe: HealthProbe,
        interval: Duration,
        recover_auto_stopped: bool,
    ) -> Self {
        Self {
            registry,
            probe,
            interval,
            recover_auto_stopped,
        }
    }

    /// One pass over every service. Returns how many were probed.
    pub async fn check_all(&self) -> usize {
        let mut probed = 0;

        for name in self.registry.names().await {
            let Some(descriptor) = self.registry.get(&name).await else {
                continue;
            };
            if descriptor.status == ServiceStatus::Stopped && !descriptor.has_process() {
                continue;
            }
            // Owned by an in-flight start/stop
            if descriptor.status.is_transitional() {
                continue;
            }

            let healthy = self.probe.probe(&descriptor.base_url()).await;
            probed += 1;

            let recover = self.recover_auto_stopped;
            let result = self
                .registry
                .update(&name, |d| match d.status {
                    ServiceStatus::Running => {
                        d.healthy = healthy;
                        if !healthy {
                            d.status = ServiceStatus::Stopped;
                            return Some("auto-stopped");
                        }
                        None
                    }
                    ServiceStatus::Stopped if recover && healthy && d.has_process() => {
                        d.healthy = true;
                        d.status = ServiceStatus::Running;
                        Some("recovered")
                    }
                    _ => None,
                })
                .await;

            match result {
                Ok(Some(change)) => warn!("Health monitor: {name} {change}"),
                Ok(None) => {}
                Err(e) => warn!("Health monitor: {e}"),
            }
        }

        self.log_cycle_summary().await;
        probed
    }

    async fn log_cycle_summary(&self) {
        let snapshot = self.registry.snapshot().await;
        let summary = snapshot
            .services
            .iter()
            .map(|(name, s)| {
                let health = if s.healthy { "healthy" } else { "unhealthy" };
                format!("{name}={}/{health}", s.status)
            })
            .collect::<Vec<_>>()
            .join(" ");
        info!("Health cycle: {summary}");
    }

    /// Loop until shutdown
    pub async fn run(self, mut shutdown: ShutdownGuard) {
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        info!("Health monitor started (every {:?})", self.interval);

        loop {
            tokio::select! {
                _ = shutdown.wait() => {
                    info!("Health monitor stopping");
                    break;
                }
                _ = ticker.tick() => {
                    self.check_all().await;
                }
            }
        }
    }

    pub fn spawn(self, shutdown: ShutdownGuard) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }
}
