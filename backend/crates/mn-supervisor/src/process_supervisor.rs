use crate::{HealthProbe, StartOutcome};

use std::collections::HashMap;
use std::process::Stdio;
use std::time::Duration;

use log::{error, info, warn};
use mn_core::{ControlError, ProcessHandle, Result, ServiceRegistry, ServiceStatus};
use tokio::process::{Child, Command};
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy)]
pub struct SupervisorSettings {
    /// Wait between spawn and the readiness probe
    pub startup_grace: Duration,
    /// Graceful termination window before SIGKILL
    pub shutdown_timeout: Duration,
}

/// Starts and stops service processes. Owns every `Child`; the registry only
/// ever sees a [`ProcessHandle`].
pub struct ProcessSupervisor {
    registry: ServiceRegistry,
    probe: HealthProbe,
    settings: SupervisorSettings,
    children: Mutex<HashMap<String, Child>>,
    /// First termination step; swapped in unit tests to force a failure
    pub(crate) graceful_exit: fn(&str, &mut Child) -> Result<()>,
}

impl ProcessSupervisor {
    pub fn new(
        registry: ServiceRegistry,
        probe: HealthProbe,
        settings: SupervisorSettings,
    ) -> Self {
        Self {
            registry,
            probe,
            settings,
            children: Mutex::new(HashMap::new()),
            graceful_exit: request_graceful_exit,
        }
    }

    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    pub async fn start(&self, name: &str) -> Result<StartOutcome> {
        let descriptor = self
            .registry
            .update(name, |d| {
                // A stop still escalating owns the old child until it finishes
                if d.status != ServiceStatus::Stopped {
                    return Err(ControlError::already_running(&d.name));
                }
                d.status = ServiceStatus::Starting;
                Ok(d.clone())
            })
            .await??;

        info!("Starting {} with `{}`", name, descriptor.launch);

        let mut command = Command::new(&descriptor.launch.program);
        command
            .args(&descriptor.launch.args)
            .env("PORT", descriptor.port.to_string())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);
        if let Some(dir) = &descriptor.launch.working_dir {
            command.current_dir(dir);
        }

        let child = match command.spawn() {
            Ok(child) => child,
            Err(e) => {
                error!("Failed to spawn {name}: {e}");
                self.registry
                    .update(name, |d| {
                        d.status = ServiceStatus::Stopped;
                        d.process = None;
                    })
                    .await?;
                return Err(ControlError::spawn(name, e));
            }
        };

        let handle = ProcessHandle::new(child.id().unwrap_or_default());
        if let Some(mut stale) = self.children.lock().await.insert(name.to_string(), child) {
            // Left behind by an auto-stop; nothing routes to it any more
            warn!("Killing stale {name} process replaced by {handle}");
            match stale.start_kill() {
                Ok(()) => {
                    tokio::spawn(async move {
                        if let Err(e) = stale.wait().await {
                            warn!("Failed to reap stale process: {e}");
                        }
                    });
                }
                Err(e) => error!("Failed to kill stale {name} process: {e}"),
            }
        }

        self.registry
            .update(name, |d| {
                d.process = Some(handle);
                d.status = ServiceStatus::Running;
            })
            .await?;
        info!(
            "Spawned {name} ({handle}), waiting {:?} for readiness",
            self.settings.startup_grace
        );

        tokio::time::sleep(self.settings.startup_grace).await;

        let healthy = self.probe.probe(&descriptor.base_url()).await;
        // The monitor may have auto-stopped the child before it bound its port.
        // While our handle is current this call still owns the lifecycle.
        let owned = self
            .registry
            .update(name, |d| {
                let owned = d.process == Some(handle)
                    && matches!(d.status, ServiceStatus::Running | ServiceStatus::Stopped);
                if owned {
                    d.status = ServiceStatus::Running;
                    d.healthy = healthy;
                }
                owned
            })
            .await?;

        if !owned {
            warn!("{name} ({handle}) was stopped before its readiness probe completed");
            return Ok(StartOutcome::Unconfirmed);
        }

        if healthy {
            info!("{name} is running and healthy");
            Ok(StartOutcome::Healthy)
        } else {
            warn!("{name} is running but did not pass its readiness probe");
            Ok(StartOutcome::Unconfirmed)
        }
    }

    pub async fn stop(&self, name: &str) -> Result<()> {
        self.registry
            .update(name, |d| {
                if d.status != ServiceStatus::Running {
                    return Err(ControlError::not_running(&d.name));
                }
                d.status = ServiceStatus::Stopping;
                Ok(())
            })
            .await??;

        let child = self.children.lock().await.remove(name);
        if let Some(mut child) = child {
            if let Err(e) = self.terminate(name, &mut child).await {
                error!("Failed to stop {name}: {e}");
                self.children.lock().await.insert(name.to_string(), child);
                self.registry
                    .update(name, |d| d.status = ServiceStatus::Running)
                    .await?;
                return Err(e);
            }
        } else {
            warn!("{name} was running without a supervised process");
        }

        self.registry
            .update(name, |d| {
                if d.status == ServiceStatus::Stopping {
                    d.process = None;
                    d.status = ServiceStatus::Stopped;
                    d.healthy = false;
                }
            })
            .await?;
        info!("{name} stopped");

        Ok(())
    }

    /// Stop every child still held. Used on control plane exit.
    pub async fn shutdown_all(&self) {
        let names: Vec<String> = self.children.lock().await.keys().cloned().collect();

        for name in names {
            let status = self.registry.get(&name).await.map(|d| d.status);
            if status == Some(ServiceStatus::Running) {
                if let Err(e) = self.stop(&name).await {
                    error!("Shutdown: {e}");
                }
                continue;
            }

            // Auto-stopped by the health monitor but still alive
            let child = self.children.lock().await.remove(&name);
            if let Some(mut child) = child
                && let Err(e) = self.terminate(&name, &mut child).await
            {
                error!("Shutdown: {e}");
            }
        }
    }

    pub async fn supervised_count(&self) -> usize {
        self.children.lock().await.len()
    }

    /// SIGTERM, bounded wait, then SIGKILL
    async fn terminate(&self, name: &str, child: &mut Child) -> Result<()> {
        (self.graceful_exit)(name, child)?;

        match tokio::time::timeout(self.settings.shutdown_timeout, child.wait()).await {
            Ok(Ok(status)) => {
                info!("{name} exited with {status}");
                Ok(())
            }
            Ok(Err(e)) => Err(ControlError::terminate(name, e.to_string())),
            Err(_) => {
                warn!(
                    "{name} did not exit within {:?}, force killing",
                    self.settings.shutdown_timeout
                );
                child
                    .kill()
                    .await
                    .map_err(|e| ControlError::terminate(name, e.to_string()))
            }
        }
    }
}

#[cfg(unix)]
pub(crate) fn request_graceful_exit(name: &str, child: &mut Child) -> Result<()> {
    use nix::errno::Errno;
    use nix::sys::signal::{Signal, kill};
    use nix::unistd::Pid;

    // Already reaped
    let Some(pid) = child.id() else {
        return Ok(());
    };

    info!("Sending SIGTERM to {name} (pid {pid})");
    match kill(Pid::from_raw(pid as i32), Signal::SIGTERM) {
        Ok(()) | Err(Errno::ESRCH) => Ok(()),
        Err(e) => Err(ControlError::terminate(name, e.to_string())),
    }
}

#[cfg(not(unix))]
pub(crate) fn request_graceful_exit(name: &str, child: &mut Child) -> Result<()> {
    child
        .start_kill()
        .map_err(|e| ControlError::terminate(name, e.to_string()))
}
