use crate::ShutdownGuard;

use tokio::sync::watch;

/// One-way stop flag shared by the health loop, ChatOps sessions and the
/// HTTP server. Guards created after the flag is raised observe it at once.
#[derive(Clone, Debug)]
pub struct ShutdownCoordinator {
    stopping: watch::Sender<bool>,
}

impl ShutdownCoordinator {
    pub fn new() -> Self {
        let (stopping, _) = watch::channel(false);
        Self { stopping }
    }

    /// Raise the flag. Idempotent.
    pub fn shutdown(&self) {
        if !self.stopping.send_replace(true) {
            log::info!("Shutdown requested, notifying control plane tasks");
        }
    }

    pub fn is_shutting_down(&self) -> bool {
        *self.stopping.borrow()
    }

    pub fn subscribe_guard(&self) -> ShutdownGuard {
        ShutdownGuard::new(self.stopping.subscribe())
    }
}

impl Default for ShutdownCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
