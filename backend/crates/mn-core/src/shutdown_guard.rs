use tokio::sync::watch;

/// Per-task view of the stop flag
pub struct ShutdownGuard {
    stopping: watch::Receiver<bool>,
}

impl ShutdownGuard {
    pub(crate) fn new(stopping: watch::Receiver<bool>) -> Self {
        Self { stopping }
    }

    /// Resolves once shutdown is requested, immediately if it already was
    pub async fn wait(&mut self) {
        // Err only when the coordinator is gone, which also means stop
        let _ = self.stopping.wait_for(|stopping| *stopping).await;
    }

    pub fn is_triggered(&self) -> bool {
        *self.stopping.borrow()
    }
}
