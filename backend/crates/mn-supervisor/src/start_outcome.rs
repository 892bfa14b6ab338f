/// Result of a successful spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    /// The readiness probe after the grace window passed
    Healthy,
    /// Process is running but the probe did not confirm readiness
    Unconfirmed,
}

impl StartOutcome {
    pub fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }
}
