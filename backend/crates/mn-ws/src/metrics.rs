use metrics::{counter, gauge, histogram};

/// Metrics collector for ChatOps sessions
#[derive(Clone)]
pub struct Metrics {
    prefix: &'static str,
}

impl Metrics {
    /// Create a collector under the `mn_ws` prefix
    pub fn new() -> Self {
        Self { prefix: "mn_ws" }
    }

    /// Record a new ChatOps session
    pub fn connection_established(&self) {
        counter!(format!("{}.connections.established", self.prefix)).increment(1);
        gauge!(format!("{}.connections.active", self.prefix)).increment(1.0);
    }

    /// Record a session ending, tagged `normal` or `error`
    pub fn connection_closed(&self, reason: &str) {
        counter!(format!("{}.connections.closed", self.prefix)).increment(1);
        counter!(format!("{}.connections.closed.{}", self.prefix, reason)).increment(1);
        gauge!(format!("{}.connections.active", self.prefix)).decrement(1.0);
    }

    /// Upgrade refused before a session existed
    pub fn connection_rejected(&self, reason: &str) {
        counter!(format!("{}.connections.rejected.{}", self.prefix, reason)).increment(1);
    }

    /// Record one executed command and whether it succeeded
    pub fn command_processed(&self, command: &str, succeeded: bool) {
        let outcome = if succeeded { "ok" } else { "error" };
        counter!(format!("{}.commands.total", self.prefix)).increment(1);
        counter!(format!("{}.commands.{}.{}", self.prefix, command, outcome)).increment(1);
    }

    /// Record a broadcast and how many sessions it reached
    pub fn broadcast_published(&self, kind: &str, recipients: usize) {
        counter!(format!("{}.broadcast.{}", self.prefix, kind)).increment(1);
        gauge!(format!("{}.broadcast.recipients", self.prefix)).set(recipients as f64);
    }

    /// Record a session-level error
    pub fn error_occurred(&self, error_type: &str) {
        counter!(format!("{}.errors.total", self.prefix)).increment(1);
        counter!(format!("{}.errors.{}", self.prefix, error_type)).increment(1);
    }

    /// Record command latency, grace windows and downstream calls included
    pub fn command_latency(&self, duration: std::time::Duration) {
        histogram!(format!("{}.commands.latency_ms", self.prefix))
            .record(duration.as_millis() as f64);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
