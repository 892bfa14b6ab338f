use metrics::{counter, histogram};

/// Counters for proxied traffic
#[derive(Clone)]
pub struct RouterMetrics {
    prefix: &'static str,
}

impl RouterMetrics {
    pub fn new() -> Self {
        Self { prefix: "mn_router" }
    }

    pub fn forwarded(&self, service: &str, status: u16) {
        counter!(format!("{}.requests.forwarded", self.prefix)).increment(1);
        counter!(format!("{}.requests.{}", self.prefix, service)).increment(1);
        if status >= 500 {
            counter!(format!("{}.responses.5xx", self.prefix)).increment(1);
        }
    }

    pub fn rejected(&self, reason: &str) {
        counter!(format!("{}.requests.rejected.{}", self.prefix, reason)).increment(1);
    }

    pub fn upstream_failure(&self, service: &str) {
        counter!(format!("{}.upstream.failures", self.prefix)).increment(1);
        counter!(format!("{}.upstream.failures.{}", self.prefix, service)).increment(1);
    }

    pub fn latency(&self, duration: std::time::Duration) {
        histogram!(format!("{}.requests.latency_ms", self.prefix))
            .record(duration.as_millis() as f64);
    }
}

impl Default for RouterMetrics {
    fn default() -> Self {
        Self::new()
    }
}
