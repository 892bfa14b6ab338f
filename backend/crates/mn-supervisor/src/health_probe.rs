use std::time::Duration;

use log::debug;

/// Readiness check against a collaborator's `GET /health`
#[derive(Clone)]
pub struct HealthProbe {
    client: reqwest::Client,
}

impl HealthProbe {
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(1)
            .build()?;

        Ok(Self { client })
    }

    /// True iff the endpoint answered 2xx within the timeout
    pub async fn probe(&self, base_url: &str) -> bool {
        let url = format!("{base_url}/health");

        match self.client.get(&url).send().await {
            Ok(resp) if resp.status().is_success() => true,
            Ok(resp) => {
                debug!("Probe {url} returned HTTP {}", resp.status());
                false
            }
            Err(e) => {
                debug!("Probe {url} failed: {e}");
                false
            }
        }
    }
}
