use crate::{CreatedUser, ProxyRequest, ProxyResponse, RouterMetrics};

use std::time::{Duration, Instant};

use bytes::Bytes;
use log::{debug, warn};
use mn_core::{ControlError, Result, ServiceRegistry};
use reqwest::header::CONTENT_TYPE;
use serde_json::{Value, json};

/// Field added to the load-balanced endpoint's response body
pub const INSTANCE_FIELD: &str = "load_balanced_instance";

const USER_SERVICE: &str = "user";

/// Gatekeeper and forwarder for domain traffic.
///
/// Every request passes the registry gate first (stopped, then unhealthy).
/// A transport failure marks the target unhealthy and is never retried.
#[derive(Clone)]
pub struct RequestRouter {
    registry: ServiceRegistry,
    client: reqwest::Client,
    metrics: RouterMetrics,
}

impl RequestRouter {
    pub fn new(registry: ServiceRegistry, timeout: Duration) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            registry,
            client,
            metrics: RouterMetrics::new(),
        })
    }

    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    pub async fn forward(&self, request: ProxyRequest) -> Result<ProxyResponse> {
        let admission = match self.registry.admit(&request.service).await {
            Ok(admission) => admission,
            Err(e) => {
                self.metrics.rejected(e.error_code());
                return Err(e);
            }
        };

        let url = format!("{}{}", admission.base_url, request.path_and_query);
        debug!(
            "Forwarding {} {} (instance {:?})",
            request.method, url, admission.instance
        );

        let mut builder = self.client.request(request.method.clone(), &url);
        if let Some(content_type) = &request.content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        if !request.body.is_empty() {
            builder = builder.body(request.body.clone());
        }

        let started = Instant::now();
        let result = match builder.send().await {
            Ok(response) => {
                let status = response.status().as_u16();
                let content_type = response
                    .headers()
                    .get(CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .map(String::from);
                response.bytes().await.map(|body| (status, content_type, body))
            }
            Err(e) => Err(e),
        };

        let (status, content_type, body) = match result {
            Ok(parts) => parts,
            Err(e) => {
                warn!("{} unreachable, marking unhealthy: {e}", request.service);
                self.registry.set_healthy(&request.service, false).await?;
                self.metrics.upstream_failure(&request.service);
                return Err(ControlError::upstream(&request.service, e.to_string()));
            }
        };
        self.metrics.latency(started.elapsed());

        self.registry.record_request().await;
        self.metrics.forwarded(&request.service, status);

        let body = match admission.instance {
            Some(instance) if request.attach_instance && (200..300).contains(&status) => {
                attach_instance(body, instance)
            }
            _ => body,
        };

        Ok(ProxyResponse {
            status,
            content_type,
            body,
            instance: admission.instance,
        })
    }

    /// Create a user through the gate on behalf of an operator command.
    /// A non-2xx reply is `Rejected` and leaves health untouched.
    pub async fn create_user(&self, name: &str, email: &str) -> Result<CreatedUser> {
        let body = json!({ "name": name, "email": email });
        let request = ProxyRequest::new(USER_SERVICE, reqwest::Method::POST, "/users/")
            .with_body(
                Bytes::from(body.to_string()),
                Some("application/json".to_string()),
            );

        let response = self.forward(request).await?;
        let rejected = |response: &ProxyResponse| {
            ControlError::rejected(
                USER_SERVICE,
                response.status,
                String::from_utf8_lossy(&response.body),
            )
        };

        if !response.is_success() {
            return Err(rejected(&response));
        }

        serde_json::from_slice::<CreatedUser>(&response.body).map_err(|_| rejected(&response))
    }
}

/// Insert the instance id into a JSON object body; anything else passes through.
fn attach_instance(body: Bytes, instance: usize) -> Bytes {
    match serde_json::from_slice::<Value>(&body) {
        Ok(Value::Object(mut map)) => {
            map.insert(INSTANCE_FIELD.to_string(), Value::from(instance));
            match serde_json::to_vec(&Value::Object(map)) {
                Ok(bytes) => Bytes::from(bytes),
                Err(_) => body,
            }
        }
        _ => body,
    }
}
