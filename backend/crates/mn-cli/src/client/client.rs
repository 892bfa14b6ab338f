use crate::{CliClientResult, ClientError};

use reqwest::{Client as ReqwestClient, Method, header::AUTHORIZATION};
use serde::Serialize;
use serde_json::{Value, json};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8000";

/// Self-declared role header read by the management endpoints
pub const ROLE_HEADER: &str = "user-role";

/// Requests `smoke` sends to the load-balanced product endpoint
const SMOKE_PRODUCT_REQUESTS: usize = 3;

/// HTTP client for the mn-server REST API
pub struct Client {
    pub base_url: String,
    pub role: Option<String>,
    pub token: Option<String>,
    client: ReqwestClient,
}

impl Client {
    /// Create a new client
    ///
    /// # Arguments
    /// * `base_url` - Server URL (e.g., "http://127.0.0.1:8000")
    /// * `role` - Optional role sent as the `user-role` header
    /// * `token` - Optional JWT sent as `Authorization: Bearer`
    pub fn new(base_url: &str, role: Option<&str>, token: Option<&str>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            role: role.map(String::from),
            token: token.map(String::from),
            client: ReqwestClient::new(),
        }
    }

    /// Build a request with the caller's identity headers
    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.request(method, &url);

        if let Some(ref role) = self.role {
            req = req.header(ROLE_HEADER, role);
        }
        if let Some(ref token) = self.token {
            req = req.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        req
    }

    /// Execute request and handle errors
    async fn execute(&self, req: reqwest::RequestBuilder) -> CliClientResult<Value> {
        let response = req.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            return serde_json::from_str(&text).map_err(ClientError::from_json);
        }

        let envelope = serde_json::from_str::<Value>(&text)
            .ok()
            .and_then(|body| body.get("error").cloned());
        match envelope {
            Some(error) => {
                let code = error
                    .get("code")
                    .and_then(|v| v.as_str())
                    .unwrap_or("UNKNOWN");
                let message = error
                    .get("message")
                    .and_then(|v| v.as_str())
                    .unwrap_or("Unknown error");
                Err(ClientError::api_error(code, message))
            }
            None => Err(ClientError::status(status.as_u16(), text)),
        }
    }

    // =========================================================================
    // Management
    // =========================================================================

    pub async fn status(&self) -> CliClientResult<Value> {
        let req = self.request(Method::GET, "/management/status");
        self.execute(req).await
    }

    pub async fn start_service(&self, name: &str) -> CliClientResult<Value> {
        let req = self.request(Method::POST, &format!("/management/start/{name}"));
        self.execute(req).await
    }

    pub async fn stop_service(&self, name: &str) -> CliClientResult<Value> {
        let req = self.request(Method::POST, &format!("/management/stop/{name}"));
        self.execute(req).await
    }

    pub async fn simulate_failure(&self, name: &str) -> CliClientResult<Value> {
        let req = self.request(Method::POST, &format!("/management/simulate_failure/{name}"));
        self.execute(req).await
    }

    pub async fn recover_service(&self, name: &str) -> CliClientResult<Value> {
        let req = self.request(Method::POST, &format!("/management/recover/{name}"));
        self.execute(req).await
    }

    // =========================================================================
    // Users
    // =========================================================================

    pub async fn get_user(&self, id: &str) -> CliClientResult<Value> {
        let req = self.request(Method::GET, &format!("/users/{id}"));
        self.execute(req).await
    }

    pub async fn list_users(&self) -> CliClientResult<Value> {
        let req = self.request(Method::GET, "/users/");
        self.execute(req).await
    }

    pub async fn create_user(&self, name: &str, email: &str) -> CliClientResult<Value> {
        #[derive(Serialize)]
        struct CreateRequest<'a> {
            name: &'a str,
            email: &'a str,
        }

        let req = self
            .request(Method::POST, "/users/")
            .json(&CreateRequest { name, email });
        self.execute(req).await
    }

    // =========================================================================
    // Products
    // =========================================================================

    pub async fn get_product(&self, id: &str) -> CliClientResult<Value> {
        let req = self.request(Method::GET, &format!("/products/{id}"));
        self.execute(req).await
    }

    pub async fn list_products(&self) -> CliClientResult<Value> {
        let req = self.request(Method::GET, "/products/");
        self.execute(req).await
    }

    pub async fn purchase_product(&self, id: &str, quantity: u32) -> CliClientResult<Value> {
        let req = self
            .request(Method::POST, &format!("/products/{id}/purchase"))
            .json(&json!({ "quantity": quantity }));
        self.execute(req).await
    }

    // =========================================================================
    // Orders
    // =========================================================================

    pub async fn get_order(&self, id: &str) -> CliClientResult<Value> {
        let req = self.request(Method::GET, &format!("/orders/{id}"));
        self.execute(req).await
    }

    pub async fn list_orders(&self) -> CliClientResult<Value> {
        let req = self.request(Method::GET, "/orders/");
        self.execute(req).await
    }

    // =========================================================================
    // Smoke
    // =========================================================================

    /// Walk the proxy surface once: a user, the load-balanced product three
    /// times, an order, then the status snapshot. Individual failures are
    /// recorded in the report; only an unreachable status endpoint is fatal.
    pub async fn smoke(&self) -> CliClientResult<Value> {
        let user = step(self.get_user("123").await);

        let mut products = Vec::with_capacity(SMOKE_PRODUCT_REQUESTS);
        for _ in 0..SMOKE_PRODUCT_REQUESTS {
            products.push(step(self.get_product("1").await));
        }

        let order = step(self.get_order("2").await);

        let status = self.status().await?;
        let health: serde_json::Map<String, Value> = status["services"]
            .as_object()
            .map(|services| {
                services
                    .iter()
                    .map(|(name, service)| (name.clone(), service["healthy"].clone()))
                    .collect()
            })
            .unwrap_or_default();

        Ok(json!({
            "user": user,
            "products": products,
            "order": order,
            "status": {
                "services": health,
                "total_requests": status["total_requests"],
                "load_balancer_state": status["load_balancer_state"],
            },
        }))
    }
}

fn step(result: CliClientResult<Value>) -> Value {
    match result {
        Ok(response) => json!({ "ok": true, "response": response }),
        Err(e) => json!({ "ok": false, "error": e.summary() }),
    }
}
