use bytes::Bytes;
use reqwest::Method;

/// A domain request addressed to one service, forwarded verbatim
#[derive(Debug, Clone)]
pub struct ProxyRequest {
    pub service: String,
    pub method: Method,
    /// Path plus optional query, e.g. `/products/7?verbose=1`
    pub path_and_query: String,
    pub body: Bytes,
    pub content_type: Option<String>,
    /// Add `load_balanced_instance` to a JSON object response
    pub attach_instance: bool,
}

impl ProxyRequest {
    pub fn new(
        service: impl Into<String>,
        method: Method,
        path_and_query: impl Into<String>,
    ) -> Self {
        Self {
            service: service.into(),
            method,
            path_and_query: path_and_query.into(),
            body: Bytes::new(),
            content_type: None,
            attach_instance: false,
        }
    }

    pub fn get(service: impl Into<String>, path_and_query: impl Into<String>) -> Self {
        Self::new(service, Method::GET, path_and_query)
    }

    pub fn with_body(mut self, body: Bytes, content_type: Option<String>) -> Self {
        self.body = body;
        self.content_type = content_type;
        self
    }

    pub fn with_instance(mut self) -> Self {
        self.attach_instance = true;
        self
    }
}
