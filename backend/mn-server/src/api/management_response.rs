use serde::Serialize;

/// Body of a successful management action
#[derive(Debug, Serialize)]
pub struct ManagementResponse {
    pub message: String,
    /// Set by `start`: whether the readiness probe confirmed the process
    #[serde(skip_serializing_if = "Option::is_none")]
    pub healthy: Option<bool>,
}

impl ManagementResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            healthy: None,
        }
    }
}
