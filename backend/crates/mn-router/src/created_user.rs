use serde::Deserialize;
use serde_json::Value;

/// Identity returned by the user service after a create
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedUser {
    pub id: Value,
    pub name: String,
}

impl CreatedUser {
    /// Id without JSON quoting
    pub fn id_display(&self) -> String {
        match &self.id {
            Value::String(id) => id.clone(),
            other => other.to_string(),
        }
    }
}
