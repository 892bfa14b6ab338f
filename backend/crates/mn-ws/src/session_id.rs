use uuid::Uuid;

/// Operator-visible session id, `user_` followed by 8 hex digits
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(String);

impl SessionId {
    pub const PREFIX: &'static str = "user_";

    pub fn new() -> Self {
        let simple = Uuid::new_v4().simple().to_string();
        Self(format!("{}{}", Self::PREFIX, &simple[..8]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
