use serde::{Deserialize, Serialize};

/// Coarse operator role. Only `manager` may start or stop services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Client,
    Manager,
}

impl Role {
    /// Anything other than `manager` (case-insensitive) is a client.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("manager") {
            Self::Manager
        } else {
            Self::Client
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Manager => "manager",
        }
    }

    pub fn is_manager(&self) -> bool {
        matches!(self, Self::Manager)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
