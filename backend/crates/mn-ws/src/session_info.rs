use crate::SessionId;

use chrono::{DateTime, Utc};
use mn_core::Role;

/// Metadata about an active ChatOps session
#[derive(Debug, Clone)]
pub struct SessionInfo {
    pub session_id: SessionId,
    pub role: Role,
    pub connected_at: DateTime<Utc>,
}

impl SessionInfo {
    pub fn new(session_id: SessionId, role: Role) -> Self {
        Self {
            session_id,
            role,
            connected_at: Utc::now(),
        }
    }
}

/// Connected sessions grouped by role
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionCounts {
    pub total: usize,
    pub managers: usize,
    pub clients: usize,
}

impl std::fmt::Display for SessionCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Connected users: {} (Managers: {}, Clients: {})",
            self.total, self.managers, self.clients
        )
    }
}
