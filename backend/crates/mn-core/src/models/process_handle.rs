use serde::{Deserialize, Serialize};

/// Opaque token for a supervised child. The `Child` itself stays with the supervisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProcessHandle(u32);

impl ProcessHandle {
    pub fn new(pid: u32) -> Self {
        Self(pid)
    }

    pub fn pid(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ProcessHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "pid:{}", self.0)
    }
}
