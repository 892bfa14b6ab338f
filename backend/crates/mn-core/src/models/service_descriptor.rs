use crate::{LaunchCommand, ProcessHandle, ServiceStatus};

/// Default transport label
pub const REST_KIND: &str = "rest";

/// One managed backend service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceDescriptor {
    pub name: String,
    pub host: String,
    pub port: u16,
    pub launch: LaunchCommand,
    /// Fixed instance count; more than one means the service is load-balanced
    pub instances: usize,
    pub kind: String,
    /// Present only while the supervisor holds a live child
    pub process: Option<ProcessHandle>,
    pub status: ServiceStatus,
    pub healthy: bool,
}

impl ServiceDescriptor {
    pub fn new(
        name: impl Into<String>,
        host: impl Into<String>,
        port: u16,
        launch: LaunchCommand,
    ) -> Self {
        Self {
            name: name.into(),
            host: host.into(),
            port,
            launch,
            instances: 1,
            kind: REST_KIND.to_string(),
            process: None,
            status: ServiceStatus::Stopped,
            healthy: true,
        }
    }

    pub fn with_instances(mut self, instances: usize) -> Self {
        self.instances = instances.max(1);
        self
    }

    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    pub fn is_load_balanced(&self) -> bool {
        self.instances > 1
    }

    pub fn has_process(&self) -> bool {
        self.process.is_some()
    }
}
