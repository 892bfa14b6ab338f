use crate::{ServiceDescriptor, ServiceStatus};

use std::collections::BTreeMap;

use serde::Serialize;

/// Read-only view of one descriptor. Never carries the process handle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceSnapshot {
    pub host: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub port: u16,
    pub instances: usize,
    pub status: ServiceStatus,
    pub healthy: bool,
}

impl From<&ServiceDescriptor> for ServiceSnapshot {
    fn from(descriptor: &ServiceDescriptor) -> Self {
        Self {
            host: descriptor.base_url(),
            kind: descriptor.kind.clone(),
            port: descriptor.port,
            instances: descriptor.instances,
            status: descriptor.status,
            healthy: descriptor.healthy,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrySnapshot {
    pub services: BTreeMap<String, ServiceSnapshot>,
    pub total_requests: u64,
    pub load_balancer_state: BTreeMap<String, usize>,
}

impl RegistrySnapshot {
    pub fn service(&self, name: &str) -> Option<&ServiceSnapshot> {
        self.services.get(name)
    }

    /// Multi-line operator summary used by the `status` command
    pub fn render_text(&self) -> String {
        let mut out = String::from("=== NETWORK STATUS ===\n");
        for (name, service) in &self.services {
            let running = if service.status == ServiceStatus::Running {
                "✅ RUNNING"
            } else {
                "❌ STOPPED"
            };
            let health = if service.healthy { "HEALTHY" } else { "UNHEALTHY" };
            let label = name.to_uppercase();
            if service.status.is_transitional() {
                out.push_str(&format!(
                    "{label:<10}: ⏳ {} ({health})\n",
                    service.status.as_str().to_uppercase()
                ));
            } else {
                out.push_str(&format!("{label:<10}: {running} ({health})\n"));
            }
        }
        out.push_str(&format!("\nTotal Requests: {}", self.total_requests));
        let cursors = self
            .load_balancer_state
            .iter()
            .map(|(name, cursor)| format!("{name}={cursor}"))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!("\nLoad Balancer State: {cursors}"));
        out
    }
}
