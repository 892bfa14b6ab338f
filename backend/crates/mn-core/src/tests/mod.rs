mod models;

use crate::{LaunchCommand, ServiceDescriptor, ServiceRegistry};

pub(crate) fn descriptor(name: &str, port: u16, instances: usize) -> ServiceDescriptor {
    ServiceDescriptor::new(
        name,
        "localhost",
        port,
        LaunchCommand::new("python", vec![format!("{name}_service/server.py")]),
    )
    .with_instances(instances)
}

/// user:8001, product:8002 (2 instances), order:8003, all stopped
pub(crate) fn default_registry() -> ServiceRegistry {
    ServiceRegistry::new([
        descriptor("user", 8001, 1),
        descriptor("product", 8002, 2),
        descriptor("order", 8003, 1),
    ])
}

/// Same services, all running and healthy
pub(crate) async fn running_registry() -> ServiceRegistry {
    let registry = default_registry();
    for name in registry.names().await {
        registry
            .update(&name, |d| d.status = crate::ServiceStatus::Running)
            .await
            .unwrap();
    }
    registry
}
