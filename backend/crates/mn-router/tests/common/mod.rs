#![allow(dead_code)]

use std::time::Duration;

use mn_core::{LaunchCommand, ServiceDescriptor, ServiceRegistry, ServiceStatus};
use mn_router::RequestRouter;
use wiremock::MockServer;

/// Running, healthy descriptor pointed at a collaborator double
pub fn running_descriptor(server: &MockServer, name: &str, instances: usize) -> ServiceDescriptor {
    let addr = server.address();
    let mut descriptor = ServiceDescriptor::new(
        name,
        addr.ip().to_string(),
        addr.port(),
        LaunchCommand::new("true", vec![]),
    )
    .with_instances(instances);
    descriptor.status = ServiceStatus::Running;
    descriptor
}

pub fn router(registry: &ServiceRegistry) -> RequestRouter {
    RequestRouter::new(registry.clone(), Duration::from_secs(2)).unwrap()
}

/// Address nothing listens on
pub fn dead_descriptor(name: &str) -> ServiceDescriptor {
    let mut descriptor = ServiceDescriptor::new(
        name,
        "127.0.0.1",
        1,
        LaunchCommand::new("true", vec![]),
    );
    descriptor.status = ServiceStatus::Running;
    descriptor
}
