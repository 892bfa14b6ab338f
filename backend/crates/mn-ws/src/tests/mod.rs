
use crate::{CommandContext, SessionRegistry};

use std::sync::Arc;
use std::time::Duration;

use mn_core::{LaunchCommand, ServiceDescriptor, ServiceRegistry, ServiceStatus};
use mn_router::RequestRouter;
use mn_supervisor::{HealthProbe, ProcessSupervisor, SupervisorSettings};

/// user:8001, product:8002 (2 instances), order:8003, all running
pub(crate) async fn running_registry() -> ServiceRegistry {
    let registry = ServiceRegistry::new([
        descriptor("user", 8001, 1),
        descriptor("product", 8002, 2),
        descriptor("order", 8003, 1),
    ]);
    for name in registry.names().await {
        registry
            .update(&name, |d| d.status = ServiceStatus::Running)
            .await
            .unwrap();
    }
    registry
}

fn descriptor(name: &str, port: u16, instances: usize) -> ServiceDescriptor {
    ServiceDescriptor::new(
        name,
        "localhost",
        port,
        LaunchCommand::new("python", vec![format!("{name}_service/server.py")]),
    )
    .with_instances(instances)
}

pub(crate) fn context(registry: &ServiceRegistry) -> CommandContext {
    let probe = HealthProbe::new(Duration::from_millis(200)).unwrap();
    let settings = SupervisorSettings {
        startup_grace: Duration::from_millis(10),
        shutdown_timeout: Duration::from_millis(200),
    };
    CommandContext {
        registry: registry.clone(),
        supervisor: Arc::new(ProcessSupervisor::new(registry.clone(), probe, settings)),
        router: RequestRouter::new(registry.clone(), Duration::from_secs(1)).unwrap(),
        sessions: SessionRegistry::new(10),
    }
}
