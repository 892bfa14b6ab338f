#![allow(dead_code)]

use std::time::Duration;

use mn_core::{LaunchCommand, ServiceDescriptor, ServiceRegistry};
use mn_supervisor::{HealthProbe, ProcessSupervisor, SupervisorSettings};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const PROBE_TIMEOUT: Duration = Duration::from_millis(500);

/// Collaborator double whose `/health` answers with `status`
pub async fn collaborator(status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(status))
        .mount(&server)
        .await;
    server
}

/// Long-lived child that exits on SIGTERM
pub fn sleeper() -> LaunchCommand {
    LaunchCommand::new("sleep", vec!["30".to_string()])
}

/// Child that ignores SIGTERM and must be force killed
pub fn stubborn() -> LaunchCommand {
    LaunchCommand::new(
        "sh",
        vec!["-c".to_string(), "trap '' TERM; exec sleep 30".to_string()],
    )
}

/// Descriptor whose base address points at `server`
pub fn descriptor_for(server: &MockServer, name: &str, launch: LaunchCommand) -> ServiceDescriptor {
    let addr = server.address();
    ServiceDescriptor::new(name, addr.ip().to_string(), addr.port(), launch)
}

pub fn probe() -> HealthProbe {
    HealthProbe::new(PROBE_TIMEOUT).unwrap()
}

pub fn fast_settings() -> SupervisorSettings {
    SupervisorSettings {
        startup_grace: Duration::from_millis(50),
        shutdown_timeout: Duration::from_millis(500),
    }
}

pub fn supervisor(registry: &ServiceRegistry) -> ProcessSupervisor {
    ProcessSupervisor::new(registry.clone(), probe(), fast_settings())
}
