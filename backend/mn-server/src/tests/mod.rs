mod api;

use mn_auth::RoleAuthority;
use mn_core::{LaunchCommand, ServiceDescriptor, ServiceRegistry, ShutdownCoordinator};
use mn_router::RequestRouter;
use mn_supervisor::{HealthProbe, ProcessSupervisor, SupervisorSettings};
use mn_ws::{AppState, CommandContext, ConnectionConfig, Metrics, SessionRegistry};

use std::sync::Arc;
use std::time::Duration;

pub(crate) fn app_state(authority: RoleAuthority) -> AppState {
    let registry = ServiceRegistry::new([ServiceDescriptor::new(
        "user",
        "localhost",
        8001,
        LaunchCommand::new("python", vec!["user_service/server.py".to_string()]),
    )]);
    let probe = HealthProbe::new(Duration::from_millis(200)).unwrap();
    let settings = SupervisorSettings {
        startup_grace: Duration::from_millis(10),
        shutdown_timeout: Duration::from_millis(200),
    };

    AppState {
        commands: CommandContext {
            registry: registry.clone(),
            supervisor: Arc::new(ProcessSupervisor::new(registry.clone(), probe, settings)),
            router: RequestRouter::new(registry, Duration::from_secs(1)).unwrap(),
            sessions: SessionRegistry::new(10),
        },
        authority,
        metrics: Metrics::new(),
        shutdown: ShutdownCoordinator::new(),
        config: ConnectionConfig::default(),
    }
}
