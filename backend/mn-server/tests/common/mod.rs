#![allow(dead_code)]

//! Test infrastructure for mn-server API tests

use mn_auth::RoleAuthority;
use mn_core::{LaunchCommand, ServiceDescriptor, ServiceRegistry, ServiceStatus, ShutdownCoordinator};
use mn_router::RequestRouter;
use mn_server::build_router;
use mn_supervisor::{HealthProbe, ProcessSupervisor, SupervisorSettings};
use mn_ws::{AppState, CommandContext, ConnectionConfig, Metrics, SessionRegistry};

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;
use wiremock::MockServer;

/// Descriptor for `name` whose base address is the collaborator double
pub fn descriptor(server: &MockServer, name: &str, instances: usize) -> ServiceDescriptor {
    let addr = server.address();
    ServiceDescriptor::new(
        name,
        addr.ip().to_string(),
        addr.port(),
        LaunchCommand::new("sleep", vec!["30".to_string()]),
    )
    .with_instances(instances)
}

/// user, product (2 instances) and order all served by `collaborator`.
/// Every service starts `running` and healthy unless listed in `stopped`.
pub async fn create_test_app_state(
    collaborator: &MockServer,
    authority: RoleAuthority,
    stopped: &[&str],
) -> AppState {
    let registry = ServiceRegistry::new([
        descriptor(collaborator, "user", 1),
        descriptor(collaborator, "product", 2),
        descriptor(collaborator, "order", 1),
    ]);
    for name in registry.names().await {
        if !stopped.contains(&name.as_str()) {
            registry
                .update(&name, |d| d.status = ServiceStatus::Running)
                .await
                .unwrap();
        }
    }

    let probe = HealthProbe::new(Duration::from_millis(500)).unwrap();
    let settings = SupervisorSettings {
        startup_grace: Duration::from_millis(50),
        shutdown_timeout: Duration::from_millis(500),
    };

    AppState {
        commands: CommandContext {
            registry: registry.clone(),
            supervisor: Arc::new(ProcessSupervisor::new(registry.clone(), probe, settings)),
            router: RequestRouter::new(registry, Duration::from_secs(2)).unwrap(),
            sessions: SessionRegistry::new(10),
        },
        authority,
        metrics: Metrics::new(),
        shutdown: ShutdownCoordinator::new(),
        config: ConnectionConfig::default(),
    }
}

pub fn app(state: &AppState) -> Router {
    build_router(state.clone(), None)
}

pub fn app_with_static(state: &AppState, dir: &Path) -> Router {
    build_router(state.clone(), Some(dir))
}

/// Send one request and decode the body as JSON (Null when empty or not JSON)
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    headers: &[(&str, &str)],
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);

    (status, json)
}
