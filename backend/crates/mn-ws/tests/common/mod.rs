#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use axum::{Router, routing::get};
use axum_test::{TestServer, TestWebSocket};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use mn_auth::{Claims, JwtValidator, RoleAuthority};
use mn_core::{LaunchCommand, ServiceDescriptor, ServiceRegistry, ServiceStatus, ShutdownCoordinator};
use mn_router::RequestRouter;
use mn_supervisor::{HealthProbe, ProcessSupervisor, SupervisorSettings};
use mn_ws::{
    AppState, ChatMessage, CommandContext, ConnectionConfig, MessageType, Metrics, SessionRegistry,
};
use wiremock::MockServer;

pub const TEST_JWT_SECRET: &[u8] = b"test-secret-key-for-integration-tests-min-32-bytes-long";

/// Configuration for test server instances
pub struct TestServerConfig {
    pub authority: RoleAuthority,
    pub max_sessions: usize,
    pub launch: LaunchCommand,
}

impl Default for TestServerConfig {
    fn default() -> Self {
        Self {
            authority: RoleAuthority::self_declared(),
            max_sessions: 100,
            launch: LaunchCommand::new("sleep", vec!["30".to_string()]),
        }
    }
}

impl TestServerConfig {
    pub fn with_verified_roles() -> Self {
        Self {
            authority: RoleAuthority::with_validator(JwtValidator::with_hs256(TEST_JWT_SECRET)),
            ..Default::default()
        }
    }

    pub fn with_max_sessions(max_sessions: usize) -> Self {
        Self {
            max_sessions,
            ..Default::default()
        }
    }
}

/// Test server plus the shared state behind it
pub struct TestServerWithState {
    pub server: TestServer,
    pub registry: ServiceRegistry,
    pub app_state: AppState,
}

/// Serve `/ws/chatops` with every service pointing at `collaborator`.
/// `user` starts stopped; `product` (2 instances) and `order` run.
pub fn create_test_server(collaborator: &MockServer, config: TestServerConfig) -> TestServerWithState {
    let addr = collaborator.address();
    let descriptor = |name: &str, instances: usize, status: ServiceStatus| {
        let mut d = ServiceDescriptor::new(
            name,
            addr.ip().to_string(),
            addr.port(),
            config.launch.clone(),
        )
        .with_instances(instances);
        d.status = status;
        d
    };
    let registry = ServiceRegistry::new([
        descriptor("user", 1, ServiceStatus::Stopped),
        descriptor("product", 2, ServiceStatus::Running),
        descriptor("order", 1, ServiceStatus::Running),
    ]);

    let probe = HealthProbe::new(Duration::from_millis(500)).expect("probe client");
    let settings = SupervisorSettings {
        startup_grace: Duration::from_millis(50),
        shutdown_timeout: Duration::from_millis(500),
    };

    let app_state = AppState {
        commands: CommandContext {
            registry: registry.clone(),
            supervisor: Arc::new(ProcessSupervisor::new(registry.clone(), probe, settings)),
            router: RequestRouter::new(registry.clone(), Duration::from_secs(2))
                .expect("router client"),
            sessions: SessionRegistry::new(config.max_sessions),
        },
        authority: config.authority,
        metrics: Metrics::default(),
        shutdown: ShutdownCoordinator::new(),
        config: ConnectionConfig::default(),
    };

    let app = Router::new()
        .route("/ws/chatops", get(mn_ws::handler))
        .with_state(app_state.clone());

    let server = TestServer::builder()
        .http_transport()
        .build(app)
        .expect("Failed to create test server");

    TestServerWithState {
        server,
        registry,
        app_state,
    }
}

pub fn create_test_token(role: &str) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: "operator-1".to_string(),
        role: role.to_string(),
        exp: now + 3600,
        iat: now,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(TEST_JWT_SECRET),
    )
    .expect("Failed to encode JWT")
}

/// ChatOps test client wrapper
pub struct ChatClient {
    ws: TestWebSocket,
    pub session_id: String,
}

impl ChatClient {
    /// Connect with a self-declared role and consume the welcome pair
    pub async fn connect(server: &TestServer, role: &str) -> Self {
        let ws = server
            .get_websocket("/ws/chatops")
            .add_query_param("role", role)
            .await
            .into_websocket()
            .await;
        Self::after_welcome(ws).await
    }

    pub async fn connect_with_token(server: &TestServer, token: &str) -> (Self, ChatMessage) {
        let mut ws = server
            .get_websocket("/ws/chatops")
            .add_query_param("token", token)
            .await
            .into_websocket()
            .await;
        let welcome = receive(&mut ws).await;
        let info = receive(&mut ws).await;
        (
            Self {
                ws,
                session_id: session_id_from(&info),
            },
            welcome,
        )
    }

    async fn after_welcome(mut ws: TestWebSocket) -> Self {
        let welcome = receive(&mut ws).await;
        assert_eq!(welcome.kind, MessageType::System);
        let info = receive(&mut ws).await;
        Self {
            session_id: session_id_from(&info),
            ws,
        }
    }

    pub async fn send(&mut self, line: &str) {
        self.ws.send_text(line).await;
    }

    pub async fn receive(&mut self) -> ChatMessage {
        receive(&mut self.ws).await
    }

    /// Send a command and return (echo, reply)
    pub async fn run(&mut self, line: &str) -> (ChatMessage, ChatMessage) {
        self.send(line).await;
        let echo = self.receive().await;
        let reply = self.receive().await;
        (echo, reply)
    }

    pub async fn close(self) {
        self.ws.close().await;
    }
}

async fn receive(ws: &mut TestWebSocket) -> ChatMessage {
    let text = ws.receive_text().await;
    serde_json::from_str(&text).expect("chat envelope")
}

/// "Your User ID: user_xxxxxxxx | Role: ..." -> "user_xxxxxxxx"
fn session_id_from(info: &ChatMessage) -> String {
    info.message_text()
        .strip_prefix("Your User ID: ")
        .and_then(|rest| rest.split(" | ").next())
        .expect("info message carries the session id")
        .to_string()
}
