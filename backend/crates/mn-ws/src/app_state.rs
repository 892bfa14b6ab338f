use crate::{CommandContext, ConnectionConfig, Metrics, SessionId, WebSocketConnection};

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::Response,
};
use mn_auth::RoleAuthority;
use mn_core::{Role, ShutdownCoordinator, ShutdownGuard};
use serde::Deserialize;
use tokio::sync::mpsc;

/// Shared state for the ChatOps endpoint
#[derive(Clone)]
pub struct AppState {
    pub commands: CommandContext,
    pub authority: RoleAuthority,
    pub metrics: Metrics,
    pub shutdown: ShutdownCoordinator,
    pub config: ConnectionConfig,
}

/// `?role=<role>&token=<jwt>` on the upgrade request
#[derive(Debug, Default, Deserialize)]
pub struct ConnectParams {
    pub role: Option<String>,
    pub token: Option<String>,
}

/// WebSocket upgrade handler for `/ws/chatops`
pub async fn handler(
    State(state): State<AppState>,
    Query(params): Query<ConnectParams>,
    ws: WebSocketUpgrade,
) -> Result<Response, StatusCode> {
    let role = state
        .authority
        .resolve(params.role.as_deref(), params.token.as_deref())
        .map_err(|e| {
            log::warn!("ChatOps authentication failed: {}", e);
            state.metrics.connection_rejected("unauthorized");
            StatusCode::UNAUTHORIZED
        })?;

    let (tx, rx) = mpsc::channel::<Message>(state.config.send_buffer_size);

    let session_id = state
        .commands
        .sessions
        .register(role, tx.clone())
        .await
        .map_err(|e| {
            log::warn!("ChatOps session refused: {}", e);
            state.metrics.connection_rejected("limit");
            StatusCode::SERVICE_UNAVAILABLE
        })?;

    let shutdown_guard = state.shutdown.subscribe_guard();
    let sessions = state.commands.sessions.clone();
    let failed_session = session_id.clone();

    Ok(ws
        .on_failed_upgrade(move |e| {
            log::warn!("ChatOps upgrade for {} failed: {}", failed_session, e);
            tokio::spawn(async move {
                sessions.unregister(&failed_session).await;
            });
        })
        .on_upgrade(move |socket| {
            handle_socket(socket, state, session_id, role, tx, rx, shutdown_guard)
        }))
}

async fn handle_socket(
    socket: WebSocket,
    state: AppState,
    session_id: SessionId,
    role: Role,
    tx: mpsc::Sender<Message>,
    rx: mpsc::Receiver<Message>,
    shutdown_guard: ShutdownGuard,
) {
    let connection = WebSocketConnection::new(
        session_id.clone(),
        role,
        state.commands.clone(),
        state.metrics.clone(),
    );

    if let Err(e) = connection.handle(socket, tx, rx, shutdown_guard).await {
        log::error!(
            "ChatOps session {} ended with {}: {}",
            session_id,
            e.error_code(),
            e
        );
    }
}
