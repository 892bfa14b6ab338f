use mn_ws::AppState;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// GET /health - control-plane liveness
pub async fn health_check(State(state): State<AppState>) -> Response {
    let health = json!({
        "status": "healthy",
        "service": "api_gateway",
        "version": env!("CARGO_PKG_VERSION"),
        "chatops_sessions": state.commands.sessions.total_count().await,
        "supervised_processes": state.commands.supervisor.supervised_count().await,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (StatusCode::OK, Json(health)).into_response()
}
