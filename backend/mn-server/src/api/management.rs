use crate::{ApiResult, CallerRole, ManagementResponse};

use mn_core::{ControlError, RegistrySnapshot};
use mn_supervisor::StartOutcome;
use mn_ws::AppState;

use axum::{
    Json,
    extract::{Path, State},
};
use log::info;

/// GET /management/status
pub async fn get_status(State(state): State<AppState>) -> Json<RegistrySnapshot> {
    Json(state.commands.registry.snapshot().await)
}

/// POST /management/start/{name} (manager only)
pub async fn start_service(
    State(state): State<AppState>,
    CallerRole(role): CallerRole,
    Path(name): Path<String>,
) -> ApiResult<Json<ManagementResponse>> {
    info!("Start service request for {} from role: {}", name, role);
    if !role.is_manager() {
        return Err(ControlError::permission_denied("start").into());
    }

    let outcome = state.commands.supervisor.start(&name).await?;
    let message = match outcome {
        StartOutcome::Healthy => format!("Started {name} service"),
        StartOutcome::Unconfirmed => format!("Service {name} started but not responding"),
    };

    Ok(Json(ManagementResponse {
        message,
        healthy: Some(outcome.is_healthy()),
    }))
}

/// POST /management/stop/{name} (manager only)
pub async fn stop_service(
    State(state): State<AppState>,
    CallerRole(role): CallerRole,
    Path(name): Path<String>,
) -> ApiResult<Json<ManagementResponse>> {
    info!("Stop service request for {} from role: {}", name, role);
    if !role.is_manager() {
        return Err(ControlError::permission_denied("stop").into());
    }

    state.commands.supervisor.stop(&name).await?;
    Ok(Json(ManagementResponse::new(format!(
        "Stopped {name} service"
    ))))
}

/// POST /management/simulate_failure/{name}
pub async fn simulate_failure(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<ManagementResponse>> {
    state.commands.registry.set_healthy(&name, false).await?;
    Ok(Json(ManagementResponse::new(format!(
        "Simulated failure for {name}"
    ))))
}

/// POST /management/recover/{name}
pub async fn recover_service(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<ManagementResponse>> {
    state.commands.registry.set_healthy(&name, true).await?;
    Ok(Json(ManagementResponse::new(format!("Recovered {name}"))))
}
