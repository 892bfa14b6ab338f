use crate::ApiError;

use std::io;

use axum::response::IntoResponse;
use http::StatusCode;
use http_body_util::BodyExt;
use mn_auth::AuthError;
use mn_core::{ControlError, ErrorLocation, UnavailableReason};

async fn into_parts(error: ApiError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_not_found_returns_404_with_json_body() {
    let (status, json) = into_parts(ControlError::not_found("ghost").into()).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"]["code"], "NOT_FOUND");
    assert_eq!(json["error"]["message"], "Service 'ghost' not found");
}

#[tokio::test]
async fn test_permission_denied_returns_403() {
    let (status, json) = into_parts(ControlError::permission_denied("start").into()).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["error"]["code"], "PERMISSION_DENIED");
    assert_eq!(json["error"]["message"], "Only managers can start services");
}

#[tokio::test]
async fn test_manually_stopped_returns_503_with_stopped_message() {
    let error = ControlError::unavailable("product", UnavailableReason::ManuallyStopped);
    let (status, json) = into_parts(error.into()).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(
        json["error"]["message"],
        "Product service has been stopped by manager"
    );
}

#[tokio::test]
async fn test_upstream_failure_returns_502() {
    let error = ControlError::upstream("order", "connection refused");
    let (status, json) = into_parts(error.into()).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"]["code"], "UPSTREAM_ERROR");
}

#[tokio::test]
async fn test_already_running_and_not_running_return_409() {
    let (status, json) = into_parts(ControlError::already_running("user").into()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"]["code"], "ALREADY_RUNNING");

    let (status, json) = into_parts(ControlError::not_running("user").into()).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"]["code"], "NOT_RUNNING");
}

#[tokio::test]
async fn test_spawn_failure_returns_500() {
    let error = ControlError::spawn("user", io::Error::new(io::ErrorKind::NotFound, "no python"));
    let (status, json) = into_parts(error.into()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"]["code"], "SPAWN_ERROR");
    assert_eq!(json["error"]["message"], "Failed to start user: no python");
}

#[tokio::test]
async fn test_rejected_forwards_downstream_status() {
    let error = ControlError::rejected("user", 422, "{\"detail\":\"bad email\"}");
    let (status, json) = into_parts(error.into()).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(json["error"]["code"], "REJECTED");
    assert_eq!(json["error"]["message"], "{\"detail\":\"bad email\"}");
}

#[tokio::test]
async fn test_missing_token_returns_401() {
    let error = AuthError::MissingToken {
        location: ErrorLocation::from(std::panic::Location::caller()),
    };
    let (status, json) = into_parts(error.into()).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["error"]["code"], "UNAUTHORIZED");
    assert!(
        json["error"]["message"]
            .as_str()
            .unwrap()
            .contains("MISSING_TOKEN")
    );
}
