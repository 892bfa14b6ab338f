//! REST API error types
//!
//! Every failure leaves as `{"error": {"code": "...", "message": "..."}}`
//! with the status code chosen here.

use std::panic::Location;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use mn_auth::AuthError;
use mn_core::ControlError;
use serde::Serialize;
use thiserror::Error;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "NOT_FOUND", "UNAVAILABLE")
    pub code: String,
    pub message: String,
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// 404
    #[error("Not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    /// 401
    #[error("Unauthorized: {message} {location}")]
    Unauthorized {
        message: String,
        location: ErrorLocation,
    },

    /// 403
    #[error("Forbidden: {message} {location}")]
    Forbidden {
        message: String,
        location: ErrorLocation,
    },

    /// 409
    #[error("Conflict ({code}): {message} {location}")]
    Conflict {
        code: &'static str,
        message: String,
        location: ErrorLocation,
    },

    /// 503, the collaborator was never contacted
    #[error("Unavailable: {message} {location}")]
    Unavailable {
        message: String,
        location: ErrorLocation,
    },

    /// 502, the collaborator could not be reached
    #[error("Bad gateway: {message} {location}")]
    BadGateway {
        message: String,
        location: ErrorLocation,
    },

    /// Downstream status passed through
    #[error("Downstream returned {status}: {message} {location}")]
    Downstream {
        status: u16,
        message: String,
        location: ErrorLocation,
    },

    /// 500
    #[error("Internal error ({code}): {message} {location}")]
    Internal {
        code: &'static str,
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::BadGateway { .. } => StatusCode::BAD_GATEWAY,
            Self::Downstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Unauthorized { .. } => "UNAUTHORIZED",
            Self::Forbidden { .. } => "PERMISSION_DENIED",
            Self::Conflict { code, .. } => *code,
            Self::Unavailable { .. } => "UNAVAILABLE",
            Self::BadGateway { .. } => "UPSTREAM_ERROR",
            Self::Downstream { .. } => "REJECTED",
            Self::Internal { code, .. } => *code,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::warn!("{}", self);
        }

        let code = self.code().to_string();
        let message = match self {
            Self::NotFound { message, .. }
            | Self::Unauthorized { message, .. }
            | Self::Forbidden { message, .. }
            | Self::Conflict { message, .. }
            | Self::Unavailable { message, .. }
            | Self::BadGateway { message, .. }
            | Self::Downstream { message, .. }
            | Self::Internal { message, .. } => message,
        };

        (
            status,
            Json(ApiErrorResponse {
                error: ApiErrorBody { code, message },
            }),
        )
            .into_response()
    }
}

/// Map the control-plane taxonomy onto HTTP
impl From<ControlError> for ApiError {
    #[track_caller]
    fn from(e: ControlError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        let message = e.user_message();

        match e {
            ControlError::NotFound { .. } => ApiError::NotFound { message, location },
            ControlError::PermissionDenied { .. } => ApiError::Forbidden { message, location },
            ControlError::Unavailable { .. } => ApiError::Unavailable { message, location },
            ControlError::Upstream { .. } => ApiError::BadGateway { message, location },
            ControlError::Rejected { status, body, .. } => ApiError::Downstream {
                status,
                message: body,
                location,
            },
            ControlError::AlreadyRunning { .. } | ControlError::NotRunning { .. } => {
                ApiError::Conflict {
                    code: e.error_code(),
                    message,
                    location,
                }
            }
            ControlError::Spawn { .. } | ControlError::Terminate { .. } => ApiError::Internal {
                code: e.error_code(),
                message,
                location,
            },
        }
    }
}

impl From<AuthError> for ApiError {
    #[track_caller]
    fn from(e: AuthError) -> Self {
        ApiError::Unauthorized {
            message: format!("{} ({})", auth_message(&e), e.error_code()),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

fn auth_message(e: &AuthError) -> &'static str {
    match e {
        AuthError::TokenExpired { .. } => "Token expired",
        AuthError::MissingToken { .. } => "Bearer token required",
        AuthError::InvalidScheme { .. } => "Authorization must use the Bearer scheme",
        AuthError::JwtDecode { .. } => "Invalid token",
        AuthError::InvalidClaim { .. } => "Token claims rejected",
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
