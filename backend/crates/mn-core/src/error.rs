use std::panic::Location;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// Why the router refused to contact a collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnavailableReason {
    /// Service status is `stopped`
    ManuallyStopped,
    /// Service is flagged unhealthy
    Unhealthy,
}

impl UnavailableReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ManuallyStopped => "manually-stopped",
            Self::Unhealthy => "unhealthy",
        }
    }
}

impl std::fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Failure taxonomy shared by the router, the supervisor and the command bus.
#[derive(Error, Debug)]
pub enum ControlError {
    #[error("Service '{service}' not found {location}")]
    NotFound {
        service: String,
        location: ErrorLocation,
    },

    #[error("Permission denied: only managers can {action} services {location}")]
    PermissionDenied {
        action: String,
        location: ErrorLocation,
    },

    #[error("Service '{service}' unavailable ({reason}) {location}")]
    Unavailable {
        service: String,
        reason: UnavailableReason,
        location: ErrorLocation,
    },

    #[error("Upstream error from '{service}': {message} {location}")]
    Upstream {
        service: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("Service '{service}' rejected the request with HTTP {status}: {body} {location}")]
    Rejected {
        service: String,
        status: u16,
        body: String,
        location: ErrorLocation,
    },

    #[error("Service '{service}' is already running {location}")]
    AlreadyRunning {
        service: String,
        location: ErrorLocation,
    },

    #[error("Service '{service}' is not running {location}")]
    NotRunning {
        service: String,
        location: ErrorLocation,
    },

    #[error("Failed to spawn '{service}': {source} {location}")]
    Spawn {
        service: String,
        #[source]
        source: std::io::Error,
        location: ErrorLocation,
    },

    #[error("Failed to terminate '{service}': {message} {location}")]
    Terminate {
        service: String,
        message: String,
        location: ErrorLocation,
    },
}

impl ControlError {
    #[track_caller]
    pub fn not_found(service: impl Into<String>) -> Self {
        Self::NotFound {
            service: service.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn permission_denied(action: impl Into<String>) -> Self {
        Self::PermissionDenied {
            action: action.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unavailable(service: impl Into<String>, reason: UnavailableReason) -> Self {
        Self::Unavailable {
            service: service.into(),
            reason,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn upstream(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Upstream {
            service: service.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn rejected(service: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::Rejected {
            service: service.into(),
            status,
            body: body.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn already_running(service: impl Into<String>) -> Self {
        Self::AlreadyRunning {
            service: service.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn not_running(service: impl Into<String>) -> Self {
        Self::NotRunning {
            service: service.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn spawn(service: impl Into<String>, source: std::io::Error) -> Self {
        Self::Spawn {
            service: service.into(),
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn terminate(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Terminate {
            service: service.into(),
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Machine-readable code for HTTP bodies and logs
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::PermissionDenied { .. } => "PERMISSION_DENIED",
            Self::Unavailable { .. } => "UNAVAILABLE",
            Self::Upstream { .. } => "UPSTREAM_ERROR",
            Self::Rejected { .. } => "REJECTED",
            Self::AlreadyRunning { .. } => "ALREADY_RUNNING",
            Self::NotRunning { .. } => "NOT_RUNNING",
            Self::Spawn { .. } => "SPAWN_ERROR",
            Self::Terminate { .. } => "TERMINATE_ERROR",
        }
    }

    /// Operator-facing message without the source location.
    pub fn user_message(&self) -> String {
        match self {
            Self::NotFound { service, .. } => format!("Service '{service}' not found"),
            Self::PermissionDenied { action, .. } => {
                format!("Only managers can {action} services")
            }
            Self::Unavailable {
                service,
                reason: UnavailableReason::ManuallyStopped,
                ..
            } => format!("{} service has been stopped by manager", capitalize(service)),
            Self::Unavailable {
                service,
                reason: UnavailableReason::Unhealthy,
                ..
            } => format!("{} service unavailable", capitalize(service)),
            Self::Upstream {
                service, message, ..
            } => format!("{} service error: {message}", capitalize(service)),
            Self::Rejected {
                service,
                status,
                body,
                ..
            } => format!("{} service returned HTTP {status}: {body}", capitalize(service)),
            Self::AlreadyRunning { service, .. } => format!("{service} service is already running"),
            Self::NotRunning { service, .. } => format!("{service} service is not running"),
            Self::Spawn {
                service, source, ..
            } => format!("Failed to start {service}: {source}"),
            Self::Terminate {
                service, message, ..
            } => format!("Failed to stop {service}: {message}"),
        }
    }

    /// Spawn/terminate failures
    pub fn is_supervisor_error(&self) -> bool {
        matches!(self, Self::Spawn { .. } | Self::Terminate { .. })
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub type Result<T> = StdResult<T, ControlError>;
