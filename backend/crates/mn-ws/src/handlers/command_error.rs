use std::panic::Location;

use error_location::ErrorLocation;
use mn_core::ControlError;
use thiserror::Error;

/// Why a ChatOps command produced an `error` envelope
#[derive(Error, Debug)]
pub enum CommandError {
    #[error(transparent)]
    Control(#[from] ControlError),

    #[error("Unknown command '{input}' {location}")]
    UnknownCommand {
        input: String,
        location: ErrorLocation,
    },

    #[error("Usage: {usage} {location}")]
    Usage {
        usage: &'static str,
        location: ErrorLocation,
    },

    #[error("Command timed out after {seconds}s {location}")]
    Timeout {
        seconds: u64,
        location: ErrorLocation,
    },

    #[error("Command handler failed: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl CommandError {
    #[track_caller]
    pub fn unknown(input: impl Into<String>) -> Self {
        Self::UnknownCommand {
            input: input.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn usage(usage: &'static str) -> Self {
        Self::Usage {
            usage,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn timeout(seconds: u64) -> Self {
        Self::Timeout {
            seconds,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Control(e) => e.error_code(),
            Self::UnknownCommand { .. } => "UNKNOWN_COMMAND",
            Self::Usage { .. } => "USAGE",
            Self::Timeout { .. } => "TIMEOUT",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Text shown to the operator; never includes source locations.
    pub fn user_message(&self) -> String {
        match self {
            Self::Control(e) => format!("❌ {}", e.user_message()),
            Self::UnknownCommand { .. } => {
                "❌ Unknown command. Type 'help' for available commands.".to_string()
            }
            Self::Usage { usage, .. } => format!("❌ Usage: {usage}"),
            Self::Timeout { seconds, .. } => {
                // The handler task is detached, not cancelled
                format!(
                    "❌ Command timed out after {seconds}s. It may still complete without \
                     a broadcast; run 'status' before retrying."
                )
            }
            Self::Internal { .. } => {
                "❌ Error processing command: an unexpected error occurred".to_string()
            }
        }
    }
}
