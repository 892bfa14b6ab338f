use error_location::ErrorLocation;
use thiserror::Error;

/// Session-level failures. Command failures never surface here; they become
/// `error` envelopes.
#[derive(Error, Debug)]
pub enum WsError {
    #[error("Connection closed: {reason} {location}")]
    ConnectionClosed {
        reason: String,
        location: ErrorLocation,
    },

    /// The session's writer task has ended, nothing more can be delivered
    #[error("Outbound queue closed {location}")]
    OutboundClosed { location: ErrorLocation },

    #[error("Session limit exceeded: {current}/{max} {location}")]
    ConnectionLimitExceeded {
        current: usize,
        max: usize,
        location: ErrorLocation,
    },

    #[error("Envelope encoding failed: {source} {location}")]
    Encode {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },
}

impl WsError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::ConnectionClosed { .. } => "CONNECTION_CLOSED",
            Self::OutboundClosed { .. } => "OUTBOUND_CLOSED",
            Self::ConnectionLimitExceeded { .. } => "CONNECTION_LIMIT_EXCEEDED",
            Self::Encode { .. } => "ENCODE_FAILED",
        }
    }
}

pub type Result<T> = std::result::Result<T, WsError>;
