pub mod app_state;
pub mod chat_message;
pub mod connection_config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod session_id;
pub mod session_info;
pub mod session_registry;
pub mod web_socket_connection;

pub use app_state::{AppState, ConnectParams, handler};
pub use chat_message::{ChatMessage, MessageType, SYSTEM_USER};
pub use connection_config::ConnectionConfig;
pub use error::{Result, WsError};
pub use handlers::command::{Command, is_announced};
pub use handlers::command_error::CommandError;
pub use handlers::command_reply::CommandReply;
pub use handlers::context::CommandContext;
pub use handlers::dispatcher::{DISPATCH_TIMEOUT, dispatch};
pub use handlers::error_boundary::with_error_boundary;
pub use handlers::response_builder::build_envelope;
pub use metrics::Metrics;
pub use session_id::SessionId;
pub use session_info::{SessionCounts, SessionInfo};
pub use session_registry::SessionRegistry;
pub use web_socket_connection::WebSocketConnection;

#[cfg(test)]
mod tests;

use mn_core::Role;
use tracing::info_span;

/// Create a tracing span for one ChatOps command.
pub fn create_command_span(session_id: &SessionId, role: Role, command: &str) -> tracing::Span {
    info_span!(
        "chatops_command",
        session_id = %session_id,
        role = %role,
        command = %command,
    )
}
