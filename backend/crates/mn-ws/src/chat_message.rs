use crate::{Result as WsErrorResult, WsError};

use std::panic::Location;

use axum::extract::ws::Message;
use chrono::Utc;
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// `user_id` of messages authored by the control plane itself
pub const SYSTEM_USER: &str = "system";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    System,
    CommandSent,
    CommandReceived,
    CommandResponse,
    SystemBroadcast,
    Error,
    ClearChat,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::CommandSent => "command_sent",
            Self::CommandReceived => "command_received",
            Self::CommandResponse => "command_response",
            Self::SystemBroadcast => "system_broadcast",
            Self::Error => "error",
            Self::ClearChat => "clear_chat",
        }
    }
}

impl std::fmt::Display for MessageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// JSON envelope for every frame on the ChatOps channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(rename = "type")]
    pub kind: MessageType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub user_id: String,
    /// Unix seconds with sub-second precision
    pub timestamp: f64,
}

impl ChatMessage {
    fn new(kind: MessageType, message: Option<String>, user_id: impl Into<String>) -> Self {
        Self {
            kind,
            message,
            user_id: user_id.into(),
            timestamp: Utc::now().timestamp_micros() as f64 / 1_000_000.0,
        }
    }

    pub fn system(message: impl Into<String>) -> Self {
        Self::new(MessageType::System, Some(message.into()), SYSTEM_USER)
    }

    pub fn command_sent(user_id: impl Into<String>, command: impl Into<String>) -> Self {
        Self::new(MessageType::CommandSent, Some(command.into()), user_id)
    }

    pub fn command_received(user_id: impl Into<String>, command: &str) -> Self {
        let user_id = user_id.into();
        let message = format!("User {user_id} executed: {command}");
        Self::new(MessageType::CommandReceived, Some(message), user_id)
    }

    pub fn response(message: impl Into<String>) -> Self {
        Self::new(MessageType::CommandResponse, Some(message.into()), SYSTEM_USER)
    }

    pub fn system_broadcast(updated_by: &str, outcome: &str) -> Self {
        let message = format!("System updated by {updated_by}: {outcome}");
        Self::new(MessageType::SystemBroadcast, Some(message), SYSTEM_USER)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(MessageType::Error, Some(message.into()), SYSTEM_USER)
    }

    pub fn clear_chat() -> Self {
        Self::new(MessageType::ClearChat, None, SYSTEM_USER)
    }

    pub fn message_text(&self) -> &str {
        self.message.as_deref().unwrap_or_default()
    }

    #[track_caller]
    pub fn to_ws_message(&self) -> WsErrorResult<Message> {
        let json = serde_json::to_string(self).map_err(|source| WsError::Encode {
            source,
            location: ErrorLocation::from(Location::caller()),
        })?;
        Ok(Message::Text(json.into()))
    }
}
