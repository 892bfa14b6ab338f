/// Successful outcome of a command, before it becomes an envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandReply {
    /// `command_response` to the sender
    Text {
        message: String,
        /// Registry or process state changed; other sessions are told
        changed_state: bool,
    },
    /// `clear_chat` to the sender
    Clear,
}

impl CommandReply {
    pub fn text(message: impl Into<String>) -> Self {
        Self::Text {
            message: message.into(),
            changed_state: false,
        }
    }

    pub fn state_change(message: impl Into<String>) -> Self {
        Self::Text {
            message: message.into(),
            changed_state: true,
        }
    }

    /// Text for the `system_broadcast`, if this outcome warrants one
    pub fn broadcast_text(&self) -> Option<&str> {
        match self {
            Self::Text {
                message,
                changed_state: true,
            } => Some(message),
            _ => None,
        }
    }
}
