use crate::{ChatMessage, CommandError, CommandReply};

/// The single conversion from a command result to its wire envelope
pub fn build_envelope(result: &Result<CommandReply, CommandError>) -> ChatMessage {
    match result {
        Ok(CommandReply::Text { message, .. }) => ChatMessage::response(message.as_str()),
        Ok(CommandReply::Clear) => ChatMessage::clear_chat(),
        Err(e) => ChatMessage::error(e.user_message()),
    }
}
