use crate::{CommandError, CommandReply};

use log::error;

/// Execute a command handler with panic recovery
pub async fn with_error_boundary<F, Fut>(
    command_name: &str,
    handler: F,
) -> Result<CommandReply, CommandError>
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = Result<CommandReply, CommandError>> + Send + 'static,
{
    // Spawn the handler in a separate task for panic isolation
    let result = tokio::spawn(async move { handler().await }).await;

    match result {
        Ok(outcome) => outcome,
        Err(join_error) => {
            let panic_msg = if join_error.is_panic() {
                match join_error.into_panic().downcast::<String>() {
                    Ok(msg) => *msg,
                    Err(any) => match any.downcast::<&str>() {
                        Ok(msg) => msg.to_string(),
                        Err(_) => "Unknown panic".to_string(),
                    },
                }
            } else {
                "Task cancelled".to_string()
            };

            error!("Command {} panicked: {}", command_name, panic_msg);

            Err(CommandError::internal(panic_msg))
        }
    }
}
