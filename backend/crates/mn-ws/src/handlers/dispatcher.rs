use crate::handlers::command::HELP_TEXT;
use crate::{Command, CommandContext, CommandError, CommandReply, with_error_boundary};

use std::time::Duration;

use log::{error, info};
use mn_core::{ControlError, Role};
use mn_supervisor::StartOutcome;

/// Upper bound for one command, grace window and downstream calls included
pub const DISPATCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Run one parsed command on behalf of a session.
/// Includes:
/// - Panic isolation
/// - Timeout protection
/// - Role check for process control
pub async fn dispatch(
    command: Command,
    role: Role,
    ctx: CommandContext,
) -> Result<CommandReply, CommandError> {
    let name = command.name();

    let result = tokio::time::timeout(
        DISPATCH_TIMEOUT,
        with_error_boundary(name, move || dispatch_inner(command, role, ctx)),
    )
    .await;

    match result {
        Ok(outcome) => outcome,
        Err(_elapsed) => {
            error!(
                "Command {} timed out after {}s",
                name,
                DISPATCH_TIMEOUT.as_secs()
            );
            Err(CommandError::timeout(DISPATCH_TIMEOUT.as_secs()))
        }
    }
}

async fn dispatch_inner(
    command: Command,
    role: Role,
    ctx: CommandContext,
) -> Result<CommandReply, CommandError> {
    match command {
        Command::Status => {
            let snapshot = ctx.registry.snapshot().await;
            Ok(CommandReply::text(snapshot.render_text()))
        }
        Command::Start { service } => {
            require_manager(role, "start")?;
            let outcome = ctx.supervisor.start(&service).await?;
            info!("Service {} started from ChatOps ({:?})", service, outcome);
            Ok(CommandReply::state_change(match outcome {
                StartOutcome::Healthy => format!("✅ Started {service} service"),
                StartOutcome::Unconfirmed => {
                    format!("⚠️ Started {service} service but it is not responding yet")
                }
            }))
        }
        Command::Stop { service } => {
            require_manager(role, "stop")?;
            ctx.supervisor.stop(&service).await?;
            info!("Service {} stopped from ChatOps", service);
            Ok(CommandReply::state_change(format!(
                "✅ Stopped {service} service"
            )))
        }
        Command::Fail { service } => {
            ctx.registry.set_healthy(&service, false).await?;
            Ok(CommandReply::state_change(format!(
                "✅ Simulated failure for {service} service"
            )))
        }
        Command::Recover { service } => {
            ctx.registry.set_healthy(&service, true).await?;
            Ok(CommandReply::state_change(format!(
                "✅ Recovered {service} service"
            )))
        }
        Command::CreateUser { name, email } => {
            let created = ctx.router.create_user(&name, &email).await?;
            Ok(CommandReply::text(format!(
                "✅ Created user: {} (ID: {})",
                created.name,
                created.id_display()
            )))
        }
        Command::Help => Ok(CommandReply::text(HELP_TEXT)),
        Command::Users => Ok(CommandReply::text(ctx.sessions.counts().await.to_string())),
        Command::Clear => Ok(CommandReply::Clear),
    }
}

#[track_caller]
fn require_manager(role: Role, action: &str) -> Result<(), CommandError> {
    if role.is_manager() {
        Ok(())
    } else {
        Err(ControlError::permission_denied(action).into())
    }
}
