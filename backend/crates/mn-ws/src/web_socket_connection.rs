use crate::{
    ChatMessage, Command, CommandContext, CommandReply, Metrics,
    Result as WsErrorResult, SessionId, WsError, build_envelope, create_command_span, dispatch,
    is_announced,
};

use std::panic::Location;
use std::time::Instant;

use axum::extract::ws::{Message, WebSocket};
use error_location::ErrorLocation;
use futures::{SinkExt, StreamExt};
use mn_core::{Role, ShutdownGuard};
use tokio::sync::mpsc;
use tracing::Instrument;

/// Manages a single ChatOps session
pub struct WebSocketConnection {
    session_id: SessionId,
    role: Role,
    commands: CommandContext,
    metrics: Metrics,
}

impl WebSocketConnection {
    pub fn new(
        session_id: SessionId,
        role: Role,
        commands: CommandContext,
        metrics: Metrics,
    ) -> Self {
        Self {
            session_id,
            role,
            commands,
            metrics,
        }
    }

    /// Handle the session lifecycle. `tx`/`rx` are the session's outbound
    /// queue; the registry holds another clone of `tx` for broadcasts.
    pub async fn handle(
        self,
        socket: WebSocket,
        tx: mpsc::Sender<Message>,
        mut rx: mpsc::Receiver<Message>,
        mut shutdown_guard: ShutdownGuard,
    ) -> WsErrorResult<()> {
        log::info!(
            "ChatOps session {} established (role {})",
            self.session_id,
            self.role
        );

        self.metrics.connection_established();

        let (mut ws_sender, mut ws_receiver) = socket.split();

        let send_task = tokio::spawn(async move {
            while let Some(msg) = rx.recv().await {
                if ws_sender.send(msg).await.is_err() {
                    break;
                }
            }
        });

        let welcome = self.send_welcome(&tx).await;

        let result = match welcome {
            Err(e) => Err(e),
            Ok(()) => loop {
                tokio::select! {
                    msg = ws_receiver.next() => {
                        match msg {
                            Some(Ok(Message::Close(_))) | None => {
                                log::info!("Session {} closed by client", self.session_id);
                                break Ok(());
                            }
                            Some(Ok(msg)) => {
                                if let Err(e) = self.handle_client_message(msg, &tx).await {
                                    log::error!(
                                        "Error handling message from session {}: {}",
                                        self.session_id,
                                        e
                                    );
                                    self.metrics.error_occurred("message_handling");
                                    break Err(e);
                                }
                            }
                            Some(Err(e)) => {
                                log::error!("WebSocket error on session {}: {}", self.session_id, e);
                                break Err(WsError::ConnectionClosed {
                                    reason: format!("WebSocket error: {}", e),
                                    location: ErrorLocation::from(Location::caller()),
                                });
                            }
                        }
                    }

                    _ = shutdown_guard.wait() => {
                        log::info!("Shutting down session {} gracefully", self.session_id);
                        break Ok(());
                    }
                }
            },
        };

        // Cleanup
        drop(tx);
        self.commands.sessions.unregister(&self.session_id).await;
        let _ = send_task.await;

        let farewell = ChatMessage::system(format!("User {} disconnected", self.session_id));
        self.broadcast_to_others(&farewell).await;

        self.metrics
            .connection_closed(if result.is_ok() { "normal" } else { "error" });

        log::info!("ChatOps session {} closed", self.session_id);

        result
    }

    async fn send_welcome(&self, tx: &mpsc::Sender<Message>) -> WsErrorResult<()> {
        self.send(
            tx,
            ChatMessage::system(format!(
                "🔌 Connected to Network Management ChatOps! Role: {}",
                self.role
            )),
        )
        .await?;
        self.send(
            tx,
            ChatMessage::system(format!(
                "Your User ID: {} | Role: {} | Type 'help' for commands",
                self.session_id, self.role
            )),
        )
        .await
    }

    async fn handle_client_message(
        &self,
        msg: Message,
        tx: &mpsc::Sender<Message>,
    ) -> WsErrorResult<()> {
        match msg {
            Message::Text(text) => self.handle_command_line(text.as_str(), tx).await,
            Message::Binary(_) => {
                log::debug!("Ignoring binary frame from session {}", self.session_id);
                Ok(())
            }
            Message::Ping(data) => {
                tx.send(Message::Pong(data))
                    .await
                    .map_err(|_| WsError::OutboundClosed {
                        location: ErrorLocation::from(Location::caller()),
                    })
            }
            Message::Pong(_) | Message::Close(_) => Ok(()),
        }
    }

    /// Echo, announce, execute, reply, and broadcast one command line.
    /// Commands are processed in arrival order.
    async fn handle_command_line(&self, raw: &str, tx: &mpsc::Sender<Message>) -> WsErrorResult<()> {
        let line = raw.trim();
        if line.is_empty() {
            return Ok(());
        }

        let parsed = Command::parse(line);
        let command_name = parsed.as_ref().map(Command::name).unwrap_or("invalid");
        let span = create_command_span(&self.session_id, self.role, command_name);

        async {
            log::info!(
                "Session {} (role: {}) sent: {}",
                self.session_id,
                self.role,
                line
            );

            self.send(tx, ChatMessage::command_sent(self.session_id.as_str(), line))
                .await?;

            if is_announced(line) {
                let announcement = ChatMessage::command_received(self.session_id.as_str(), line);
                self.broadcast_to_others(&announcement).await;
            }

            let started = Instant::now();
            let result = match parsed {
                Ok(command) => dispatch(command, self.role, self.commands.clone()).await,
                Err(e) => Err(e),
            };
            self.metrics.command_latency(started.elapsed());
            self.metrics.command_processed(command_name, result.is_ok());

            if let Err(e) = &result {
                log::warn!("Command '{}' from {} failed: {}", line, self.session_id, e);
            }

            self.send(tx, build_envelope(&result)).await?;

            if let Some(outcome) = result.as_ref().ok().and_then(CommandReply::broadcast_text) {
                let update = ChatMessage::system_broadcast(self.session_id.as_str(), outcome);
                self.broadcast_to_others(&update).await;
            }

            Ok::<(), WsError>(())
        }
        .instrument(span)
        .await
    }

    async fn send(&self, tx: &mpsc::Sender<Message>, message: ChatMessage) -> WsErrorResult<()> {
        let frame = message.to_ws_message()?;
        tx.send(frame).await.map_err(|_| WsError::OutboundClosed {
            location: ErrorLocation::from(Location::caller()),
        })
    }

    async fn broadcast_to_others(&self, message: &ChatMessage) {
        match self
            .commands
            .sessions
            .broadcast_except(Some(&self.session_id), message)
            .await
        {
            Ok(recipients) => self
                .metrics
                .broadcast_published(message.kind.as_str(), recipients),
            Err(e) => {
                log::error!("Broadcast from {} failed: {}", self.session_id, e);
                self.metrics.error_occurred("broadcast");
            }
        }
    }
}
