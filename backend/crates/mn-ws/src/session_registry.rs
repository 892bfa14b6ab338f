use crate::{ChatMessage, Result as WsErrorResult, SessionCounts, SessionId, SessionInfo, WsError};

use std::collections::HashMap;
use std::panic::Location;
use std::sync::Arc;

use axum::extract::ws::Message;
use error_location::ErrorLocation;
use mn_core::Role;
use tokio::sync::{RwLock, mpsc};

struct SessionEntry {
    info: SessionInfo,
    sender: mpsc::Sender<Message>,
}

struct Inner {
    sessions: HashMap<SessionId, SessionEntry>,
}

/// Tracks live ChatOps sessions and fans messages out to them.
pub struct SessionRegistry {
    inner: Arc<RwLock<Inner>>,
    max_sessions: usize,
}

impl SessionRegistry {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                sessions: HashMap::new(),
            })),
            max_sessions,
        }
    }

    /// Register a new session; `sender` feeds its writer task.
    #[track_caller]
    pub async fn register(
        &self,
        role: Role,
        sender: mpsc::Sender<Message>,
    ) -> WsErrorResult<SessionId> {
        let location = ErrorLocation::from(Location::caller());
        let mut inner = self.inner.write().await;

        let current = inner.sessions.len();
        if current >= self.max_sessions {
            return Err(WsError::ConnectionLimitExceeded {
                current,
                max: self.max_sessions,
                location,
            });
        }

        let mut session_id = SessionId::new();
        while inner.sessions.contains_key(&session_id) {
            session_id = SessionId::new();
        }

        let info = SessionInfo::new(session_id.clone(), role);
        inner
            .sessions
            .insert(session_id.clone(), SessionEntry { info, sender });

        log::debug!(
            "Registered session {} as {} (total: {})",
            session_id,
            role,
            inner.sessions.len()
        );

        Ok(session_id)
    }

    pub async fn unregister(&self, session_id: &SessionId) -> Option<SessionInfo> {
        let mut inner = self.inner.write().await;
        let removed = inner.sessions.remove(session_id).map(|entry| entry.info);

        if removed.is_some() {
            log::debug!(
                "Unregistered session {} (remaining: {})",
                session_id,
                inner.sessions.len()
            );
        }

        removed
    }

    pub async fn get(&self, session_id: &SessionId) -> Option<SessionInfo> {
        let inner = self.inner.read().await;
        inner.sessions.get(session_id).map(|entry| entry.info.clone())
    }

    pub async fn total_count(&self) -> usize {
        self.inner.read().await.sessions.len()
    }

    pub async fn counts(&self) -> SessionCounts {
        let inner = self.inner.read().await;
        let managers = inner
            .sessions
            .values()
            .filter(|entry| entry.info.role.is_manager())
            .count();
        SessionCounts {
            total: inner.sessions.len(),
            managers,
            clients: inner.sessions.len() - managers,
        }
    }

    /// Best-effort delivery to every session except `excluded`.
    ///
    /// A session whose queue is full or closed misses the message; it is never
    /// awaited. Returns the number of sessions that accepted it.
    pub async fn broadcast_except(
        &self,
        excluded: Option<&SessionId>,
        message: &ChatMessage,
    ) -> WsErrorResult<usize> {
        let frame = message.to_ws_message()?;
        let inner = self.inner.read().await;

        let mut delivered = 0;
        for (session_id, entry) in inner.sessions.iter() {
            if Some(session_id) == excluded {
                continue;
            }
            match entry.sender.try_send(frame.clone()) {
                Ok(()) => delivered += 1,
                Err(e) => {
                    log::warn!("Dropping {} for session {}: {}", message.kind, session_id, e);
                }
            }
        }

        Ok(delivered)
    }
}

impl Clone for SessionRegistry {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            max_sessions: self.max_sessions,
        }
    }
}
