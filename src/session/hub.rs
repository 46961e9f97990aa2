//! Session Hub
//!
//! Tracks every open dashboard session and the selection it owns.
//! Sessions never share state; the dataset behind them is read-only.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use super::messages::ServerMessage;
use crate::filter::{SelectionEvent, SelectionState};

/// Unique identifier for a dashboard session
pub type SessionId = String;

/// Registry of open sessions
pub struct SessionHub {
    /// Active sessions: SessionId → SessionHandle
    sessions: Arc<RwLock<HashMap<SessionId, SessionHandle>>>,
    config: HubConfig,
}

/// Configuration for the session hub
#[derive(Debug, Clone)]
pub struct HubConfig {
    /// Maximum number of concurrent sessions
    pub max_sessions: usize,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self { max_sessions: 1000 }
    }
}

/// State of one session
pub struct SessionHandle {
    /// Channel sender for this session's socket
    pub sender: mpsc::UnboundedSender<ServerMessage>,
    /// Current dropdown and slider values
    pub selection: SelectionState,
    /// Number of selection updates applied so far
    pub sequence: u64,
    pub opened_at: DateTime<Utc>,
}

impl SessionHub {
    pub fn new(config: HubConfig) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            config,
        }
    }

    /// Open a session starting from `selection`
    ///
    /// Fails once the session limit has been reached.
    pub async fn register(
        &self,
        sender: mpsc::UnboundedSender<ServerMessage>,
        selection: SelectionState,
    ) -> Result<SessionId, HubError> {
        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.config.max_sessions {
            return Err(HubError::TooManySessions(self.config.max_sessions));
        }

        let id = Uuid::new_v4().to_string();
        sessions.insert(
            id.clone(),
            SessionHandle {
                sender,
                selection,
                sequence: 0,
                opened_at: Utc::now(),
            },
        );

        tracing::info!(session_id = %id, "Dashboard session opened");
        Ok(id)
    }

    /// Close a session and drop its selection
    pub async fn unregister(&self, id: &str) {
        if let Some(handle) = self.sessions.write().await.remove(id) {
            let open_for = Utc::now() - handle.opened_at;
            tracing::info!(
                session_id = %id,
                updates = handle.sequence,
                open_secs = open_for.num_seconds(),
                "Dashboard session closed"
            );
        }
    }

    /// Apply a widget change to a session
    ///
    /// Returns the new selection and its sequence number.
    pub async fn apply(
        &self,
        id: &str,
        event: SelectionEvent,
    ) -> Result<(SelectionState, u64), HubError> {
        let mut sessions = self.sessions.write().await;
        let handle = sessions.get_mut(id).ok_or(HubError::SessionNotFound)?;

        handle.selection.apply(event);
        handle.sequence += 1;

        tracing::debug!(
            session_id = %id,
            site = %handle.selection.site,
            low = handle.selection.payload.low(),
            high = handle.selection.payload.high(),
            sequence = handle.sequence,
            "Selection changed"
        );

        Ok((handle.selection.clone(), handle.sequence))
    }

    /// Current selection of a session
    pub async fn selection(&self, id: &str) -> Result<(SelectionState, u64), HubError> {
        let sessions = self.sessions.read().await;
        let handle = sessions.get(id).ok_or(HubError::SessionNotFound)?;
        Ok((handle.selection.clone(), handle.sequence))
    }

    /// Send a message to one session
    pub async fn send_to(&self, id: &str, message: ServerMessage) -> Result<(), HubError> {
        let sessions = self.sessions.read().await;
        let handle = sessions.get(id).ok_or(HubError::SessionNotFound)?;

        handle
            .sender
            .send(message)
            .map_err(|_| HubError::SendFailed)
    }

    /// Number of open sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// True once `register` would refuse a new session
    pub async fn is_full(&self) -> bool {
        self.session_count().await >= self.config.max_sessions
    }
}

/// Errors that can occur in the session hub
#[derive(Debug, Error)]
pub enum HubError {
    #[error("Too many sessions (limit: {0})")]
    TooManySessions(usize),

    #[error("Session not found")]
    SessionNotFound,

    #[error("Failed to send message")]
    SendFailed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{PayloadRange, SiteFilter};

    fn initial() -> SelectionState {
        SelectionState::new(SiteFilter::All, PayloadRange::new(0.0, 9600.0).unwrap())
    }

    #[test]
    fn test_default_config() {
        let config = HubConfig::default();
        assert_eq!(config.max_sessions, 1000);
    }

    #[tokio::test]
    async fn test_register_unregister() {
        let hub = SessionHub::new(HubConfig::default());
        let (tx, _rx) = mpsc::unbounded_channel();

        let id = hub.register(tx, initial()).await.unwrap();
        assert!(!id.is_empty());
        assert_eq!(hub.session_count().await, 1);

        hub.unregister(&id).await;
        assert_eq!(hub.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_session_limit() {
        let hub = SessionHub::new(HubConfig { max_sessions: 2 });

        let (tx1, _) = mpsc::unbounded_channel();
        let (tx2, _) = mpsc::unbounded_channel();
        let (tx3, _) = mpsc::unbounded_channel();

        let id1 = hub.register(tx1, initial()).await.unwrap();
        let id2 = hub.register(tx2, initial()).await.unwrap();
        assert!(hub.is_full().await);
        let result = hub.register(tx3, initial()).await;

        assert!(matches!(result, Err(HubError::TooManySessions(2))));

        hub.unregister(&id1).await;
        assert!(!hub.is_full().await);
        hub.unregister(&id2).await;
    }

    #[tokio::test]
    async fn test_sessions_have_independent_selections() {
        let hub = SessionHub::new(HubConfig::default());
        let (tx1, _rx1) = mpsc::unbounded_channel();
        let (tx2, _rx2) = mpsc::unbounded_channel();

        let id1 = hub.register(tx1, initial()).await.unwrap();
        let id2 = hub.register(tx2, initial()).await.unwrap();

        let (selection, sequence) = hub
            .apply(&id1, SelectionEvent::SiteChanged(SiteFilter::from("A")))
            .await
            .unwrap();
        assert_eq!(selection.site, SiteFilter::from("A"));
        assert_eq!(sequence, 1);

        let (other, other_sequence) = hub.selection(&id2).await.unwrap();
        assert_eq!(other.site, SiteFilter::All);
        assert_eq!(other_sequence, 0);
    }

    #[tokio::test]
    async fn test_apply_unknown_session() {
        let hub = SessionHub::new(HubConfig::default());
        let result = hub
            .apply("missing", SelectionEvent::SiteChanged(SiteFilter::All))
            .await;
        assert!(matches!(result, Err(HubError::SessionNotFound)));
    }

    #[tokio::test]
    async fn test_send_to() {
        let hub = SessionHub::new(HubConfig::default());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let id = hub.register(tx, initial()).await.unwrap();

        hub.send_to(&id, ServerMessage::Pong).await.unwrap();
        assert!(matches!(rx.try_recv(), Ok(ServerMessage::Pong)));
    }
}
