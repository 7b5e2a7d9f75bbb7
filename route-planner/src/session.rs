//! Per-user conversation state machine.
//!
//! "No session" is the absence of an entry in the [`SessionStore`]; a stored session is either
//! waiting for the origin or holding the origin while waiting for the destination. A session is
//! created by /start, advanced by text messages and removed on completion or cancellation.
//!
//! The store itself does no per-user locking: callers must serialize events of one user (the
//! transport layer runs one queue per user).

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    AwaitingOrigin,
    AwaitingDestination { origin: String },
}

/// Result of feeding one text message into a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    /// Keep the session in this new state.
    Next(SessionState),
    /// Both endpoints collected; the session ends once the route request finishes.
    Complete { origin: String, destination: String },
}

impl SessionState {
    /// Consumes the state and the user's text.
    pub fn accept(self, text: &str) -> Advance {
        match self {
            SessionState::AwaitingOrigin => Advance::Next(SessionState::AwaitingDestination {
                origin: text.to_string(),
            }),
            SessionState::AwaitingDestination { origin } => Advance::Complete {
                origin,
                destination: text.to_string(),
            },
        }
    }
}

/// Keyed storage of sessions, at most one per user.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, user_id: i64) -> Result<Option<SessionState>, anyhow::Error>;
    /// Creates or overwrites the user's session.
    async fn put(&self, user_id: i64, state: SessionState) -> Result<(), anyhow::Error>;
    /// Deletes the user's session, returning it if there was one.
    async fn remove(&self, user_id: i64) -> Result<Option<SessionState>, anyhow::Error>;
}

/// Process-local session store; contents are lost on restart.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<i64, SessionState>>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of users with an active session.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, user_id: i64) -> Result<Option<SessionState>, anyhow::Error> {
        Ok(self.sessions.read().await.get(&user_id).cloned())
    }

    async fn put(&self, user_id: i64, state: SessionState) -> Result<(), anyhow::Error> {
        self.sessions.write().await.insert(user_id, state);
        Ok(())
    }

    async fn remove(&self, user_id: i64) -> Result<Option<SessionState>, anyhow::Error> {
        Ok(self.sessions.write().await.remove(&user_id))
    }
}
