//! History Ledger: per-user, append-only list of completed route requests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::model::HistoryEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    Cleared { removed: usize },
    NothingToClear,
}

#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn record(&self, user_id: i64, entry: HistoryEntry) -> Result<(), anyhow::Error>;
    /// Entries in insertion order; empty for unknown users.
    async fn list(&self, user_id: i64) -> Result<Vec<HistoryEntry>, anyhow::Error>;
    async fn clear(&self, user_id: i64) -> Result<ClearOutcome, anyhow::Error>;
}

/// Unbounded in-memory ledger; entries live until cleared or the process exits.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHistoryStore {
    entries: Arc<RwLock<HashMap<i64, Vec<HistoryEntry>>>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the user has a ledger key at all.
    pub async fn contains_user(&self, user_id: i64) -> bool {
        self.entries.read().await.contains_key(&user_id)
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn record(&self, user_id: i64, entry: HistoryEntry) -> Result<(), anyhow::Error> {
        self.entries
            .write()
            .await
            .entry(user_id)
            .or_default()
            .push(entry);
        Ok(())
    }

    async fn list(&self, user_id: i64) -> Result<Vec<HistoryEntry>, anyhow::Error> {
        Ok(self
            .entries
            .read()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn clear(&self, user_id: i64) -> Result<ClearOutcome, anyhow::Error> {
        let removed = self.entries.write().await.remove(&user_id);
        Ok(match removed {
            Some(list) if !list.is_empty() => ClearOutcome::Cleared {
                removed: list.len(),
            },
            _ => ClearOutcome::NothingToClear,
        })
    }
}
