//! Summary cache seam.
//!
//! The orchestrator treats every cache failure as soft: a read error is a
//! miss, a write error is logged and dropped. `CacheError` therefore never
//! crosses the orchestrator boundary.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::time::Instant;

use crate::core::models::SummarizeResult;

#[derive(Debug, Error)]
#[error("cache unavailable: {0}")]
pub struct CacheError(pub String);

/// Minimal get/set interface over the external summary store. Tests
/// substitute an in-memory fake; production binds the real store.
#[async_trait]
pub trait SummaryCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<SummarizeResult>, CacheError>;

    async fn set(
        &self,
        key: &str,
        value: &SummarizeResult,
        ttl: Duration,
    ) -> Result<(), CacheError>;
}

struct StoredEntry {
    value: SummarizeResult,
    expires_at: Instant,
}

/// TTL-honoring in-memory cache. Used by tests and as the default binding
/// when no external store is configured.
#[derive(Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, StoredEntry>>,
}

impl InMemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of entries currently held, expired or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().map(|entries| entries.len()).unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SummaryCache for InMemoryCache {
    async fn get(&self, key: &str) -> Result<Option<SummarizeResult>, CacheError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| CacheError(format!("cache lock poisoned: {e}")))?;

        match entries.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => Ok(Some(entry.value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn set(
        &self,
        key: &str,
        value: &SummarizeResult,
        ttl: Duration,
    ) -> Result<(), CacheError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|e| CacheError(format!("cache lock poisoned: {e}")))?;

        // Opportunistic purge so entries for keys that are never read
        // again do not accumulate for the life of the process.
        let now = Instant::now();
        entries.retain(|_, entry| entry.expires_at > now);

        entries.insert(
            key.to_string(),
            StoredEntry {
                value: value.clone(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }
}
