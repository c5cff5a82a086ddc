//! In-process session store for tests and local runs

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::domain::entities::user::Identity;
use crate::errors::DomainError;

use super::trait_::SessionStore;

#[derive(Debug, Clone)]
struct Entry {
    token: String,
    expires_at: Instant,
}

/// Session store backed by a map, with per-entry expiry
///
/// `set_available(false)` simulates an outage: every call then fails with
/// `StoreUnavailable`.
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    entries: Arc<RwLock<HashMap<Identity, Entry>>>,
    available: Arc<AtomicBool>,
}

impl InMemorySessionStore {
    /// Create an empty, reachable store
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Toggle simulated reachability
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of stored entries, expired ones included
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn ensure_available(&self) -> Result<(), DomainError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(DomainError::StoreUnavailable {
                message: "in-memory store marked unavailable".to_string(),
            })
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn put(&self, identity: Identity, renewal: &str, ttl: Duration) -> Result<(), DomainError> {
        self.ensure_available()?;
        let entry = Entry {
            token: renewal.to_string(),
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().await.insert(identity, entry);
        Ok(())
    }

    async fn get(&self, identity: Identity) -> Result<Option<String>, DomainError> {
        self.ensure_available()?;
        let entries = self.entries.read().await;
        Ok(entries
            .get(&identity)
            .filter(|entry| Instant::now() < entry.expires_at)
            .map(|entry| entry.token.clone()))
    }
}
