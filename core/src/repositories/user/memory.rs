//! In-process user directory for tests and local runs

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::user::{Identity, Role, User};
use crate::errors::{AuthError, DomainError};

use super::trait_::UserDirectory;

#[derive(Debug, Clone)]
struct Record {
    user: User,
    password: String,
}

/// User directory backed by a vector; identities are assigned from 1
///
/// Passwords are kept as given. Use the MySQL directory for anything real.
#[derive(Debug, Clone)]
pub struct InMemoryUserDirectory {
    records: Arc<RwLock<Vec<Record>>>,
    next_id: Arc<AtomicI64>,
    available: Arc<AtomicBool>,
}

impl InMemoryUserDirectory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(Vec::new())),
            next_id: Arc::new(AtomicI64::new(1)),
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Toggle simulated reachability
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Change the role of an existing user
    pub async fn set_role(&self, identity: Identity, role: Role) -> bool {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|r| r.user.id == identity) {
            Some(record) => {
                record.user.role = role;
                true
            }
            None => false,
        }
    }

    /// Remove a user
    pub async fn remove(&self, identity: Identity) -> bool {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.user.id != identity);
        records.len() != before
    }

    fn ensure_available(&self) -> Result<(), DomainError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(DomainError::DirectoryUnavailable {
                message: "in-memory directory marked unavailable".to_string(),
            })
        }
    }
}

impl Default for InMemoryUserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn authenticate(&self, username: &str, password: &str) -> Result<Identity, DomainError> {
        self.ensure_available()?;
        let records = self.records.read().await;
        records
            .iter()
            .find(|r| r.user.username == username && r.password == password)
            .map(|r| r.user.id)
            .ok_or_else(|| AuthError::InvalidCredentials.into())
    }

    async fn get_by_identity(&self, identity: Identity) -> Result<Option<User>, DomainError> {
        self.ensure_available()?;
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.user.id == identity).map(|r| r.user.clone()))
    }

    async fn create_if_unique(
        &self,
        username: &str,
        password: &str,
        external_id: &str,
    ) -> Result<Identity, DomainError> {
        self.ensure_available()?;
        let mut records = self.records.write().await;

        if records
            .iter()
            .any(|r| r.user.username == username || r.user.external_id == external_id)
        {
            return Err(AuthError::AlreadyExists.into());
        }

        // Ids are never reused, even after removal
        let identity = Identity(self.next_id.fetch_add(1, Ordering::SeqCst));
        records.push(Record {
            user: User::new(identity, username, external_id),
            password: password.to_string(),
        });
        Ok(identity)
    }
}
