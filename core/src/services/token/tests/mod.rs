//! Tests for the credential services

mod renewal_tests;

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::user::Identity;
use crate::errors::DomainError;
use crate::repositories::{InMemorySessionStore, SessionStore};

use super::{CredentialConfig, CredentialIssuer, CredentialValidator};

pub(super) fn test_config() -> CredentialConfig {
    CredentialConfig::new("access-secret-for-tests", "refresh-secret-for-tests")
        .with_ttls(Duration::from_secs(3600), Duration::from_secs(86400))
}

pub(super) fn issuer_and_validator<S: SessionStore>(
    config: &CredentialConfig,
    store: Arc<S>,
) -> (Arc<CredentialIssuer<S>>, Arc<CredentialValidator<S>>) {
    (
        Arc::new(CredentialIssuer::new(config, store.clone())),
        Arc::new(CredentialValidator::new(config, store)),
    )
}

pub(super) fn memory_store() -> Arc<InMemorySessionStore> {
    Arc::new(InMemorySessionStore::new())
}

/// Store that never answers within any reasonable deadline
pub(super) struct StalledStore;

#[async_trait]
impl SessionStore for StalledStore {
    async fn put(&self, _: Identity, _: &str, _: Duration) -> Result<(), DomainError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(())
    }

    async fn get(&self, _: Identity) -> Result<Option<String>, DomainError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(None)
    }
}
