//! Credential validation

use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::token::ClaimSet;
use crate::errors::{DomainError, TokenError};
use crate::repositories::SessionStore;
use crate::services::deadline::{within, Dependency};

use super::config::CredentialConfig;
use super::signer::{CredentialKeys, Signer};

/// Authenticates presented credentials
pub struct CredentialValidator<S: SessionStore> {
    store: Arc<S>,
    signer: Signer,
    keys: CredentialKeys,
    store_timeout: Duration,
}

impl<S: SessionStore> CredentialValidator<S> {
    pub fn new(config: &CredentialConfig, store: Arc<S>) -> Self {
        Self {
            store,
            signer: Signer::new(config.algorithm),
            keys: CredentialKeys::from_config(config),
            store_timeout: config.store_timeout,
        }
    }

    /// Verifies an access credential. Stateless: the store is never consulted.
    pub fn validate_access(&self, token: &str) -> Result<ClaimSet, TokenError> {
        self.signer.verify(token, &self.keys.access)
    }

    /// Verifies a renewal credential and requires it to be the identity's
    /// live session
    ///
    /// Superseded, expired and never-existing sessions all yield
    /// `SessionNotFound`. A store failure yields `StoreUnavailable` and never
    /// success.
    pub async fn validate_renewal(&self, token: &str) -> Result<ClaimSet, DomainError> {
        let claims = self.signer.verify(token, &self.keys.refresh)?;
        let identity = claims.identity();

        let current = within(self.store_timeout, Dependency::SessionStore, self.store.get(identity)).await?;

        match current {
            Some(live) if live.as_bytes() == token.as_bytes() => Ok(claims),
            _ => {
                tracing::info!(identity = %identity, "Renewal credential is not the live session");
                Err(TokenError::SessionNotFound.into())
            }
        }
    }
}
