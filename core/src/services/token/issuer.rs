//! Credential pair issuance

use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::token::{Subject, TokenPair};
use crate::errors::DomainError;
use crate::repositories::SessionStore;
use crate::services::deadline::{within, Dependency};

use super::config::CredentialConfig;
use super::signer::{CredentialKeys, Signer};

/// Mints access/renewal pairs and records the renewal credential as the
/// identity's only live session
///
/// This is the only writer of session entries.
pub struct CredentialIssuer<S: SessionStore> {
    store: Arc<S>,
    signer: Signer,
    keys: CredentialKeys,
    access_ttl: Duration,
    refresh_ttl: Duration,
    store_timeout: Duration,
}

impl<S: SessionStore> CredentialIssuer<S> {
    /// Creates a new issuer
    ///
    /// # Arguments
    ///
    /// * `config` - Validated credential configuration
    /// * `store` - Session store receiving renewal credentials
    pub fn new(config: &CredentialConfig, store: Arc<S>) -> Self {
        Self {
            store,
            signer: Signer::new(config.algorithm),
            keys: CredentialKeys::from_config(config),
            access_ttl: config.access_ttl,
            refresh_ttl: config.refresh_ttl,
            store_timeout: config.store_timeout,
        }
    }

    /// Issues a credential pair for `subject`
    ///
    /// The renewal credential overwrites whatever the store held for the
    /// identity. Nothing is returned unless that write succeeded.
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Both credentials, renewal credential persisted
    /// * `Err(DomainError::Token(TokenError::IssuanceFailed))` - Signing failed
    /// * `Err(DomainError::StoreUnavailable)` - Persisting failed or timed out
    pub async fn issue(&self, subject: &Subject) -> Result<TokenPair, DomainError> {
        let access_token = self.signer.sign(subject, &self.keys.access, self.access_ttl)?;
        let refresh_token = self.signer.sign(subject, &self.keys.refresh, self.refresh_ttl)?;

        within(
            self.store_timeout,
            Dependency::SessionStore,
            self.store.put(subject.identity, &refresh_token, self.refresh_ttl),
        )
        .await
        .map_err(|e| {
            tracing::error!(identity = %subject.identity, error = %e, "Failed to persist renewal credential");
            e
        })?;

        tracing::debug!(identity = %subject.identity, "Issued credential pair");

        Ok(TokenPair {
            access_token,
            refresh_token,
            access_expires_in: self.access_ttl.as_secs() as i64,
            refresh_expires_in: self.refresh_ttl.as_secs() as i64,
        })
    }
}
