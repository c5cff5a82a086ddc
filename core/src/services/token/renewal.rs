//! Renewal: exchange a live renewal credential for a fresh pair

use std::sync::Arc;
use std::time::Duration;

use sg_shared::ClaimsMode;

use crate::domain::entities::token::{ClaimSet, Subject, TokenPair};
use crate::errors::{DomainError, TokenError};
use crate::repositories::{SessionStore, UserDirectory};
use crate::services::deadline::{within, Dependency};

use super::config::CredentialConfig;
use super::issuer::CredentialIssuer;
use super::validator::CredentialValidator;

/// Consumes a renewal credential and supersedes it with a new pair
///
/// Concurrent renewals with the same credential are not serialized: each
/// caller that passes validation gets a pair, and the last write to the
/// store decides which renewal credential stays live.
pub struct RenewalProtocol<U: UserDirectory, S: SessionStore> {
    directory: Arc<U>,
    validator: Arc<CredentialValidator<S>>,
    issuer: Arc<CredentialIssuer<S>>,
    claims_mode: ClaimsMode,
    directory_timeout: Duration,
}

impl<U: UserDirectory, S: SessionStore> RenewalProtocol<U, S> {
    pub fn new(
        config: &CredentialConfig,
        directory: Arc<U>,
        validator: Arc<CredentialValidator<S>>,
        issuer: Arc<CredentialIssuer<S>>,
    ) -> Self {
        Self {
            directory,
            validator,
            issuer,
            claims_mode: config.claims_mode,
            directory_timeout: config.directory_timeout,
        }
    }

    /// Validates `presented` and issues its replacement
    ///
    /// Validation failures propagate unchanged. Once the new renewal
    /// credential is stored, `presented` no longer validates.
    pub async fn renew(&self, presented: &str) -> Result<TokenPair, DomainError> {
        let claims = self.validator.validate_renewal(presented).await?;
        let subject = self.rederive(&claims).await?;
        let pair = self.issuer.issue(&subject).await?;

        tracing::info!(identity = %subject.identity, "Renewed credential pair");
        Ok(pair)
    }

    async fn rederive(&self, claims: &ClaimSet) -> Result<Subject, DomainError> {
        match self.claims_mode {
            ClaimsMode::IdentityOnly => Ok(Subject::identity_only(claims.identity())),
            ClaimsMode::ProfileSnapshot => {
                let user = within(
                    self.directory_timeout,
                    Dependency::UserDirectory,
                    self.directory.get_by_identity(claims.identity()),
                )
                .await?
                .ok_or_else(|| {
                    tracing::warn!(identity = %claims.identity(), "Renewal for a user no longer in the directory");
                    DomainError::from(TokenError::SessionNotFound)
                })?;
                Ok(Subject::from_user(&user, self.claims_mode))
            }
        }
    }
}
