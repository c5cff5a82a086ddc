//! Authentication service coordinating the directory and credential services

use std::sync::Arc;
use std::time::Duration;

use sg_shared::ClaimsMode;

use crate::domain::entities::token::{ClaimSet, Subject, TokenPair};
use crate::domain::entities::user::{Identity, Role, User};
use crate::errors::{AuthError, DomainError, DomainResult};
use crate::repositories::{SessionStore, UserDirectory};
use crate::services::deadline::{within, Dependency};
use crate::services::token::{CredentialConfig, CredentialIssuer, CredentialValidator, RenewalProtocol};

/// Authentication service
///
/// Owns one issuer, one validator and the renewal protocol, all built from
/// the same validated [`CredentialConfig`].
pub struct AuthService<U: UserDirectory, S: SessionStore> {
    directory: Arc<U>,
    issuer: Arc<CredentialIssuer<S>>,
    validator: Arc<CredentialValidator<S>>,
    renewal: RenewalProtocol<U, S>,
    claims_mode: ClaimsMode,
    directory_timeout: Duration,
}

impl<U: UserDirectory, S: SessionStore> AuthService<U, S> {
    /// Creates a new authentication service
    ///
    /// # Arguments
    ///
    /// * `config` - Credential configuration; validated here
    /// * `directory` - User directory
    /// * `store` - Session store
    ///
    /// # Returns
    ///
    /// The service, or `DomainError::Validation` for an unusable configuration
    pub fn new(config: CredentialConfig, directory: Arc<U>, store: Arc<S>) -> DomainResult<Self> {
        config.validate()?;

        let issuer = Arc::new(CredentialIssuer::new(&config, store.clone()));
        let validator = Arc::new(CredentialValidator::new(&config, store));
        let renewal = RenewalProtocol::new(&config, directory.clone(), validator.clone(), issuer.clone());

        Ok(Self {
            directory,
            issuer,
            validator,
            renewal,
            claims_mode: config.claims_mode,
            directory_timeout: config.directory_timeout,
        })
    }

    /// Validator shared with the request authentication layer
    pub fn validator(&self) -> Arc<CredentialValidator<S>> {
        self.validator.clone()
    }

    /// Authenticate with username and password and issue a credential pair
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - Fresh pair; any previous session is superseded
    /// * `Err(AuthError::InvalidCredentials)` - Unknown user or wrong password
    /// * `Err(DomainError::DirectoryUnavailable | StoreUnavailable)` - Infrastructure failure
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<TokenPair> {
        let identity = self
            .call_directory(self.directory.authenticate(username, password))
            .await
            .map_err(|e| {
                if matches!(e, DomainError::Auth(AuthError::InvalidCredentials)) {
                    tracing::info!("Login rejected");
                }
                e
            })?;

        let subject = match self.claims_mode {
            ClaimsMode::IdentityOnly => Subject::identity_only(identity),
            ClaimsMode::ProfileSnapshot => {
                // Authenticated a moment ago; a missing record means it was just removed
                let user = self
                    .find_user(identity)
                    .await?
                    .ok_or(DomainError::Auth(AuthError::InvalidCredentials))?;
                Subject::from_user(&user, self.claims_mode)
            }
        };

        let pair = self.issuer.issue(&subject).await?;
        tracing::info!(identity = %identity, "User logged in");
        Ok(pair)
    }

    /// Register a new user
    ///
    /// # Returns
    ///
    /// * `Ok(Identity)` - Identity assigned by the directory
    /// * `Err(AuthError::MissingField)` - Empty username, password or external id
    /// * `Err(AuthError::AlreadyExists)` - Username or external id taken
    pub async fn register(&self, username: &str, password: &str, external_id: &str) -> DomainResult<Identity> {
        for (field, value) in [("username", username), ("password", password), ("iin", external_id)] {
            if value.trim().is_empty() {
                return Err(AuthError::MissingField {
                    field: field.to_string(),
                }
                .into());
            }
        }

        let identity = self
            .call_directory(self.directory.create_if_unique(username, password, external_id))
            .await?;

        tracing::info!(identity = %identity, "User registered");
        Ok(identity)
    }

    /// Exchange a renewal credential for a fresh pair
    pub async fn renew(&self, refresh_token: &str) -> DomainResult<TokenPair> {
        self.renewal.renew(refresh_token).await
    }

    /// Current directory record of the authenticated caller
    ///
    /// `DomainError::NotFound` when the record no longer exists.
    pub async fn profile(&self, identity: Identity) -> DomainResult<User> {
        self.find_user(identity).await?.ok_or_else(|| DomainError::NotFound {
            resource: format!("user {}", identity),
        })
    }

    /// Look up any user on behalf of an admin caller
    ///
    /// # Returns
    ///
    /// * `Ok(User)` - The requested record
    /// * `Err(AuthError::InsufficientPermissions)` - Caller is not an admin
    /// * `Err(DomainError::NotFound)` - No such user
    pub async fn user_by_id(&self, requester: &ClaimSet, identity: Identity) -> DomainResult<User> {
        self.authorize_admin(requester).await?;
        self.profile(identity).await
    }

    /// Require the admin role
    ///
    /// In profile mode the role comes from the credential's snapshot; in
    /// identity mode it is looked up.
    pub async fn authorize_admin(&self, requester: &ClaimSet) -> DomainResult<()> {
        let role = match self.claims_mode {
            ClaimsMode::ProfileSnapshot => requester.role(),
            ClaimsMode::IdentityOnly => self.find_user(requester.identity()).await?.map(|u| u.role),
        };

        if role.map_or(false, |r| r == Role::Admin) {
            Ok(())
        } else {
            tracing::warn!(identity = %requester.identity(), "Admin access denied");
            Err(AuthError::InsufficientPermissions.into())
        }
    }

    async fn find_user(&self, identity: Identity) -> DomainResult<Option<User>> {
        self.call_directory(self.directory.get_by_identity(identity)).await
    }

    async fn call_directory<T>(
        &self,
        operation: impl std::future::Future<Output = DomainResult<T>>,
    ) -> DomainResult<T> {
        within(self.directory_timeout, Dependency::UserDirectory, operation).await
    }
}
