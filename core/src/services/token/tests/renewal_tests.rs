//! Renewal protocol

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Barrier;

use sg_shared::ClaimsMode;

use crate::domain::entities::token::Subject;
use crate::domain::entities::user::{Identity, Role};
use crate::errors::{DomainError, TokenError};
use crate::repositories::{InMemorySessionStore, InMemoryUserDirectory, SessionStore, UserDirectory};
use crate::services::token::{
    CredentialConfig, CredentialIssuer, CredentialValidator, RenewalProtocol,
};

use super::{issuer_and_validator, memory_store, test_config};

struct Fixture {
    directory: Arc<InMemoryUserDirectory>,
    store: Arc<InMemorySessionStore>,
    protocol: RenewalProtocol<InMemoryUserDirectory, InMemorySessionStore>,
    issuer: Arc<CredentialIssuer<InMemorySessionStore>>,
    validator: Arc<CredentialValidator<InMemorySessionStore>>,
}

fn fixture(config: CredentialConfig) -> Fixture {
    let directory = Arc::new(InMemoryUserDirectory::new());
    let store = memory_store();
    let (issuer, validator) = issuer_and_validator(&config, store.clone());
    let protocol = RenewalProtocol::new(&config, directory.clone(), validator.clone(), issuer.clone());
    Fixture {
        directory,
        store,
        protocol,
        issuer,
        validator,
    }
}

#[tokio::test]
async fn test_renewal_supersedes() {
    let f = fixture(test_config());
    let id = f.directory.create_if_unique("alice", "pw", "IIN123").await.unwrap();
    let user = f.directory.get_by_identity(id).await.unwrap().unwrap();
    let first = f.issuer.issue(&Subject::from_user(&user, ClaimsMode::ProfileSnapshot)).await.unwrap();

    let second = f.protocol.renew(&first.refresh_token).await.unwrap();
    assert_ne!(first.refresh_token, second.refresh_token);
    assert_ne!(first.access_token, second.access_token);

    assert_eq!(
        f.protocol.renew(&first.refresh_token).await,
        Err(DomainError::Token(TokenError::SessionNotFound))
    );
    assert!(f.protocol.renew(&second.refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_profile_mode_resnapshots_directory() {
    let f = fixture(test_config());
    let id = f.directory.create_if_unique("alice", "pw", "IIN123").await.unwrap();
    let user = f.directory.get_by_identity(id).await.unwrap().unwrap();
    let first = f.issuer.issue(&Subject::from_user(&user, ClaimsMode::ProfileSnapshot)).await.unwrap();

    f.directory.set_role(id, Role::Admin).await;
    let stale = f.validator.validate_access(&first.access_token).unwrap();
    assert_eq!(stale.role(), Some(Role::User));

    let renewed = f.protocol.renew(&first.refresh_token).await.unwrap();
    let fresh = f.validator.validate_access(&renewed.access_token).unwrap();
    assert_eq!(fresh.role(), Some(Role::Admin));
}

#[tokio::test]
async fn test_profile_mode_removed_user_must_log_in() {
    let f = fixture(test_config());
    let id = f.directory.create_if_unique("alice", "pw", "IIN123").await.unwrap();
    let user = f.directory.get_by_identity(id).await.unwrap().unwrap();
    let pair = f.issuer.issue(&Subject::from_user(&user, ClaimsMode::ProfileSnapshot)).await.unwrap();

    f.directory.remove(id).await;
    assert_eq!(
        f.protocol.renew(&pair.refresh_token).await,
        Err(DomainError::Token(TokenError::SessionNotFound))
    );
}

#[tokio::test]
async fn test_profile_mode_directory_outage() {
    let f = fixture(test_config());
    let id = f.directory.create_if_unique("alice", "pw", "IIN123").await.unwrap();
    let user = f.directory.get_by_identity(id).await.unwrap().unwrap();
    let pair = f.issuer.issue(&Subject::from_user(&user, ClaimsMode::ProfileSnapshot)).await.unwrap();

    f.directory.set_available(false);
    let result = f.protocol.renew(&pair.refresh_token).await;
    assert!(matches!(result, Err(DomainError::DirectoryUnavailable { .. })));

    // The presented credential was not consumed
    f.directory.set_available(true);
    assert!(f.protocol.renew(&pair.refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_identity_mode_skips_directory() {
    let f = fixture(test_config().with_claims_mode(ClaimsMode::IdentityOnly));
    let pair = f.issuer.issue(&Subject::identity_only(Identity(5))).await.unwrap();

    f.directory.set_available(false);
    let renewed = f.protocol.renew(&pair.refresh_token).await.unwrap();
    let claims = f.validator.validate_access(&renewed.access_token).unwrap();
    assert_eq!(claims.identity(), Identity(5));
    assert!(claims.profile.is_none());
}

#[tokio::test]
async fn test_store_outage_during_renewal() {
    let f = fixture(test_config().with_claims_mode(ClaimsMode::IdentityOnly));
    let pair = f.issuer.issue(&Subject::identity_only(Identity(5))).await.unwrap();

    f.store.set_available(false);
    let result = f.protocol.renew(&pair.refresh_token).await;
    assert!(matches!(result, Err(DomainError::StoreUnavailable { .. })));
}

/// Reads, then holds every `get` until two callers have read, so both
/// renewals see the original value before either writes
struct GatedStore {
    inner: InMemorySessionStore,
    barrier: Barrier,
}

#[async_trait]
impl SessionStore for GatedStore {
    async fn put(&self, identity: Identity, renewal: &str, ttl: Duration) -> Result<(), DomainError> {
        self.inner.put(identity, renewal, ttl).await
    }

    async fn get(&self, identity: Identity) -> Result<Option<String>, DomainError> {
        let value = self.inner.get(identity).await;
        self.barrier.wait().await;
        value
    }
}

#[tokio::test]
async fn test_concurrent_renewals_last_write_wins() {
    let config = test_config().with_claims_mode(ClaimsMode::IdentityOnly);
    let shared = InMemorySessionStore::new();
    let gated = Arc::new(GatedStore {
        inner: shared.clone(),
        barrier: Barrier::new(2),
    });
    let (issuer, validator) = issuer_and_validator(&config, gated);
    let protocol = RenewalProtocol::new(
        &config,
        Arc::new(InMemoryUserDirectory::new()),
        validator,
        issuer.clone(),
    );
    let pair = issuer.issue(&Subject::identity_only(Identity(5))).await.unwrap();

    let (a, b) = tokio::join!(
        protocol.renew(&pair.refresh_token),
        protocol.renew(&pair.refresh_token)
    );
    let (a, b) = (a.unwrap(), b.unwrap());
    assert_ne!(a.refresh_token, b.refresh_token);

    // Both callers got a pair; only the last persisted one stays live
    let checker = CredentialValidator::new(&config, Arc::new(shared));
    let a_live = checker.validate_renewal(&a.refresh_token).await.is_ok();
    let b_live = checker.validate_renewal(&b.refresh_token).await.is_ok();
    assert!(a_live ^ b_live);
    assert_eq!(
        checker.validate_renewal(&pair.refresh_token).await,
        Err(DomainError::Token(TokenError::SessionNotFound))
    );
}
