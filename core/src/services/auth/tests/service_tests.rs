//! Unit tests for the authentication service

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use sg_shared::ClaimsMode;

use crate::domain::entities::user::{Identity, Role, User};
use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::{InMemorySessionStore, InMemoryUserDirectory, UserDirectory};
use crate::services::auth::AuthService;
use crate::services::token::CredentialConfig;

type Service = AuthService<InMemoryUserDirectory, InMemorySessionStore>;

fn config() -> CredentialConfig {
    CredentialConfig::new("auth-test-access", "auth-test-refresh")
}

fn service_with(config: CredentialConfig) -> (Service, Arc<InMemoryUserDirectory>, Arc<InMemorySessionStore>) {
    let directory = Arc::new(InMemoryUserDirectory::new());
    let store = Arc::new(InMemorySessionStore::new());
    let service = AuthService::new(config, directory.clone(), store.clone()).unwrap();
    (service, directory, store)
}

#[tokio::test]
async fn test_end_to_end_scenario() {
    let (service, _, _) = service_with(config());

    let id = service.register("alice", "pw", "IIN123").await.unwrap();
    assert_eq!(id, Identity(1));

    let first = service.login("alice", "pw").await.unwrap();
    let claims = service.validator().validate_access(&first.access_token).unwrap();
    assert_eq!(claims.identity(), Identity(1));

    let second = service.renew(&first.refresh_token).await.unwrap();
    assert_ne!(first.refresh_token, second.refresh_token);

    assert_eq!(
        service.renew(&first.refresh_token).await,
        Err(DomainError::Token(TokenError::SessionNotFound))
    );

    assert_eq!(
        service.register("alice", "pw", "IIN999").await,
        Err(DomainError::Auth(AuthError::AlreadyExists))
    );
}

#[tokio::test]
async fn test_login_rejects_bad_password() {
    let (service, _, store) = service_with(config());
    service.register("alice", "pw", "IIN123").await.unwrap();

    assert_eq!(
        service.login("alice", "nope").await,
        Err(DomainError::Auth(AuthError::InvalidCredentials))
    );
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_login_supersedes_previous_session() {
    let (service, _, _) = service_with(config());
    service.register("alice", "pw", "IIN123").await.unwrap();

    let first = service.login("alice", "pw").await.unwrap();
    let second = service.login("alice", "pw").await.unwrap();

    assert_eq!(
        service.renew(&first.refresh_token).await,
        Err(DomainError::Token(TokenError::SessionNotFound))
    );
    assert!(service.renew(&second.refresh_token).await.is_ok());
}

#[tokio::test]
async fn test_login_fails_when_store_down() {
    let (service, _, store) = service_with(config());
    service.register("alice", "pw", "IIN123").await.unwrap();
    store.set_available(false);

    let result = service.login("alice", "pw").await;
    assert!(matches!(result, Err(DomainError::StoreUnavailable { .. })));
}

#[tokio::test]
async fn test_login_embeds_profile_snapshot() {
    let (service, _, _) = service_with(config());
    service.register("alice", "pw", "IIN123").await.unwrap();

    let pair = service.login("alice", "pw").await.unwrap();
    let claims = service.validator().validate_access(&pair.access_token).unwrap();
    let profile = claims.profile.expect("profile mode");
    assert_eq!(profile.username, "alice");
    assert_eq!(profile.external_id, "IIN123");
}

#[tokio::test]
async fn test_login_identity_mode() {
    let (service, _, _) = service_with(config().with_claims_mode(ClaimsMode::IdentityOnly));
    service.register("alice", "pw", "IIN123").await.unwrap();

    let pair = service.login("alice", "pw").await.unwrap();
    let claims = service.validator().validate_access(&pair.access_token).unwrap();
    assert!(claims.profile.is_none());
}

#[tokio::test]
async fn test_register_requires_all_fields() {
    let (service, _, _) = service_with(config());

    for (username, password, iin, field) in [
        ("", "pw", "IIN1", "username"),
        ("alice", " ", "IIN1", "password"),
        ("alice", "pw", "", "iin"),
    ] {
        assert_eq!(
            service.register(username, password, iin).await,
            Err(DomainError::Auth(AuthError::MissingField {
                field: field.to_string()
            }))
        );
    }
}

#[tokio::test]
async fn test_register_duplicate_external_id() {
    let (service, _, _) = service_with(config());
    service.register("alice", "pw", "IIN123").await.unwrap();

    assert_eq!(
        service.register("bob", "pw", "IIN123").await,
        Err(DomainError::Auth(AuthError::AlreadyExists))
    );
}

#[tokio::test]
async fn test_profile_lookup() {
    let (service, directory, _) = service_with(config());
    let id = service.register("alice", "pw", "IIN123").await.unwrap();

    let user = service.profile(id).await.unwrap();
    assert_eq!(user, User::new(id, "alice", "IIN123"));

    directory.remove(id).await;
    assert!(matches!(service.profile(id).await, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_admin_lookup_uses_snapshot_role() {
    let (service, directory, _) = service_with(config());
    let admin = service.register("root", "pw", "IIN0").await.unwrap();
    let alice = service.register("alice", "pw", "IIN123").await.unwrap();
    directory.set_role(admin, Role::Admin).await;

    let admin_claims = service
        .validator()
        .validate_access(&service.login("root", "pw").await.unwrap().access_token)
        .unwrap();
    let alice_claims = service
        .validator()
        .validate_access(&service.login("alice", "pw").await.unwrap().access_token)
        .unwrap();

    assert_eq!(service.user_by_id(&admin_claims, alice).await.unwrap().username, "alice");
    assert_eq!(
        service.user_by_id(&alice_claims, admin).await,
        Err(DomainError::Auth(AuthError::InsufficientPermissions))
    );
    assert!(matches!(
        service.user_by_id(&admin_claims, Identity(404)).await,
        Err(DomainError::NotFound { .. })
    ));

    // Demotion takes effect only after renewal in profile mode
    directory.set_role(admin, Role::User).await;
    assert!(service.user_by_id(&admin_claims, alice).await.is_ok());
}

#[tokio::test]
async fn test_admin_lookup_identity_mode_consults_directory() {
    let (service, directory, _) = service_with(config().with_claims_mode(ClaimsMode::IdentityOnly));
    let admin = service.register("root", "pw", "IIN0").await.unwrap();
    let alice = service.register("alice", "pw", "IIN123").await.unwrap();

    let claims = service
        .validator()
        .validate_access(&service.login("root", "pw").await.unwrap().access_token)
        .unwrap();
    assert_eq!(
        service.user_by_id(&claims, alice).await,
        Err(DomainError::Auth(AuthError::InsufficientPermissions))
    );

    directory.set_role(admin, Role::Admin).await;
    assert!(service.user_by_id(&claims, alice).await.is_ok());
}

#[tokio::test]
async fn test_rejects_invalid_config() {
    let directory = Arc::new(InMemoryUserDirectory::new());
    let store = Arc::new(InMemorySessionStore::new());
    let result = AuthService::new(CredentialConfig::new("same", "same"), directory, store);
    assert!(matches!(result, Err(DomainError::Validation { .. })));
}

/// Directory that never answers
struct StalledDirectory;

#[async_trait]
impl UserDirectory for StalledDirectory {
    async fn authenticate(&self, _: &str, _: &str) -> Result<Identity, DomainError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(Identity(1))
    }

    async fn get_by_identity(&self, _: Identity) -> Result<Option<User>, DomainError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(None)
    }

    async fn create_if_unique(&self, _: &str, _: &str, _: &str) -> Result<Identity, DomainError> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        Ok(Identity(1))
    }
}

#[tokio::test(start_paused = true)]
async fn test_directory_deadline() {
    let service = AuthService::new(
        config().with_directory_timeout(Duration::from_millis(300)),
        Arc::new(StalledDirectory),
        Arc::new(InMemorySessionStore::new()),
    )
    .unwrap();

    assert!(matches!(
        service.login("alice", "pw").await,
        Err(DomainError::DirectoryUnavailable { .. })
    ));
    assert!(matches!(
        service.register("alice", "pw", "IIN1").await,
        Err(DomainError::DirectoryUnavailable { .. })
    ));
}
