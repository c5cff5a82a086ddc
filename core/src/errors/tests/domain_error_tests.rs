//! Unit tests for error classification

use crate::errors::{AuthError, DomainError, TokenError};

#[test]
fn test_token_error_conversion() {
    let err: DomainError = TokenError::Expired.into();
    assert_eq!(err, DomainError::Token(TokenError::Expired));
    assert!(err.is_credential_rejection());
    assert!(!err.is_unavailable());
}

#[test]
fn test_issuance_failure_is_not_a_rejection() {
    let err: DomainError = TokenError::IssuanceFailed {
        reason: "bad key".to_string(),
    }
    .into();
    assert!(!err.is_credential_rejection());
}

#[test]
fn test_unavailable_kinds() {
    assert!(DomainError::StoreUnavailable { message: "down".into() }.is_unavailable());
    assert!(DomainError::DirectoryUnavailable { message: "down".into() }.is_unavailable());
    assert!(!DomainError::from(AuthError::InvalidCredentials).is_unavailable());
}

#[test]
fn test_error_messages() {
    assert_eq!(
        AuthError::MissingField { field: "username".into() }.to_string(),
        "Got empty input: username"
    );
    assert_eq!(AuthError::InsufficientPermissions.to_string(), "Admin access required");
    assert_eq!(
        DomainError::from(TokenError::SessionNotFound).to_string(),
        "No live session for this credential"
    );
}

#[test]
fn test_error_codes() {
    assert_eq!(TokenError::BadSignature.code(), "BAD_SIGNATURE");
    assert_eq!(AuthError::AlreadyExists.code(), "ALREADY_EXISTS");
}
