//! Error types for authentication and credential handling

use thiserror::Error;

/// Authentication-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Username or external id was already taken")]
    AlreadyExists,

    #[error("Admin access required")]
    InsufficientPermissions,

    #[error("Got empty input: {field}")]
    MissingField { field: String },
}

/// Credential-related errors
///
/// `Malformed`, `BadSignature`, `Expired` and `SessionNotFound` are the
/// rejection kinds; callers must treat them uniformly towards clients.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Malformed credential")]
    Malformed,

    #[error("Credential signature verification failed")]
    BadSignature,

    #[error("Credential expired")]
    Expired,

    #[error("No live session for this credential")]
    SessionNotFound,

    #[error("Credential issuance failed: {reason}")]
    IssuanceFailed { reason: String },
}

impl TokenError {
    /// Whether this error rejects a presented credential (as opposed to a
    /// failure to mint one)
    pub fn is_rejection(&self) -> bool {
        !matches!(self, TokenError::IssuanceFailed { .. })
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            TokenError::Malformed => "MALFORMED",
            TokenError::BadSignature => "BAD_SIGNATURE",
            TokenError::Expired => "EXPIRED",
            TokenError::SessionNotFound => "SESSION_NOT_FOUND",
            TokenError::IssuanceFailed { .. } => "ISSUANCE_FAILED",
        }
    }
}

impl AuthError {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials => "INVALID_CREDENTIALS",
            AuthError::AlreadyExists => "ALREADY_EXISTS",
            AuthError::InsufficientPermissions => "INSUFFICIENT_PERMISSIONS",
            AuthError::MissingField { .. } => "MISSING_FIELD",
        }
    }
}
