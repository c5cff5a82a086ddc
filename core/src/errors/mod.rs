//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

// Re-export all error types
pub use types::{AuthError, TokenError};

use thiserror::Error;

/// Core domain errors (general purpose)
///
/// Credential and authentication failures are bridged in from their specific
/// enums; the remaining variants describe infrastructure and input problems.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Session store unavailable: {message}")]
    StoreUnavailable { message: String },

    #[error("User directory unavailable: {message}")]
    DirectoryUnavailable { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    /// True for failures caused by the infrastructure rather than the caller
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            DomainError::StoreUnavailable { .. } | DomainError::DirectoryUnavailable { .. }
        )
    }

    /// True when a presented credential was rejected for any reason
    pub fn is_credential_rejection(&self) -> bool {
        matches!(self, DomainError::Token(err) if err.is_rejection())
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
