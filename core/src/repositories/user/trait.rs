//! User directory trait defining the interface to user records.
//!
//! The directory owns registration and password storage; the credential
//! services only ever see identities and profiles.

use async_trait::async_trait;

use crate::domain::entities::user::{Identity, User};
use crate::errors::DomainError;

/// Repository trait for the user directory
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Check a username/password pair
    ///
    /// # Returns
    /// * `Ok(Identity)` - Credentials match
    /// * `Err(DomainError::Auth(AuthError::InvalidCredentials))` - Unknown user
    ///   or wrong password, indistinguishably
    /// * `Err(DomainError::DirectoryUnavailable)` - Backend unreachable
    async fn authenticate(&self, username: &str, password: &str) -> Result<Identity, DomainError>;

    /// Find a user by identity
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No such user
    /// * `Err(DomainError::DirectoryUnavailable)` - Backend unreachable
    async fn get_by_identity(&self, identity: Identity) -> Result<Option<User>, DomainError>;

    /// Create a user unless the username or external id is taken
    ///
    /// # Arguments
    /// * `username` - Unique login name
    /// * `password` - Plain password; storage policy belongs to the implementation
    /// * `external_id` - Unique external identifier
    ///
    /// # Returns
    /// * `Ok(Identity)` - Newly assigned identity
    /// * `Err(DomainError::Auth(AuthError::AlreadyExists))` - Collision
    /// * `Err(DomainError::DirectoryUnavailable)` - Backend unreachable
    async fn create_if_unique(
        &self,
        username: &str,
        password: &str,
        external_id: &str,
    ) -> Result<Identity, DomainError>;
}
