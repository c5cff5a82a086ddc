//! Session store trait: the authority on which renewal credential is live.
//!
//! One entry per identity maps to the current renewal credential. Writes
//! overwrite unconditionally, which is how a reissue supersedes (and thereby
//! revokes) the previous renewal credential.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::entities::user::Identity;
use crate::errors::DomainError;

/// Repository trait for session entries
///
/// Implementations must be safe for concurrent `put`/`get` on the same key;
/// last write wins is the only ordering guarantee required.
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use std::time::Duration;
/// use sg_core::domain::entities::user::Identity;
/// use sg_core::errors::DomainError;
/// use sg_core::repositories::SessionStore;
///
/// struct RedisSessionStore {
///     // multiplexed connection
/// }
///
/// #[async_trait]
/// impl SessionStore for RedisSessionStore {
///     async fn put(&self, identity: Identity, renewal: &str, ttl: Duration) -> Result<(), DomainError> {
///         // SET user:{identity} <renewal> EX <ttl>
///         Ok(())
///     }
///
///     async fn get(&self, identity: Identity) -> Result<Option<String>, DomainError> {
///         Ok(None)
///     }
/// }
/// ```
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store `renewal` as the live renewal credential for `identity`
    ///
    /// # Arguments
    /// * `identity` - Owner of the session
    /// * `renewal` - Renewal credential string, stored verbatim
    /// * `ttl` - Entry lifetime; must not be shorter than the credential's own
    ///
    /// # Returns
    /// * `Ok(())` - Entry written, replacing any previous one
    /// * `Err(DomainError::StoreUnavailable)` - The store could not be reached
    async fn put(&self, identity: Identity, renewal: &str, ttl: Duration) -> Result<(), DomainError>;

    /// Fetch the live renewal credential for `identity`
    ///
    /// # Returns
    /// * `Ok(Some(token))` - Live entry
    /// * `Ok(None)` - No entry, or the entry expired
    /// * `Err(DomainError::StoreUnavailable)` - The store could not be reached;
    ///   never reported as `Ok(None)`
    async fn get(&self, identity: Identity) -> Result<Option<String>, DomainError>;
}
