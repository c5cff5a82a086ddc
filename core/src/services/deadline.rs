//! Bounded waits on external collaborators

use std::future::Future;
use std::time::Duration;

use crate::errors::DomainError;

/// External dependency a deadline applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Dependency {
    SessionStore,
    UserDirectory,
}

impl Dependency {
    fn unavailable(self, message: String) -> DomainError {
        match self {
            Dependency::SessionStore => DomainError::StoreUnavailable { message },
            Dependency::UserDirectory => DomainError::DirectoryUnavailable { message },
        }
    }
}

/// Run `operation`, failing with the dependency's unavailable kind once
/// `limit` elapses. No retry.
pub(crate) async fn within<T, F>(limit: Duration, dependency: Dependency, operation: F) -> Result<T, DomainError>
where
    F: Future<Output = Result<T, DomainError>>,
{
    match tokio::time::timeout(limit, operation).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(?dependency, timeout_ms = limit.as_millis() as u64, "Dependency call timed out");
            Err(dependency.unavailable(format!("no response within {}ms", limit.as_millis())))
        }
    }
}
