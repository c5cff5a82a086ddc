//! Redis implementation of the session store
//!
//! Layout: one string key `user:{identity}` per identity holding the live
//! renewal credential, with the renewal lifetime as the key's TTL.

use async_trait::async_trait;
use std::time::Duration;

use sg_core::domain::entities::user::Identity;
use sg_core::errors::DomainError;
use sg_core::repositories::SessionStore;

use super::redis_client::RedisClient;
use crate::InfrastructureError;

/// Session store backed by Redis
#[derive(Clone)]
pub struct RedisSessionStore {
    client: RedisClient,
    key_prefix: String,
}

impl RedisSessionStore {
    pub fn new(client: RedisClient) -> Self {
        Self {
            client,
            key_prefix: String::new(),
        }
    }

    /// Namespace every key, e.g. to share one Redis between deployments
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    pub fn key_for(&self, identity: Identity) -> String {
        format!("{}user:{}", self.key_prefix, identity)
    }
}

fn unavailable(operation: &str, identity: Identity, error: InfrastructureError) -> DomainError {
    tracing::error!(%identity, error = %error, "Session store {} failed", operation);
    DomainError::StoreUnavailable {
        message: format!("session {} failed", operation),
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn put(&self, identity: Identity, renewal: &str, ttl: Duration) -> Result<(), DomainError> {
        // SET EX rejects a zero expiry
        let seconds = ttl.as_secs().max(1);
        self.client
            .set_with_expiry(&self.key_for(identity), renewal, seconds)
            .await
            .map_err(|e| unavailable("write", identity, e))
    }

    async fn get(&self, identity: Identity) -> Result<Option<String>, DomainError> {
        self.client
            .get(&self.key_for(identity))
            .await
            .map_err(|e| unavailable("read", identity, e))
    }
}
