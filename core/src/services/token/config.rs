//! Configuration for the credential services

use jsonwebtoken::Algorithm;
use sg_shared::{CacheConfig, ClaimsMode, DatabaseConfig, JwtConfig};
use std::fmt;
use std::time::Duration;

use crate::errors::DomainError;

/// Configuration for signing, lifetimes and collaborator deadlines
///
/// Built once at startup and passed to each service; `validate` must succeed
/// before any credential is minted.
#[derive(Clone)]
pub struct CredentialConfig {
    /// Secret for access credentials
    pub access_secret: String,
    /// Secret for renewal credentials
    pub refresh_secret: String,
    /// Access credential lifetime
    pub access_ttl: Duration,
    /// Renewal credential lifetime, also the session entry lifetime
    pub refresh_ttl: Duration,
    /// HMAC algorithm used for both credential kinds
    pub algorithm: Algorithm,
    /// Claims carried by issued credentials
    pub claims_mode: ClaimsMode,
    /// Deadline for a single session store call
    pub store_timeout: Duration,
    /// Deadline for a single user directory call
    pub directory_timeout: Duration,
}

impl Default for CredentialConfig {
    fn default() -> Self {
        let jwt = JwtConfig::default();
        Self {
            access_secret: jwt.access_secret,
            refresh_secret: jwt.refresh_secret,
            access_ttl: Duration::from_secs(3600),
            refresh_ttl: Duration::from_secs(86400),
            algorithm: Algorithm::HS256,
            claims_mode: ClaimsMode::default(),
            store_timeout: Duration::from_secs(2),
            directory_timeout: Duration::from_secs(5),
        }
    }
}

impl fmt::Debug for CredentialConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialConfig")
            .field("access_secret", &"[redacted]")
            .field("refresh_secret", &"[redacted]")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .field("algorithm", &self.algorithm)
            .field("claims_mode", &self.claims_mode)
            .field("store_timeout", &self.store_timeout)
            .field("directory_timeout", &self.directory_timeout)
            .finish()
    }
}

impl CredentialConfig {
    /// Create a configuration with both secrets and default lifetimes
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            ..Default::default()
        }
    }

    /// Build from the loaded application settings and validate
    pub fn from_settings(
        jwt: &JwtConfig,
        cache: &CacheConfig,
        database: &DatabaseConfig,
    ) -> Result<Self, DomainError> {
        let algorithm: Algorithm = jwt.algorithm.parse().map_err(|_| DomainError::Validation {
            message: format!("Unsupported JWT algorithm: {}", jwt.algorithm),
        })?;

        let config = Self {
            access_secret: jwt.access_secret.clone(),
            refresh_secret: jwt.refresh_secret.clone(),
            access_ttl: positive_seconds("access token TTL", jwt.access_token_expiry)?,
            refresh_ttl: positive_seconds("refresh token TTL", jwt.refresh_token_expiry)?,
            algorithm,
            claims_mode: jwt.claims_mode,
            store_timeout: Duration::from_millis(cache.response_timeout_ms),
            directory_timeout: Duration::from_secs(database.connect_timeout),
        };
        config.validate()?;
        Ok(config)
    }

    /// Set both lifetimes
    pub fn with_ttls(mut self, access: Duration, refresh: Duration) -> Self {
        self.access_ttl = access;
        self.refresh_ttl = refresh;
        self
    }

    /// Set the claims mode
    pub fn with_claims_mode(mut self, mode: ClaimsMode) -> Self {
        self.claims_mode = mode;
        self
    }

    /// Set the session store deadline
    pub fn with_store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }

    /// Set the user directory deadline
    pub fn with_directory_timeout(mut self, timeout: Duration) -> Self {
        self.directory_timeout = timeout;
        self
    }

    /// Reject configurations that would let the two credential kinds be
    /// confused or that cannot produce usable credentials
    pub fn validate(&self) -> Result<(), DomainError> {
        let invalid = |message: &str| {
            Err(DomainError::Validation {
                message: message.to_string(),
            })
        };

        if self.access_secret.is_empty() || self.refresh_secret.is_empty() {
            return invalid("Signing secrets must not be empty");
        }
        if self.access_secret == self.refresh_secret {
            return invalid("Access and refresh secrets must differ");
        }
        if self.access_ttl.as_secs() == 0 || self.refresh_ttl.as_secs() == 0 {
            return invalid("Credential lifetimes must be at least one second");
        }
        if self.refresh_ttl < self.access_ttl {
            return invalid("Refresh token TTL must not be shorter than the access token TTL");
        }
        if !is_hmac(self.algorithm) {
            return invalid("Only HMAC algorithms (HS256, HS384, HS512) are supported");
        }
        if self.store_timeout.is_zero() || self.directory_timeout.is_zero() {
            return invalid("Dependency timeouts must be positive");
        }
        Ok(())
    }
}

fn positive_seconds(name: &str, seconds: i64) -> Result<Duration, DomainError> {
    u64::try_from(seconds)
        .ok()
        .filter(|s| *s > 0)
        .map(Duration::from_secs)
        .ok_or_else(|| DomainError::Validation {
            message: format!("{} must be positive, got {}", name, seconds),
        })
}

pub(crate) fn is_hmac(algorithm: Algorithm) -> bool {
    matches!(algorithm, Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512)
}
