//! Session store (Redis) configuration module

use serde::{Deserialize, Serialize};

use super::env_or;

/// Redis session store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Redis connection URL
    pub url: String,

    /// Connection timeout in seconds
    pub connection_timeout: u64,

    /// Upper bound for a single store operation in milliseconds
    pub response_timeout_ms: u64,

    /// Connection attempts made at startup before giving up
    #[serde(default = "default_connect_retries")]
    pub connect_retries: u32,

    /// Optional prefix prepended to every session key
    #[serde(default)]
    pub key_prefix: Option<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: String::from("redis://localhost:6379"),
            connection_timeout: 5,
            response_timeout_ms: 2000,
            connect_retries: default_connect_retries(),
            key_prefix: None,
        }
    }
}

impl CacheConfig {
    /// Create from environment variables
    ///
    /// `REDIS_URL` wins; a bare `REDIS_ADDRESS` (`host:port`) is accepted too.
    pub fn from_env() -> Self {
        let url = std::env::var("REDIS_URL")
            .or_else(|_| std::env::var("REDIS_ADDRESS").map(|addr| format!("redis://{}", addr)))
            .unwrap_or_else(|_| "redis://localhost:6379".to_string());

        let defaults = Self::default();
        Self {
            url,
            connection_timeout: env_or("REDIS_CONNECT_TIMEOUT", defaults.connection_timeout),
            response_timeout_ms: env_or("REDIS_RESPONSE_TIMEOUT", defaults.response_timeout_ms),
            key_prefix: std::env::var("REDIS_KEY_PREFIX").ok(),
            ..defaults
        }
    }

    /// Create a new cache configuration with URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Set the key prefix
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = Some(prefix.into());
        self
    }
}

fn default_connect_retries() -> u32 {
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redis_address_fallback() {
        temp_env::with_vars(
            [("REDIS_URL", None), ("REDIS_ADDRESS", Some("cache:6380"))],
            || {
                let config = CacheConfig::from_env();
                assert_eq!(config.url, "redis://cache:6380");
                assert_eq!(config.response_timeout_ms, 2000);
            },
        );
    }

    #[test]
    fn test_redis_url_wins() {
        temp_env::with_vars(
            [
                ("REDIS_URL", Some("redis://primary:6379")),
                ("REDIS_ADDRESS", Some("cache:6380")),
            ],
            || assert_eq!(CacheConfig::from_env().url, "redis://primary:6379"),
        );
    }
}
