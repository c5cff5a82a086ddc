//! Redis client
//!
//! Connection establishment is retried with exponential backoff because it
//! happens once at startup. Individual commands are not retried: callers get
//! the failure immediately and decide for themselves.

use redis::{aio::MultiplexedConnection, AsyncCommands, Client};
use sg_shared::CacheConfig;
use std::time::Duration;
use tokio::time::{sleep, timeout};
use tracing::{debug, error, info, warn};

use crate::InfrastructureError;

/// Base delay between connection attempts
const CONNECT_RETRY_DELAY_MS: u64 = 100;

/// Redis client over a single multiplexed connection
///
/// Cloning is cheap; clones share the connection.
#[derive(Clone)]
pub struct RedisClient {
    /// Redis multiplexed connection for async operations
    connection: MultiplexedConnection,
}

impl RedisClient {
    /// Connect to Redis
    ///
    /// # Arguments
    /// * `config` - Cache configuration settings
    ///
    /// # Returns
    /// * `Result<Self, InfrastructureError>` - Connected client or the last
    ///   connection error once `config.connect_retries` attempts are used up
    pub async fn new(config: &CacheConfig) -> Result<Self, InfrastructureError> {
        info!("Creating Redis client for {}", mask_url(&config.url));

        let client = Client::open(config.url.as_str()).map_err(|e| {
            error!("Failed to parse Redis URL: {}", e);
            InfrastructureError::Config(format!("Invalid Redis URL: {}", e))
        })?;

        let connection = Self::connect_with_retry(
            &client,
            config.connect_retries.max(1),
            Duration::from_secs(config.connection_timeout),
        )
        .await?;

        info!("Redis client created successfully");
        Ok(Self { connection })
    }

    async fn connect_with_retry(
        client: &Client,
        max_attempts: u32,
        attempt_timeout: Duration,
    ) -> Result<MultiplexedConnection, InfrastructureError> {
        let mut attempts = 0;
        let mut delay = CONNECT_RETRY_DELAY_MS;

        loop {
            attempts += 1;
            debug!("Attempting to connect to Redis (attempt {})", attempts);

            let outcome = match timeout(attempt_timeout, client.get_multiplexed_async_connection()).await {
                Ok(result) => result.map_err(InfrastructureError::Cache),
                Err(_) => Err(InfrastructureError::Timeout(format!(
                    "Redis connection not established within {:?}",
                    attempt_timeout
                ))),
            };

            match outcome {
                Ok(connection) => {
                    info!("Successfully connected to Redis");
                    return Ok(connection);
                }
                Err(e) if attempts < max_attempts => {
                    warn!(
                        "Failed to connect to Redis (attempt {}/{}): {}. Retrying in {}ms...",
                        attempts, max_attempts, e, delay
                    );
                    sleep(Duration::from_millis(delay)).await;
                    // Exponential backoff with cap at 5 seconds
                    delay = (delay * 2).min(5000);
                }
                Err(e) => {
                    error!("Failed to connect to Redis after {} attempts: {}", attempts, e);
                    return Err(e);
                }
            }
        }
    }

    /// Set a value with expiration time, replacing any previous value
    ///
    /// # Arguments
    /// * `key` - Cache key
    /// * `value` - Value to store
    /// * `expiry_seconds` - Time to live in seconds
    pub async fn set_with_expiry(&self, key: &str, value: &str, expiry_seconds: u64) -> Result<(), InfrastructureError> {
        debug!("Setting key '{}' with expiry {}s", key, expiry_seconds);
        let mut conn = self.connection.clone();
        conn.set_ex::<_, _, ()>(key, value, expiry_seconds).await?;
        Ok(())
    }

    /// Get a value
    ///
    /// # Returns
    /// * `Ok(Some(value))` - Key present
    /// * `Ok(None)` - Key absent or expired
    pub async fn get(&self, key: &str) -> Result<Option<String>, InfrastructureError> {
        debug!("Getting key '{}'", key);
        let mut conn = self.connection.clone();
        Ok(conn.get(key).await?)
    }

    /// Remaining time to live of a key in seconds, `None` if absent or persistent
    pub async fn ttl(&self, key: &str) -> Result<Option<i64>, InfrastructureError> {
        let mut conn = self.connection.clone();
        let ttl: i64 = conn.ttl(key).await?;
        Ok((ttl >= 0).then_some(ttl))
    }

    /// Check that Redis answers PING
    pub async fn health_check(&self) -> Result<bool, InfrastructureError> {
        let mut conn = self.connection.clone();
        let reply: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(reply == "PONG")
    }
}

/// Hide credentials embedded in a connection URL
pub(crate) fn mask_url(url: &str) -> String {
    if let Some(at_pos) = url.rfind('@') {
        if let Some(proto_end) = url.find("://") {
            let proto = &url[..proto_end + 3];
            let host_part = &url[at_pos..];
            return format!("{}****{}", proto, host_part);
        }
    }
    url.to_string()
}
