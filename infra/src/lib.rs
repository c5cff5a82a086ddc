//! # Infrastructure Layer
//!
//! Concrete implementations of the core's repository traits:
//!
//! - **Cache**: Redis client and the Redis-backed session store
//! - **Database**: MySQL connection pool and the MySQL user directory
//! - **Health**: connectivity probes for the health endpoint

pub mod cache;
pub mod database;
pub mod health;

pub use cache::{RedisClient, RedisSessionStore};
pub use database::{DatabasePool, MySqlUserDirectory};
pub use health::HealthProbe;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// Database migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Operation did not finish in time
    #[error("Timed out: {0}")]
    Timeout(String),
}
