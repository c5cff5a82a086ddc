//! Shared configuration and response types for the SessionGate server
//!
//! This crate provides functionality used across all server crates:
//! - Configuration types loaded from the environment
//! - Error response structures returned by the HTTP layer

pub mod config;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, CacheConfig, ClaimsMode, CorsConfig, DatabaseConfig, Environment,
    JwtConfig, LogFormat, LoggingConfig, ServerConfig,
};
pub use types::{ErrorResponse, HealthResponse, HealthStatus, ServiceHealth};
