//! Type definitions shared by the HTTP layer
//!
//! - `response` - Error bodies and health checks

pub mod response;

pub use response::{ErrorResponse, HealthResponse, HealthStatus, ServiceHealth};
