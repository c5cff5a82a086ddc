//! # SessionGate Core
//!
//! Credential lifecycle domain layer for the SessionGate backend.
//! This crate contains the domain entities, the credential services
//! (signing, issuance, validation and renewal), the repository interfaces
//! for the session store and the user directory, and the error types that
//! every other crate maps onto its own surface.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
