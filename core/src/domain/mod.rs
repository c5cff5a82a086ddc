//! Domain layer containing the credential and user entities.

pub mod entities;

// Re-export commonly used domain types
pub use entities::*;
