//! Authentication service module
//!
//! Use cases built on the user directory and the credential services:
//! - Login and registration
//! - Credential renewal
//! - Profile and admin lookups for authenticated callers

mod service;

#[cfg(test)]
mod tests;

pub use service::AuthService;
