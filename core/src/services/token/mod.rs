//! Credential services
//!
//! This module handles the credential lifecycle:
//! - Signing and verifying compact JWS credentials
//! - Issuing an access/renewal pair and persisting the renewal credential
//! - Validating access credentials (stateless) and renewal credentials
//!   (against the session store)
//! - Renewal: consuming a live renewal credential and superseding it

mod config;
mod issuer;
mod renewal;
mod signer;
mod validator;

#[cfg(test)]
mod tests;

pub use config::CredentialConfig;
pub use issuer::CredentialIssuer;
pub use renewal::RenewalProtocol;
pub use signer::{CredentialKeys, Signer, SigningKey};
pub use validator::CredentialValidator;
