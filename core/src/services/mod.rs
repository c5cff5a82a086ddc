//! Business services containing the credential lifecycle and its use cases.

pub mod auth;
mod deadline;
pub mod token;

// Re-export commonly used types
pub use auth::AuthService;
pub use token::{
    CredentialConfig, CredentialIssuer, CredentialKeys, CredentialValidator, RenewalProtocol,
    Signer, SigningKey,
};
