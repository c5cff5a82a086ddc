//! Compact JWS signing and verification

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::fmt;
use std::time::Duration;

use crate::domain::entities::token::{ClaimSet, Subject};
use crate::errors::TokenError;

use super::config::CredentialConfig;

/// Symmetric key material for one credential kind
#[derive(Clone)]
pub struct SigningKey {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningKey {
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SigningKey([redacted])")
    }
}

/// The two keys in use: one per credential kind
#[derive(Debug, Clone)]
pub struct CredentialKeys {
    pub access: SigningKey,
    pub refresh: SigningKey,
}

impl CredentialKeys {
    pub fn from_config(config: &CredentialConfig) -> Self {
        Self {
            access: SigningKey::from_secret(config.access_secret.as_bytes()),
            refresh: SigningKey::from_secret(config.refresh_secret.as_bytes()),
        }
    }
}

/// Signs claim sets and verifies presented credentials
///
/// Pure: no I/O, only the wall clock. Verification accepts exactly one
/// algorithm, so unsigned or differently-signed envelopes are rejected
/// before their payload is trusted.
#[derive(Clone)]
pub struct Signer {
    header: Header,
    validation: Validation,
}

impl Signer {
    /// Creates a signer for `algorithm`
    pub fn new(algorithm: Algorithm) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_nbf = false;
        validation.validate_aud = false;

        Self {
            header: Header::new(algorithm),
            validation,
        }
    }

    /// Algorithm written into and required from every header
    pub fn algorithm(&self) -> Algorithm {
        self.header.alg
    }

    /// Signs a fresh claim set for `subject` valid for `ttl` from now
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The compact credential
    /// * `Err(TokenError::IssuanceFailed)` - Key and algorithm do not fit
    pub fn sign(&self, subject: &Subject, key: &SigningKey, ttl: Duration) -> Result<String, TokenError> {
        let ttl_seconds = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        let claims = ClaimSet::new(subject, Utc::now().timestamp(), ttl_seconds);
        self.sign_claims(&claims, key)
    }

    /// Signs an already built claim set as is
    pub fn sign_claims(&self, claims: &ClaimSet, key: &SigningKey) -> Result<String, TokenError> {
        encode(&self.header, claims, &key.encoding).map_err(|e| TokenError::IssuanceFailed {
            reason: e.to_string(),
        })
    }

    /// Verifies `token` against `key` and returns its claims
    ///
    /// # Returns
    ///
    /// * `Ok(ClaimSet)` - Signature valid and `now < exp`
    /// * `Err(TokenError::Malformed)` - Not a well-formed credential
    /// * `Err(TokenError::BadSignature)` - Wrong key or algorithm
    /// * `Err(TokenError::Expired)` - `now >= exp`
    pub fn verify(&self, token: &str, key: &SigningKey) -> Result<ClaimSet, TokenError> {
        let data = decode::<ClaimSet>(token, &key.decoding, &self.validation).map_err(|e| {
            let err = map_jwt_error(e.kind());
            tracing::debug!(reason = %e, kind = err.code(), "Credential rejected");
            err
        })?;

        // The library only rejects once `exp` has passed; the boundary
        // second is expired too.
        if data.claims.is_expired_at(Utc::now().timestamp()) {
            return Err(TokenError::Expired);
        }

        Ok(data.claims)
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer").field("algorithm", &self.header.alg).finish()
    }
}

fn map_jwt_error(kind: &ErrorKind) -> TokenError {
    match kind {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => TokenError::BadSignature,
        _ => TokenError::Malformed,
    }
}
