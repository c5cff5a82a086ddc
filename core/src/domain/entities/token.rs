//! Credential entities for JWT-based authentication.
//!
//! A credential is a compact JWS whose payload is a [`ClaimSet`]. Access and
//! renewal credentials share this layout and differ only in the key that
//! signs them and the lifetime they carry.

use serde::{Deserialize, Serialize};
use sg_shared::ClaimsMode;
use uuid::Uuid;

use super::user::{Identity, Role, User};

/// Directory profile captured at issuance time
///
/// Never re-validated while the credential is in use; it is refreshed only
/// when the credential pair is renewed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    pub username: String,
    #[serde(rename = "iin")]
    pub external_id: String,
    pub role: Role,
}

/// What a credential is minted for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub identity: Identity,
    pub profile: Option<ProfileSnapshot>,
}

impl Subject {
    /// Subject carrying only the identity
    pub fn identity_only(identity: Identity) -> Self {
        Self {
            identity,
            profile: None,
        }
    }

    /// Subject built from a directory record according to the claims mode
    pub fn from_user(user: &User, mode: ClaimsMode) -> Self {
        match mode {
            ClaimsMode::ProfileSnapshot => Self {
                identity: user.id,
                profile: Some(user.profile()),
            },
            ClaimsMode::IdentityOnly => Self::identity_only(user.id),
        }
    }
}

/// Claims structure for the JWT payload
///
/// Deserialization is the typing boundary: a payload with a missing or
/// wrong-typed required field is rejected as a whole.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSet {
    /// Subject (identity), encoded as a string per JWT convention
    #[serde(with = "identity_as_string")]
    pub sub: Identity,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// JWT ID, unique per credential
    pub jti: String,

    /// Profile snapshot, present only in profile claims mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileSnapshot>,
}

impl ClaimSet {
    /// Creates claims for `subject` valid for `ttl_seconds` from `issued_at`
    pub fn new(subject: &Subject, issued_at: i64, ttl_seconds: i64) -> Self {
        Self {
            sub: subject.identity,
            iat: issued_at,
            exp: issued_at.saturating_add(ttl_seconds),
            jti: Uuid::new_v4().to_string(),
            profile: subject.profile.clone(),
        }
    }

    /// Identity the credential was minted for
    pub fn identity(&self) -> Identity {
        self.sub
    }

    /// Role from the embedded snapshot, if any
    pub fn role(&self) -> Option<Role> {
        self.profile.as_ref().map(|p| p.role)
    }

    /// Expired at `now` with no grace window
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }

    /// The subject these claims were minted for
    pub fn subject(&self) -> Subject {
        Subject {
            identity: self.sub,
            profile: self.profile.clone(),
        }
    }
}

/// Access/renewal credential pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Access credential
    pub access_token: String,

    /// Renewal credential
    pub refresh_token: String,

    /// Access credential lifetime in seconds
    pub access_expires_in: i64,

    /// Renewal credential lifetime in seconds
    pub refresh_expires_in: i64,
}

mod identity_as_string {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::Identity;

    pub fn serialize<S: Serializer>(identity: &Identity, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(identity)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Identity, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}
