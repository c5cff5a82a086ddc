//! Request and response bodies for the authentication routes
//!
//! Requests are accepted as JSON or as url-encoded forms.

use serde::{Deserialize, Serialize};
use validator::Validate;

use sg_core::domain::entities::token::TokenPair;
use sg_core::domain::entities::user::{Role, User};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(max = 255))]
    #[serde(default)]
    pub username: String,
    #[validate(length(max = 255))]
    #[serde(default)]
    pub password: String,
}

/// Registration input; empty fields are reported by the service by name
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(max = 255))]
    #[serde(default)]
    pub username: String,
    #[validate(length(max = 255))]
    #[serde(default)]
    pub password: String,
    #[validate(length(max = 32))]
    #[serde(default, alias = "IIN")]
    pub iin: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenewRequest {
    #[serde(default)]
    pub refresh: String,
}

/// Credential pair as returned by login and renewal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access: String,
    pub refresh: String,
    pub expires_in: i64,
}

impl From<TokenPair> for TokenResponse {
    fn from(pair: TokenPair) -> Self {
        Self {
            access: pair.access_token,
            refresh: pair.refresh_token,
            expires_in: pair.access_expires_in,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub id: i64,
    pub message: String,
}

/// Public view of a directory record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub iin: String,
    pub role: Role,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.value(),
            username: user.username,
            iin: user.external_id,
            role: user.role,
        }
    }
}
