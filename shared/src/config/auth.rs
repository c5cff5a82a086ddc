//! Credential signing configuration

use serde::{Deserialize, Serialize};

use super::env_or;

const DEFAULT_ACCESS_SECRET: &str = "development-access-secret-change-me";
const DEFAULT_REFRESH_SECRET: &str = "development-refresh-secret-change-me";

/// What a credential's claim set carries besides the identity
///
/// A deployment picks exactly one mode; credentials minted under one mode are
/// never interpreted under the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimsMode {
    /// Embed a snapshot of the directory profile (username, external id, role)
    #[default]
    ProfileSnapshot,
    /// Embed only the identity
    IdentityOnly,
}

impl std::str::FromStr for ClaimsMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "profile" | "profile_snapshot" | "snapshot" => Ok(ClaimsMode::ProfileSnapshot),
            "identity" | "identity_only" => Ok(ClaimsMode::IdentityOnly),
            _ => Err(format!("Invalid claims mode: {}", s)),
        }
    }
}

/// JWT signing configuration for access and renewal credentials
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret used to sign access credentials
    pub access_secret: String,

    /// Secret used to sign renewal credentials; must differ from `access_secret`
    pub refresh_secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,

    /// Algorithm for JWT signing (default: HS256)
    #[serde(default = "default_algorithm")]
    pub algorithm: String,

    /// Claims carried by issued credentials
    #[serde(default)]
    pub claims_mode: ClaimsMode,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            access_secret: String::from(DEFAULT_ACCESS_SECRET),
            refresh_secret: String::from(DEFAULT_REFRESH_SECRET),
            access_token_expiry: 3600,    // 1 hour
            refresh_token_expiry: 86400,  // 1 day
            algorithm: default_algorithm(),
            claims_mode: ClaimsMode::default(),
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with both secrets
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: i64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in hours
    pub fn with_refresh_expiry_hours(mut self, hours: i64) -> Self {
        self.refresh_token_expiry = hours * 3600;
        self
    }

    /// Set the claims mode
    pub fn with_claims_mode(mut self, mode: ClaimsMode) -> Self {
        self.claims_mode = mode;
        self
    }

    /// Check if either secret is still the built-in development value
    pub fn is_using_default_secret(&self) -> bool {
        self.access_secret == DEFAULT_ACCESS_SECRET || self.refresh_secret == DEFAULT_REFRESH_SECRET
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = JwtConfig::default();

        Self {
            jwt: JwtConfig {
                access_secret: std::env::var("ACCESS_SECRET").unwrap_or(defaults.access_secret),
                refresh_secret: std::env::var("REFRESH_SECRET").unwrap_or(defaults.refresh_secret),
                access_token_expiry: env_or("ACCESS_TOKEN_TTL", defaults.access_token_expiry),
                refresh_token_expiry: env_or("REFRESH_TOKEN_TTL", defaults.refresh_token_expiry),
                algorithm: std::env::var("JWT_ALGORITHM").unwrap_or(defaults.algorithm),
                claims_mode: env_or("CLAIMS_MODE", defaults.claims_mode),
            },
        }
    }
}

fn default_algorithm() -> String {
    String::from("HS256")
}
