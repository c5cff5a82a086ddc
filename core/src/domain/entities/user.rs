//! User entity as exposed by the user directory.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::token::ProfileSnapshot;

/// Identifier of an authenticated principal
///
/// Assigned by the user directory and never changed afterwards. It is the
/// join key between credentials and session store entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(pub i64);

impl Identity {
    /// Raw numeric value
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Identity {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Identity)
    }
}

impl From<i64> for Identity {
    fn from(value: i64) -> Self {
        Identity(value)
    }
}

/// Role flag carried by a user record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// A user record as returned by the directory
///
/// Password material never leaves the directory, so it has no field here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Directory-assigned identity
    pub id: Identity,

    /// Unique login name
    pub username: String,

    /// Unique external identifier (national id number)
    pub external_id: String,

    /// Role flag
    pub role: Role,
}

impl User {
    /// Creates a user record with the default role
    pub fn new(id: Identity, username: impl Into<String>, external_id: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            external_id: external_id.into(),
            role: Role::User,
        }
    }

    /// Sets the role
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Point-in-time profile embedded into credentials
    pub fn profile(&self) -> ProfileSnapshot {
        ProfileSnapshot {
            username: self.username.clone(),
            external_id: self.external_id.clone(),
            role: self.role,
        }
    }
}
