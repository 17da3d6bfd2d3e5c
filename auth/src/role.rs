use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

/// Fixed role set shared by every service.
///
/// The role travels inside access token claims as its uppercase wire name
/// and is mapped 1:1 to an authority by verifying services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ADMIN")]
    Admin,
    #[serde(rename = "CLIENT")]
    Client,
}

impl Role {
    /// Wire representation used in token claims and persisted rows.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Client => "CLIENT",
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

/// Error for role parsing failures.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("Unknown role: {0}")]
pub struct ParseRoleError(pub String);

impl FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Role::Admin),
            "CLIENT" => Ok(Role::Client),
            other => Err(ParseRoleError(other.to_string())),
        }
    }
}
