use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::role::Role;

/// Claims carried by an access token.
///
/// The subject is the account email; `aid` carries the user id. Both are
/// read by every verifying service, so the assignment is fixed workspace
/// wide and must never be swapped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccessClaims {
    /// Subject (account email)
    pub sub: String,

    /// Account id (user id of the subject)
    pub aid: Uuid,

    /// Role of the subject
    pub role: Role,

    /// Unique token id, reserved for a future per-token revocation list
    pub jti: Uuid,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl AccessClaims {
    /// Build claims for a freshly authenticated user.
    ///
    /// # Arguments
    /// * `user_id` - Unique user identifier
    /// * `email` - Account email (becomes the subject)
    /// * `role` - Role of the user
    /// * `ttl_seconds` - Seconds until the token expires
    ///
    /// # Returns
    /// Claims with a random `jti` and `iat`/`exp` anchored to now
    pub fn new(user_id: Uuid, email: &str, role: Role, ttl_seconds: i64) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::seconds(ttl_seconds);

        Self {
            sub: email.to_string(),
            aid: user_id,
            role,
            jti: Uuid::new_v4(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Check whether the token is expired at the given timestamp.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
