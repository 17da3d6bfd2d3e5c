use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

/// Stored refresh token state.
///
/// Only the SHA-256 digest of the raw secret is ever persisted; the raw
/// secret exists solely in the issuance return value and in validation
/// input. Rows are immutable except for the single revoked/revoked_at
/// flip and are never deleted by the core.
#[derive(Debug, Clone)]
pub struct RefreshToken {
    pub id: Uuid,
    pub user_id: Uuid,
    pub token_hash: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub revoked: bool,
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshToken {
    /// A token is active iff it has not been revoked and has not expired.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        !self.revoked && now < self.expires_at
    }
}
