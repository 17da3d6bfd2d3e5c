use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::token::errors::RefreshTokenStoreError;
use crate::token::models::RefreshToken;

/// Persistence operations for refresh tokens.
///
/// This store is the only shared mutable resource of the auth core. Two
/// invariants must hold transactionally: the token digest is unique
/// across all rows, and `claim_active` is atomic per row so concurrent
/// rotations of one token have at most one winner.
#[async_trait]
pub trait RefreshTokenRepository: Send + Sync + 'static {
    /// Persist a new token row.
    ///
    /// # Errors
    /// * `DuplicateHash` - A row with the same digest already exists
    /// * `Database` - Database operation failed
    async fn insert(&self, token: RefreshToken) -> Result<(), RefreshTokenStoreError>;

    /// Retrieve a token row by its digest.
    ///
    /// # Errors
    /// * `Database` - Database operation failed
    async fn find_by_hash(
        &self,
        token_hash: &str,
    ) -> Result<Option<RefreshToken>, RefreshTokenStoreError>;

    /// Atomically revoke the row iff it is still active, returning its owner.
    ///
    /// This is the rotation primitive: a single conditional write that
    /// checks `NOT revoked AND expires_at > now`, flips the revocation
    /// flags, and returns the owning user id. Exactly one of any number
    /// of concurrent callers observes `Some`; the rest observe `None`.
    ///
    /// # Errors
    /// * `Database` - Database operation failed
    async fn claim_active(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Uuid>, RefreshTokenStoreError>;

    /// Revoke the row if it is not already revoked.
    ///
    /// Expiry is not checked: revoking an expired token is allowed and
    /// harmless. Returns whether this call performed the flip.
    ///
    /// # Errors
    /// * `Database` - Database operation failed
    async fn mark_revoked(
        &self,
        token_hash: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, RefreshTokenStoreError>;

    /// Revoke every non-revoked row of the user at one shared timestamp.
    ///
    /// Returns the number of rows revoked.
    ///
    /// # Errors
    /// * `Database` - Database operation failed
    async fn revoke_all_for_user(
        &self,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<u64, RefreshTokenStoreError>;
}
