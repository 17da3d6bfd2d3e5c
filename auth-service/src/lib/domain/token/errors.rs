use thiserror::Error;

/// Storage-level error for the refresh token store.
#[derive(Debug, Clone, Error)]
pub enum RefreshTokenStoreError {
    /// The unique constraint on the token digest was violated.
    ///
    /// Issuance treats this as a retry trigger, not a failure.
    #[error("Refresh token digest already present")]
    DuplicateHash,

    #[error("Database error: {0}")]
    Database(String),
}

/// Error for refresh token lifecycle operations.
///
/// Absent, revoked, and expired tokens all surface as `InvalidRefreshToken`
/// so a caller cannot probe which condition failed.
#[derive(Debug, Clone, Error)]
pub enum RefreshTokenError {
    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    #[error("Refresh token issuance failed")]
    IssuanceFailed,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<RefreshTokenStoreError> for RefreshTokenError {
    fn from(err: RefreshTokenStoreError) -> Self {
        match err {
            // Escaping the bounded issuance retry means issuance is broken
            RefreshTokenStoreError::DuplicateHash => RefreshTokenError::IssuanceFailed,
            RefreshTokenStoreError::Database(e) => RefreshTokenError::DatabaseError(e),
        }
    }
}
