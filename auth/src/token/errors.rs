use thiserror::Error;

/// Error type for token operations.
///
/// Verification failures are deliberately collapsed into the single
/// `Invalid` variant: callers (and clients) must not be able to tell a bad
/// signature from a malformed token from an expired one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Invalid token")]
    Invalid,
}
