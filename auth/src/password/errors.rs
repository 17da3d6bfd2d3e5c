use thiserror::Error;

/// Error type for password hashing.
///
/// Verification never errors: any digest that cannot be parsed or matched
/// verifies as `false`.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),
}
