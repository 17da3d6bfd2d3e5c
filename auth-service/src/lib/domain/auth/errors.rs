use auth::PasswordError;
use auth::TokenError;
use thiserror::Error;

use crate::token::errors::RefreshTokenError;
use crate::user::errors::UserError;

/// Top-level error for auth use cases.
///
/// `InvalidCredentials` deliberately covers a failed login (unknown email
/// or wrong password) and every refresh-token validation failure, so
/// callers cannot enumerate accounts or probe token state.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Identity already exists: {0}")]
    DuplicateIdentity(String),

    #[error("Refresh token issuance failed")]
    IssuanceFailed,

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<UserError> for AuthError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::UsernameAlreadyExists(_) | UserError::EmailAlreadyExists(_) => {
                AuthError::DuplicateIdentity(err.to_string())
            }
            UserError::DatabaseError(e) => AuthError::Storage(e),
            other => AuthError::Storage(other.to_string()),
        }
    }
}

impl From<RefreshTokenError> for AuthError {
    fn from(err: RefreshTokenError) -> Self {
        match err {
            RefreshTokenError::InvalidRefreshToken => AuthError::InvalidCredentials,
            RefreshTokenError::IssuanceFailed => AuthError::IssuanceFailed,
            RefreshTokenError::DatabaseError(e) => AuthError::Storage(e),
        }
    }
}
