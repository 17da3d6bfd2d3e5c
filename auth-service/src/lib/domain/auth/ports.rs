use async_trait::async_trait;
use auth::Principal;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::models::TokenPair;
use crate::user::models::User;

/// Port for auth use cases.
///
/// Object-safe so the HTTP layer can hold it behind `Arc<dyn _>` and
/// tests can substitute in-memory wiring.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new user.
    ///
    /// The requested role is clamped to the non-privileged default unless
    /// the acting principal is an administrator, with one explicit
    /// bootstrap exception for an empty user directory.
    ///
    /// # Arguments
    /// * `command` - Validated registration fields
    /// * `actor` - The authenticated caller, if any
    ///
    /// # Errors
    /// * `DuplicateIdentity` - Email or username already registered
    /// * `Password` - Password hashing failed
    /// * `Storage` - Database operation failed
    async fn register(
        &self,
        command: RegisterCommand,
        actor: Option<Principal>,
    ) -> Result<User, AuthError>;

    /// Authenticate and issue an access/refresh token pair.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password
    ///   (indistinguishable)
    /// * `Storage` - Database operation failed
    async fn login(&self, command: LoginCommand) -> Result<TokenPair, AuthError>;

    /// Rotate a refresh token and mint a fresh pair.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Refresh token unknown, revoked, expired,
    ///   or already rotated
    /// * `IssuanceFailed` - Replacement issuance failed
    /// * `Storage` - Database operation failed
    async fn refresh(&self, raw_refresh_token: &str) -> Result<TokenPair, AuthError>;

    /// Revoke a single refresh token. Other sessions are untouched.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Refresh token unknown
    /// * `Storage` - Database operation failed
    async fn logout(&self, raw_refresh_token: &str) -> Result<(), AuthError>;

    /// Revoke every active refresh token of the user.
    ///
    /// Already-issued access tokens stay valid until natural expiry.
    ///
    /// # Errors
    /// * `Storage` - Database operation failed
    async fn logout_all(&self, user_id: Uuid) -> Result<(), AuthError>;

    /// List all users in the directory (administrative).
    ///
    /// # Errors
    /// * `Storage` - Database operation failed
    async fn list_users(&self) -> Result<Vec<User>, AuthError>;
}
