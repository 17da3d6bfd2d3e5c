use auth::Role;

use crate::user::models::EmailAddress;
use crate::user::models::Username;

/// Access/refresh token pair returned by login and refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Command to register a new user with validated fields.
///
/// `requested_role` is a request, not a grant: the service clamps it
/// according to the acting principal and the bootstrap policy.
#[derive(Debug)]
pub struct RegisterCommand {
    pub username: Username,
    pub email: EmailAddress,
    pub password: String,
    pub requested_role: Option<Role>,
}

/// Command to authenticate with email and password.
#[derive(Debug)]
pub struct LoginCommand {
    pub email: EmailAddress,
    pub password: String,
}

/// Token lifetime and registration policy, read once at startup.
#[derive(Debug, Clone, Copy)]
pub struct AuthPolicy {
    pub access_ttl_seconds: i64,
    pub refresh_ttl_days: i64,
    pub bootstrap_admin: bool,
}
