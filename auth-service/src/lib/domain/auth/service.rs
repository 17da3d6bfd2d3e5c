use std::sync::Arc;

use async_trait::async_trait;
use auth::AccessClaims;
use auth::PasswordHasher;
use auth::Principal;
use auth::Role;
use auth::TokenSigner;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::AuthPolicy;
use crate::domain::auth::models::LoginCommand;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::models::TokenPair;
use crate::domain::auth::ports::AuthServicePort;
use crate::token::ports::RefreshTokenRepository;
use crate::token::service::RefreshTokenService;
use crate::user::models::User;
use crate::user::models::UserId;
use crate::user::ports::UserRepository;

/// Auth orchestrator composing the credential hasher, the token signer,
/// and the refresh token service over the user directory.
///
/// Concrete implementation of AuthServicePort with dependency injection.
pub struct AuthService<UR, RR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
{
    users: Arc<UR>,
    refresh_tokens: RefreshTokenService<RR>,
    password_hasher: PasswordHasher,
    token_signer: TokenSigner,
    policy: AuthPolicy,
}

impl<UR, RR> AuthService<UR, RR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `users` - User directory implementation
    /// * `refresh_token_repository` - Refresh token persistence implementation
    /// * `token_signer` - Signer holding the shared signing secret
    /// * `policy` - Token lifetimes and registration policy
    pub fn new(
        users: Arc<UR>,
        refresh_token_repository: Arc<RR>,
        token_signer: TokenSigner,
        policy: AuthPolicy,
    ) -> Self {
        Self {
            users,
            refresh_tokens: RefreshTokenService::new(refresh_token_repository),
            password_hasher: PasswordHasher::new(),
            token_signer,
            policy,
        }
    }

    fn mint_access_token(&self, user: &User) -> Result<String, AuthError> {
        let claims = AccessClaims::new(
            user.id.0,
            user.email.as_str(),
            user.role,
            self.policy.access_ttl_seconds,
        );
        Ok(self.token_signer.encode(&claims)?)
    }

    /// Decide the effective role for a registration.
    ///
    /// A requested ADMIN role is honored only for an administrator actor,
    /// or (when `bootstrap_admin` is configured) for the very first user
    /// in an empty directory. Everything else is clamped to CLIENT
    /// silently; clamping is not an error.
    async fn resolve_role(
        &self,
        requested: Role,
        actor: Option<&Principal>,
    ) -> Result<Role, AuthError> {
        if requested != Role::Admin {
            return Ok(requested);
        }

        if actor.map_or(false, |principal| principal.role.is_admin()) {
            return Ok(Role::Admin);
        }

        if self.policy.bootstrap_admin && self.users.count().await.map_err(AuthError::from)? == 0 {
            tracing::info!("Granting ADMIN to first registered user (bootstrap)");
            return Ok(Role::Admin);
        }

        tracing::warn!("Requested ADMIN role clamped to CLIENT");
        Ok(Role::Client)
    }
}

#[async_trait]
impl<UR, RR> AuthServicePort for AuthService<UR, RR>
where
    UR: UserRepository,
    RR: RefreshTokenRepository,
{
    async fn register(
        &self,
        command: RegisterCommand,
        actor: Option<Principal>,
    ) -> Result<User, AuthError> {
        let requested = command.requested_role.unwrap_or(Role::Client);
        let role = self.resolve_role(requested, actor.as_ref()).await?;

        let password_hash = self.password_hasher.hash(&command.password)?;

        let user = User {
            id: UserId::new(),
            username: command.username,
            email: command.email,
            password_hash,
            role,
            created_at: Utc::now(),
        };

        // Duplicate email/username surfaces from the store's unique
        // constraints; no pre-check, so concurrent registrations race safely
        let created = self.users.create(user).await.map_err(AuthError::from)?;

        tracing::info!(user_id = %created.id, role = %created.role, "User registered");
        Ok(created)
    }

    async fn login(&self, command: LoginCommand) -> Result<TokenPair, AuthError> {
        let user = self
            .users
            .find_by_email(&command.email)
            .await
            .map_err(AuthError::from)?
            .ok_or(AuthError::InvalidCredentials)?;

        if !self
            .password_hasher
            .verify(&command.password, &user.password_hash)
        {
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self.mint_access_token(&user)?;
        let refresh_token = self
            .refresh_tokens
            .issue(user.id.0, self.policy.refresh_ttl_days)
            .await?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    async fn refresh(&self, raw_refresh_token: &str) -> Result<TokenPair, AuthError> {
        let (user_id, refresh_token) = self
            .refresh_tokens
            .rotate(raw_refresh_token, self.policy.refresh_ttl_days)
            .await?;

        let user = self
            .users
            .find_by_id(&UserId(user_id))
            .await
            .map_err(AuthError::from)?
            .ok_or(AuthError::InvalidCredentials)?;

        let access_token = self.mint_access_token(&user)?;

        tracing::debug!(user_id = %user.id, "Refresh token rotated");
        Ok(TokenPair {
            access_token,
            refresh_token,
        })
    }

    async fn logout(&self, raw_refresh_token: &str) -> Result<(), AuthError> {
        self.refresh_tokens.revoke(raw_refresh_token).await?;
        Ok(())
    }

    async fn logout_all(&self, user_id: Uuid) -> Result<(), AuthError> {
        self.refresh_tokens.revoke_all_for_user(user_id).await?;
        Ok(())
    }

    async fn list_users(&self) -> Result<Vec<User>, AuthError> {
        self.users.list_all().await.map_err(AuthError::from)
    }
}
