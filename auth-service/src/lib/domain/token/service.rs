use std::sync::Arc;

use chrono::Duration;
use chrono::Utc;
use rand::rngs::OsRng;
use rand::RngCore;
use sha2::Digest;
use sha2::Sha256;
use uuid::Uuid;

use crate::token::errors::RefreshTokenError;
use crate::token::errors::RefreshTokenStoreError;
use crate::token::models::RefreshToken;
use crate::token::ports::RefreshTokenRepository;

/// Issuance retries on digest collision before giving up.
const MAX_ISSUE_ATTEMPTS: usize = 4;

/// Raw secret length in bytes before hex encoding.
const RAW_SECRET_BYTES: usize = 32;

/// Refresh token lifecycle service.
///
/// Issues opaque raw secrets to clients while persisting only their
/// digests, validates and revokes them, and performs the single-use
/// rotation step used by the refresh flow. Expiry is enforced lazily at
/// validation time; nothing sweeps expired rows.
pub struct RefreshTokenService<R>
where
    R: RefreshTokenRepository,
{
    repository: Arc<R>,
}

impl<R> RefreshTokenService<R>
where
    R: RefreshTokenRepository,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Issue a new refresh token for the user.
    ///
    /// Generates a 32-byte secret from the OS CSPRNG and persists an
    /// active row keyed by its SHA-256 digest. The digest is the unique
    /// lookup key, so a store-level collision triggers a bounded retry
    /// with a fresh secret instead of overwriting another user's row.
    ///
    /// # Arguments
    /// * `user_id` - Owning user
    /// * `ttl_days` - Days until the token expires
    ///
    /// # Returns
    /// The raw secret. It is returned to the client exactly once and
    /// never persisted.
    ///
    /// # Errors
    /// * `IssuanceFailed` - Digest collisions exhausted the retry budget
    /// * `DatabaseError` - Database operation failed
    pub async fn issue(&self, user_id: Uuid, ttl_days: i64) -> Result<String, RefreshTokenError> {
        let now = Utc::now();
        let expires_at = now + Duration::days(ttl_days);

        for attempt in 1..=MAX_ISSUE_ATTEMPTS {
            let raw = generate_raw_secret();
            let token = RefreshToken {
                id: Uuid::new_v4(),
                user_id,
                token_hash: digest(&raw),
                issued_at: now,
                expires_at,
                revoked: false,
                revoked_at: None,
            };

            match self.repository.insert(token).await {
                Ok(()) => return Ok(raw),
                Err(RefreshTokenStoreError::DuplicateHash) => {
                    tracing::warn!(attempt, "Refresh token digest collision, retrying");
                }
                Err(RefreshTokenStoreError::Database(e)) => {
                    return Err(RefreshTokenError::DatabaseError(e))
                }
            }
        }

        Err(RefreshTokenError::IssuanceFailed)
    }

    /// Validate a raw token and return its owning user id.
    ///
    /// # Errors
    /// * `InvalidRefreshToken` - Token is unknown, revoked, or expired
    ///   (deliberately indistinguishable)
    /// * `DatabaseError` - Database operation failed
    pub async fn validate_and_get_user(&self, raw_token: &str) -> Result<Uuid, RefreshTokenError> {
        if raw_token.is_empty() {
            return Err(RefreshTokenError::InvalidRefreshToken);
        }

        let token = self
            .repository
            .find_by_hash(&digest(raw_token))
            .await
            .map_err(RefreshTokenError::from)?
            .ok_or(RefreshTokenError::InvalidRefreshToken)?;

        if !token.is_active(Utc::now()) {
            return Err(RefreshTokenError::InvalidRefreshToken);
        }

        Ok(token.user_id)
    }

    /// Revoke a single raw token.
    ///
    /// Revoking an already-revoked token is a no-op; an unknown token is
    /// rejected.
    ///
    /// # Errors
    /// * `InvalidRefreshToken` - No row matches the token digest
    /// * `DatabaseError` - Database operation failed
    pub async fn revoke(&self, raw_token: &str) -> Result<(), RefreshTokenError> {
        if raw_token.is_empty() {
            return Err(RefreshTokenError::InvalidRefreshToken);
        }

        let token_hash = digest(raw_token);
        let token = self
            .repository
            .find_by_hash(&token_hash)
            .await
            .map_err(RefreshTokenError::from)?
            .ok_or(RefreshTokenError::InvalidRefreshToken)?;

        if token.revoked {
            return Ok(());
        }

        self.repository
            .mark_revoked(&token_hash, Utc::now())
            .await
            .map_err(RefreshTokenError::from)?;

        Ok(())
    }

    /// Revoke every active token of the user at one shared timestamp.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    pub async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<u64, RefreshTokenError> {
        let revoked = self
            .repository
            .revoke_all_for_user(user_id, Utc::now())
            .await
            .map_err(RefreshTokenError::from)?;

        tracing::info!(%user_id, revoked, "Revoked all refresh tokens for user");
        Ok(revoked)
    }

    /// Rotate a raw token: atomically revoke it and issue a replacement.
    ///
    /// The validate-and-revoke step is one conditional write, so replaying
    /// a refresh request (or racing two of them) rotates at most once;
    /// every loser sees `InvalidRefreshToken`. The old token is therefore
    /// single-use even when stolen.
    ///
    /// # Returns
    /// The owning user id and the new raw secret.
    ///
    /// # Errors
    /// * `InvalidRefreshToken` - Token unknown, revoked, expired, or lost
    ///   a concurrent rotation race
    /// * `IssuanceFailed` - Replacement issuance exhausted its retry budget
    /// * `DatabaseError` - Database operation failed
    pub async fn rotate(
        &self,
        raw_token: &str,
        ttl_days: i64,
    ) -> Result<(Uuid, String), RefreshTokenError> {
        if raw_token.is_empty() {
            return Err(RefreshTokenError::InvalidRefreshToken);
        }

        let user_id = self
            .repository
            .claim_active(&digest(raw_token), Utc::now())
            .await
            .map_err(RefreshTokenError::from)?
            .ok_or(RefreshTokenError::InvalidRefreshToken)?;

        let new_raw = self.issue(user_id, ttl_days).await?;
        Ok((user_id, new_raw))
    }
}

/// Hex SHA-256 digest of a raw token. Deterministic: the same raw secret
/// always maps to the same stored lookup key.
fn digest(raw_token: &str) -> String {
    hex::encode(Sha256::digest(raw_token.as_bytes()))
}

fn generate_raw_secret() -> String {
    let mut bytes = [0u8; RAW_SECRET_BYTES];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use mockall::mock;
    use mockall::Sequence;

    use super::*;
    use async_trait::async_trait;

    mock! {
        pub TestRefreshTokenRepository {}

        #[async_trait]
        impl RefreshTokenRepository for TestRefreshTokenRepository {
            async fn insert(&self, token: RefreshToken) -> Result<(), RefreshTokenStoreError>;
            async fn find_by_hash(
                &self,
                token_hash: &str,
            ) -> Result<Option<RefreshToken>, RefreshTokenStoreError>;
            async fn claim_active(
                &self,
                token_hash: &str,
                now: DateTime<Utc>,
            ) -> Result<Option<Uuid>, RefreshTokenStoreError>;
            async fn mark_revoked(
                &self,
                token_hash: &str,
                now: DateTime<Utc>,
            ) -> Result<bool, RefreshTokenStoreError>;
            async fn revoke_all_for_user(
                &self,
                user_id: Uuid,
                now: DateTime<Utc>,
            ) -> Result<u64, RefreshTokenStoreError>;
        }
    }

    fn stored(user_id: Uuid, token_hash: &str, revoked: bool, ttl_days: i64) -> RefreshToken {
        let now = Utc::now();
        RefreshToken {
            id: Uuid::new_v4(),
            user_id,
            token_hash: token_hash.to_string(),
            issued_at: now,
            expires_at: now + Duration::days(ttl_days),
            revoked,
            revoked_at: revoked.then_some(now),
        }
    }

    #[tokio::test]
    async fn test_issue_persists_digest_not_raw_secret() {
        let mut repository = MockTestRefreshTokenRepository::new();
        repository
            .expect_insert()
            .withf(|token| {
                !token.revoked && token.revoked_at.is_none() && token.token_hash.len() == 64
            })
            .times(1)
            .returning(|_| Ok(()));

        let service = RefreshTokenService::new(Arc::new(repository));
        let raw = service.issue(Uuid::new_v4(), 7).await.expect("issue failed");

        // 32 random bytes, hex encoded
        assert_eq!(raw.len(), 64);
        assert!(raw.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[tokio::test]
    async fn test_issued_secrets_are_unique() {
        let mut repository = MockTestRefreshTokenRepository::new();
        repository.expect_insert().times(2).returning(|_| Ok(()));

        let service = RefreshTokenService::new(Arc::new(repository));
        let first = service.issue(Uuid::new_v4(), 7).await.unwrap();
        let second = service.issue(Uuid::new_v4(), 7).await.unwrap();

        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_issue_retries_on_digest_collision() {
        let mut repository = MockTestRefreshTokenRepository::new();
        let mut seq = Sequence::new();
        repository
            .expect_insert()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_| Err(RefreshTokenStoreError::DuplicateHash));
        repository
            .expect_insert()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let service = RefreshTokenService::new(Arc::new(repository));
        let result = service.issue(Uuid::new_v4(), 7).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_issue_gives_up_after_retry_budget() {
        let mut repository = MockTestRefreshTokenRepository::new();
        repository
            .expect_insert()
            .times(MAX_ISSUE_ATTEMPTS)
            .returning(|_| Err(RefreshTokenStoreError::DuplicateHash));

        let service = RefreshTokenService::new(Arc::new(repository));
        let result = service.issue(Uuid::new_v4(), 7).await;

        assert!(matches!(result, Err(RefreshTokenError::IssuanceFailed)));
    }

    #[tokio::test]
    async fn test_validate_unknown_token_fails() {
        let mut repository = MockTestRefreshTokenRepository::new();
        repository
            .expect_find_by_hash()
            .times(1)
            .returning(|_| Ok(None));

        let service = RefreshTokenService::new(Arc::new(repository));
        let result = service.validate_and_get_user("deadbeef").await;

        assert!(matches!(
            result,
            Err(RefreshTokenError::InvalidRefreshToken)
        ));
    }

    #[tokio::test]
    async fn test_validate_revoked_and_expired_fail_identically() {
        for token in [
            stored(Uuid::new_v4(), "h", true, 7),
            stored(Uuid::new_v4(), "h", false, -1),
        ] {
            let mut repository = MockTestRefreshTokenRepository::new();
            repository
                .expect_find_by_hash()
                .times(1)
                .returning(move |_| Ok(Some(token.clone())));

            let service = RefreshTokenService::new(Arc::new(repository));
            let result = service.validate_and_get_user("deadbeef").await;

            assert!(matches!(
                result,
                Err(RefreshTokenError::InvalidRefreshToken)
            ));
        }
    }

    #[tokio::test]
    async fn test_validate_active_token_returns_owner() {
        let user_id = Uuid::new_v4();
        let token = stored(user_id, "h", false, 7);

        let mut repository = MockTestRefreshTokenRepository::new();
        repository
            .expect_find_by_hash()
            .times(1)
            .returning(move |_| Ok(Some(token.clone())));

        let service = RefreshTokenService::new(Arc::new(repository));
        let result = service.validate_and_get_user("deadbeef").await;

        assert_eq!(result.unwrap(), user_id);
    }

    #[tokio::test]
    async fn test_validate_empty_token_fails_without_store_access() {
        let repository = MockTestRefreshTokenRepository::new();

        let service = RefreshTokenService::new(Arc::new(repository));
        let result = service.validate_and_get_user("").await;

        assert!(matches!(
            result,
            Err(RefreshTokenError::InvalidRefreshToken)
        ));
    }

    #[tokio::test]
    async fn test_revoke_unknown_token_fails() {
        let mut repository = MockTestRefreshTokenRepository::new();
        repository
            .expect_find_by_hash()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_mark_revoked().times(0);

        let service = RefreshTokenService::new(Arc::new(repository));
        let result = service.revoke("deadbeef").await;

        assert!(matches!(
            result,
            Err(RefreshTokenError::InvalidRefreshToken)
        ));
    }

    #[tokio::test]
    async fn test_revoke_already_revoked_is_noop() {
        let token = stored(Uuid::new_v4(), "h", true, 7);

        let mut repository = MockTestRefreshTokenRepository::new();
        repository
            .expect_find_by_hash()
            .times(1)
            .returning(move |_| Ok(Some(token.clone())));
        repository.expect_mark_revoked().times(0);

        let service = RefreshTokenService::new(Arc::new(repository));
        let result = service.revoke("deadbeef").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_revoke_active_token_flips_it() {
        let token = stored(Uuid::new_v4(), "h", false, 7);

        let mut repository = MockTestRefreshTokenRepository::new();
        repository
            .expect_find_by_hash()
            .times(1)
            .returning(move |_| Ok(Some(token.clone())));
        repository
            .expect_mark_revoked()
            .times(1)
            .returning(|_, _| Ok(true));

        let service = RefreshTokenService::new(Arc::new(repository));
        let result = service.revoke("deadbeef").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_rotate_claims_then_issues() {
        let user_id = Uuid::new_v4();

        let mut repository = MockTestRefreshTokenRepository::new();
        repository
            .expect_claim_active()
            .times(1)
            .returning(move |_, _| Ok(Some(user_id)));
        repository
            .expect_insert()
            .withf(move |token| token.user_id == user_id)
            .times(1)
            .returning(|_| Ok(()));

        let service = RefreshTokenService::new(Arc::new(repository));
        let (owner, new_raw) = service.rotate("deadbeef", 7).await.expect("rotate failed");

        assert_eq!(owner, user_id);
        assert_ne!(new_raw, "deadbeef");
    }

    #[tokio::test]
    async fn test_rotate_loser_observes_invalid() {
        let mut repository = MockTestRefreshTokenRepository::new();
        repository
            .expect_claim_active()
            .times(1)
            .returning(|_, _| Ok(None));
        repository.expect_insert().times(0);

        let service = RefreshTokenService::new(Arc::new(repository));
        let result = service.rotate("deadbeef", 7).await;

        assert!(matches!(
            result,
            Err(RefreshTokenError::InvalidRefreshToken)
        ));
    }
}
