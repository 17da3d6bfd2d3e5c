use serde::Serialize;
use uuid::Uuid;

use crate::role::Role;
use crate::token::AccessClaims;
use crate::token::TokenError;
use crate::token::TokenSigner;

/// Authenticated identity derived from a verified access token.
///
/// Request-scoped and never persisted. Possession of a token with a valid
/// signature and unexpired claims is the entire proof of identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Principal {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
}

impl Principal {
    /// Authority granted to this principal, derived 1:1 from the role.
    pub fn authority(&self) -> &'static str {
        self.role.as_str()
    }
}

/// Capability to turn a bearer credential into a `Principal`.
///
/// Each resource service holds its own verifier configured with the shared
/// signing secret and verifies tokens locally; there is no callback to the
/// issuing service on the request path.
pub trait TokenVerifier: Send + Sync + 'static {
    /// Verify a compact access token and derive the principal.
    ///
    /// # Errors
    /// * `Invalid` - signature, structure, or expiry check failed
    ///   (deliberately indistinguishable)
    fn verify(&self, token: &str) -> Result<Principal, TokenError>;
}

/// Token verifier backed by local signature verification only.
///
/// Pure CPU work over the immutable signing key: no store access, no I/O,
/// safe to share across request workers.
pub struct LocalTokenVerifier {
    signer: TokenSigner,
}

impl LocalTokenVerifier {
    /// Create a verifier from the shared signing secret.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            signer: TokenSigner::new(secret),
        }
    }
}

impl TokenVerifier for LocalTokenVerifier {
    fn verify(&self, token: &str) -> Result<Principal, TokenError> {
        let claims: AccessClaims = self.signer.decode(token)?;

        Ok(Principal {
            user_id: claims.aid,
            email: claims.sub,
            role: claims.role,
        })
    }
}
