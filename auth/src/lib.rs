//! Shared authentication library
//!
//! Provides the trust kernel shared by every service in the workspace:
//! - Password hashing (Argon2id)
//! - Access token minting and signing (HS256 JWT)
//! - Local, stateless access token verification
//! - The per-request bearer filter and `Principal` extractors
//!
//! Every service verifies access tokens locally with the shared signing
//! secret; no service calls back to the issuer on the request path. The
//! verifier and filter live here once instead of being reimplemented per
//! service.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let digest = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &digest));
//! ```
//!
//! ## Minting and Verifying Access Tokens
//! ```
//! use auth::AccessClaims;
//! use auth::Role;
//! use auth::TokenSigner;
//! use uuid::Uuid;
//!
//! let signer = TokenSigner::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = AccessClaims::new(Uuid::new_v4(), "alice@example.com", Role::Client, 900);
//! let token = signer.encode(&claims).unwrap();
//! let decoded: AccessClaims = signer.decode(&token).unwrap();
//! assert_eq!(decoded.sub, "alice@example.com");
//! ```
//!
//! ## Deriving a Principal
//! ```
//! use auth::AccessClaims;
//! use auth::LocalTokenVerifier;
//! use auth::Role;
//! use auth::TokenSigner;
//! use auth::TokenVerifier;
//! use uuid::Uuid;
//!
//! let secret = b"secret_key_at_least_32_bytes_long!";
//! let signer = TokenSigner::new(secret);
//! let token = signer
//!     .encode(&AccessClaims::new(Uuid::new_v4(), "alice@example.com", Role::Admin, 900))
//!     .unwrap();
//!
//! let verifier = LocalTokenVerifier::new(secret);
//! let principal = verifier.verify(&token).unwrap();
//! assert_eq!(principal.role, Role::Admin);
//! ```

pub mod middleware;
pub mod password;
pub mod role;
pub mod token;
pub mod verify;

// Re-export commonly used items
pub use middleware::authenticate;
pub use middleware::AdminPrincipal;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use role::Role;
pub use token::AccessClaims;
pub use token::TokenError;
pub use token::TokenSigner;
pub use verify::LocalTokenVerifier;
pub use verify::Principal;
pub use verify::TokenVerifier;
