//! Per-request bearer filter shared by every service.
//!
//! The filter verifies the access token locally and stores the derived
//! [`Principal`] in the request extensions. It never rejects a request
//! itself: an absent or invalid credential simply leaves the request
//! unauthenticated, and per-route authorization (the extractors below)
//! decides whether that is acceptable.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde_json::json;

use crate::verify::Principal;
use crate::verify::TokenVerifier;

/// Middleware that derives a `Principal` from the Authorization header.
///
/// Layer it with `axum::middleware::from_fn_with_state` and an
/// `Arc<dyn TokenVerifier>` as state. Verification is pure CPU work over
/// the shared signing key; the request pipeline always proceeds.
pub async fn authenticate(
    State(verifier): State<Arc<dyn TokenVerifier>>,
    mut req: Request,
    next: Next,
) -> Response {
    if let Some(token) = bearer_token(&req) {
        match verifier.verify(token) {
            Ok(principal) => {
                req.extensions_mut().insert(principal);
            }
            Err(_) => {
                // Leave the request unauthenticated; protected routes reject
                tracing::debug!("Bearer credential rejected");
            }
        }
    }

    next.run(req).await
}

fn bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<Principal>().cloned().ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "Authentication required"
                })),
            )
                .into_response()
        })
    }
}

/// Extractor requiring an authenticated administrator.
///
/// Missing principal rejects with 401; a non-admin principal with 403.
#[derive(Debug, Clone)]
pub struct AdminPrincipal(pub Principal);

#[axum::async_trait]
impl<S> FromRequestParts<S> for AdminPrincipal
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let principal = Principal::from_request_parts(parts, state).await?;

        if !principal.role.is_admin() {
            return Err((
                StatusCode::FORBIDDEN,
                Json(json!({
                    "error": "Administrator role required"
                })),
            )
                .into_response());
        }

        Ok(AdminPrincipal(principal))
    }
}
