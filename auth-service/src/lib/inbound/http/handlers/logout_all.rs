use auth::Principal;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use crate::inbound::http::router::AppState;

/// Logout-everywhere: revokes every active refresh token of the caller.
///
/// Used as a compromise response; outstanding access tokens still ride
/// out their (short) TTL.
pub async fn logout_all(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<StatusCode, ApiError> {
    state
        .auth_service
        .logout_all(principal.user_id)
        .await
        .map_err(ApiError::from)?;

    Ok(StatusCode::NO_CONTENT)
}
