use auth::Principal;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use crate::device::models::DeviceId;
use crate::inbound::http::router::AppState;

pub async fn delete_device(
    State(state): State<AppState>,
    principal: Principal,
    Path(device_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let device_id =
        DeviceId::from_string(&device_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .device_service
        .delete_device(&device_id, &principal)
        .await
        .map_err(ApiError::from)?;

    Ok(StatusCode::NO_CONTENT)
}
