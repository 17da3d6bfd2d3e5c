use auth::Principal;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::DeviceData;
use crate::device::models::DeviceId;
use crate::inbound::http::router::AppState;

pub async fn get_device(
    State(state): State<AppState>,
    principal: Principal,
    Path(device_id): Path<String>,
) -> Result<ApiSuccess<DeviceData>, ApiError> {
    let device_id =
        DeviceId::from_string(&device_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    state
        .device_service
        .get_device(&device_id, &principal)
        .await
        .map_err(ApiError::from)
        .map(|ref device| ApiSuccess::new(StatusCode::OK, device.into()))
}
