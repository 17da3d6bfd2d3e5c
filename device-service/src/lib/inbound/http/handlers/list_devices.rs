use auth::Principal;
use axum::extract::State;
use axum::http::StatusCode;

use super::ApiError;
use super::ApiSuccess;
use super::DeviceData;
use crate::inbound::http::router::AppState;

/// List devices visible to the caller: administrators see every device,
/// other principals only their own.
pub async fn list_devices(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<ApiSuccess<Vec<DeviceData>>, ApiError> {
    let devices = state
        .device_service
        .list_devices(&principal)
        .await
        .map_err(ApiError::from)?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        devices.iter().map(DeviceData::from).collect(),
    ))
}
