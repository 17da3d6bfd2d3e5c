use auth::Principal;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::DeviceData;
use crate::device::errors::DeviceNameError;
use crate::device::models::CreateDeviceCommand;
use crate::device::models::DeviceName;
use crate::inbound::http::router::AppState;

pub async fn create_device(
    State(state): State<AppState>,
    principal: Principal,
    Json(body): Json<CreateDeviceRequest>,
) -> Result<ApiSuccess<DeviceData>, ApiError> {
    let command = body.try_into_command()?;

    state
        .device_service
        .create_device(command, &principal)
        .await
        .map_err(ApiError::from)
        .map(|ref device| ApiSuccess::new(StatusCode::CREATED, device.into()))
}

/// HTTP request body for creating a device (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateDeviceRequest {
    name: String,
    description: Option<String>,
}

impl CreateDeviceRequest {
    fn try_into_command(self) -> Result<CreateDeviceCommand, DeviceNameError> {
        let name = DeviceName::new(self.name)?;
        Ok(CreateDeviceCommand {
            name,
            description: self.description,
        })
    }
}

impl From<DeviceNameError> for ApiError {
    fn from(err: DeviceNameError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
