use thiserror::Error;

/// Error for DeviceId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeviceIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for DeviceName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeviceNameError {
    #[error("Device name must not be empty")]
    Empty,

    #[error("Device name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Top-level error for device operations
#[derive(Debug, Clone, Error)]
pub enum DeviceError {
    #[error("Invalid device ID: {0}")]
    InvalidDeviceId(#[from] DeviceIdError),

    #[error("Invalid device name: {0}")]
    InvalidName(#[from] DeviceNameError),

    #[error("Device not found: {0}")]
    NotFound(String),

    #[error("Device name already exists: {0}")]
    NameAlreadyExists(String),

    #[error("Access denied")]
    AccessDenied,

    #[error("Database error: {0}")]
    DatabaseError(String),
}
