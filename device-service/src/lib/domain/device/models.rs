use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::device::errors::DeviceIdError;
use crate::device::errors::DeviceNameError;

/// Device aggregate entity.
///
/// `owner_id` is the user id taken from the authenticated principal at
/// creation time; it is never resolved against the user directory because
/// this service trusts the verified token claims.
#[derive(Debug, Clone)]
pub struct Device {
    pub id: DeviceId,
    pub name: DeviceName,
    pub description: Option<String>,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Device unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceId(pub Uuid);

impl DeviceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a device ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, DeviceIdError> {
        Uuid::parse_str(s)
            .map(DeviceId)
            .map_err(|e| DeviceIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for DeviceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Device name value type
///
/// Non-empty after trimming, at most 150 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceName(String);

impl DeviceName {
    const MAX_LENGTH: usize = 150;

    /// Create a new valid device name.
    ///
    /// # Errors
    /// * `Empty` - Name is empty or whitespace only
    /// * `TooLong` - Name longer than 150 characters
    pub fn new(name: String) -> Result<Self, DeviceNameError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(DeviceNameError::Empty);
        }
        if name.len() > Self::MAX_LENGTH {
            return Err(DeviceNameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: name.len(),
            });
        }
        Ok(Self(name))
    }

    /// Get name as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Command to create a new device with validated fields
#[derive(Debug)]
pub struct CreateDeviceCommand {
    pub name: DeviceName,
    pub description: Option<String>,
}
