use async_trait::async_trait;
use auth::Principal;
use uuid::Uuid;

use crate::device::errors::DeviceError;
use crate::device::models::CreateDeviceCommand;
use crate::device::models::Device;
use crate::device::models::DeviceId;

/// Port for device domain service operations.
///
/// Every operation takes the request principal; authorization (ownership
/// or administrator override) is decided here, not in the HTTP layer.
#[async_trait]
pub trait DeviceServicePort: Send + Sync + 'static {
    /// Create a device owned by the requester.
    ///
    /// # Errors
    /// * `NameAlreadyExists` - Device name is already taken
    /// * `DatabaseError` - Database operation failed
    async fn create_device(
        &self,
        command: CreateDeviceCommand,
        requester: &Principal,
    ) -> Result<Device, DeviceError>;

    /// Retrieve a device the requester may see.
    ///
    /// # Errors
    /// * `NotFound` - Device does not exist
    /// * `AccessDenied` - Requester is neither the owner nor an admin
    /// * `DatabaseError` - Database operation failed
    async fn get_device(
        &self,
        id: &DeviceId,
        requester: &Principal,
    ) -> Result<Device, DeviceError>;

    /// List devices: administrators see all, others see their own.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_devices(&self, requester: &Principal) -> Result<Vec<Device>, DeviceError>;

    /// Delete a device the requester owns (or any device, for admins).
    ///
    /// # Errors
    /// * `NotFound` - Device does not exist
    /// * `AccessDenied` - Requester is neither the owner nor an admin
    /// * `DatabaseError` - Database operation failed
    async fn delete_device(
        &self,
        id: &DeviceId,
        requester: &Principal,
    ) -> Result<(), DeviceError>;
}

/// Persistence operations for the device aggregate.
#[async_trait]
pub trait DeviceRepository: Send + Sync + 'static {
    /// Persist new device to storage.
    ///
    /// # Errors
    /// * `NameAlreadyExists` - Device name is already taken
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, device: Device) -> Result<Device, DeviceError>;

    /// Retrieve device by identifier.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &DeviceId) -> Result<Option<Device>, DeviceError>;

    /// Retrieve all devices.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_all(&self) -> Result<Vec<Device>, DeviceError>;

    /// Retrieve all devices owned by the user.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Device>, DeviceError>;

    /// Remove device from storage.
    ///
    /// # Errors
    /// * `NotFound` - Device does not exist
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, id: &DeviceId) -> Result<(), DeviceError>;
}
