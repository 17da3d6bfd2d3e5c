use std::sync::Arc;

use async_trait::async_trait;
use auth::Principal;
use chrono::Utc;

use crate::device::errors::DeviceError;
use crate::device::models::CreateDeviceCommand;
use crate::device::models::Device;
use crate::device::models::DeviceId;
use crate::device::ports::DeviceRepository;
use crate::device::ports::DeviceServicePort;

/// Domain service implementation for device operations.
///
/// Authorization works entirely from the principal carried by the request:
/// the owning user id was recorded from token claims at creation time, and
/// ownership checks compare against the current token claims. No call to
/// the auth service is ever made.
pub struct DeviceService<DR>
where
    DR: DeviceRepository,
{
    repository: Arc<DR>,
}

impl<DR> DeviceService<DR>
where
    DR: DeviceRepository,
{
    pub fn new(repository: Arc<DR>) -> Self {
        Self { repository }
    }

    fn can_access(device: &Device, requester: &Principal) -> bool {
        requester.role.is_admin() || device.owner_id == requester.user_id
    }
}

#[async_trait]
impl<DR> DeviceServicePort for DeviceService<DR>
where
    DR: DeviceRepository,
{
    async fn create_device(
        &self,
        command: CreateDeviceCommand,
        requester: &Principal,
    ) -> Result<Device, DeviceError> {
        let device = Device {
            id: DeviceId::new(),
            name: command.name,
            description: command.description,
            owner_id: requester.user_id,
            created_at: Utc::now(),
        };

        let created = self.repository.create(device).await?;

        tracing::info!(device_id = %created.id, owner_id = %created.owner_id, "Device created");
        Ok(created)
    }

    async fn get_device(
        &self,
        id: &DeviceId,
        requester: &Principal,
    ) -> Result<Device, DeviceError> {
        let device = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(DeviceError::NotFound(id.to_string()))?;

        if !Self::can_access(&device, requester) {
            return Err(DeviceError::AccessDenied);
        }

        Ok(device)
    }

    async fn list_devices(&self, requester: &Principal) -> Result<Vec<Device>, DeviceError> {
        if requester.role.is_admin() {
            self.repository.list_all().await
        } else {
            self.repository.list_by_owner(requester.user_id).await
        }
    }

    async fn delete_device(
        &self,
        id: &DeviceId,
        requester: &Principal,
    ) -> Result<(), DeviceError> {
        let device = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or(DeviceError::NotFound(id.to_string()))?;

        if !Self::can_access(&device, requester) {
            return Err(DeviceError::AccessDenied);
        }

        self.repository.delete(id).await?;

        tracing::info!(device_id = %id, "Device deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use auth::Role;
    use mockall::mock;
    use uuid::Uuid;

    use super::*;
    use crate::device::models::DeviceName;

    mock! {
        pub TestDeviceRepository {}

        #[async_trait]
        impl DeviceRepository for TestDeviceRepository {
            async fn create(&self, device: Device) -> Result<Device, DeviceError>;
            async fn find_by_id(&self, id: &DeviceId) -> Result<Option<Device>, DeviceError>;
            async fn list_all(&self) -> Result<Vec<Device>, DeviceError>;
            async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Device>, DeviceError>;
            async fn delete(&self, id: &DeviceId) -> Result<(), DeviceError>;
        }
    }

    fn principal(role: Role) -> Principal {
        Principal {
            user_id: Uuid::new_v4(),
            email: "user@example.com".to_string(),
            role,
        }
    }

    fn device(owner_id: Uuid) -> Device {
        Device {
            id: DeviceId::new(),
            name: DeviceName::new("meter-1".to_string()).unwrap(),
            description: None,
            owner_id,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_device_records_requester_as_owner() {
        let requester = principal(Role::Client);
        let owner_id = requester.user_id;

        let mut repository = MockTestDeviceRepository::new();
        repository
            .expect_create()
            .withf(move |device| device.owner_id == owner_id)
            .times(1)
            .returning(|device| Ok(device));

        let service = DeviceService::new(Arc::new(repository));
        let command = CreateDeviceCommand {
            name: DeviceName::new("meter-1".to_string()).unwrap(),
            description: Some("basement".to_string()),
        };

        let created = service.create_device(command, &requester).await.unwrap();
        assert_eq!(created.owner_id, owner_id);
    }

    #[tokio::test]
    async fn test_get_device_denied_for_non_owner() {
        let requester = principal(Role::Client);
        let stored = device(Uuid::new_v4());

        let mut repository = MockTestDeviceRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let service = DeviceService::new(Arc::new(repository));
        let result = service.get_device(&DeviceId::new(), &requester).await;

        assert!(matches!(result, Err(DeviceError::AccessDenied)));
    }

    #[tokio::test]
    async fn test_get_device_admin_overrides_ownership() {
        let requester = principal(Role::Admin);
        let stored = device(Uuid::new_v4());
        let stored_id = stored.id;

        let mut repository = MockTestDeviceRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));

        let service = DeviceService::new(Arc::new(repository));
        let result = service.get_device(&stored_id, &requester).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_get_device_not_found() {
        let requester = principal(Role::Client);

        let mut repository = MockTestDeviceRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = DeviceService::new(Arc::new(repository));
        let result = service.get_device(&DeviceId::new(), &requester).await;

        assert!(matches!(result, Err(DeviceError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_devices_scopes_clients_to_own() {
        let requester = principal(Role::Client);
        let owner_id = requester.user_id;

        let mut repository = MockTestDeviceRepository::new();
        repository.expect_list_all().times(0);
        repository
            .expect_list_by_owner()
            .withf(move |id| *id == owner_id)
            .times(1)
            .returning(move |id| Ok(vec![device(id)]));

        let service = DeviceService::new(Arc::new(repository));
        let devices = service.list_devices(&requester).await.unwrap();

        assert_eq!(devices.len(), 1);
    }

    #[tokio::test]
    async fn test_list_devices_admin_sees_all() {
        let requester = principal(Role::Admin);

        let mut repository = MockTestDeviceRepository::new();
        repository.expect_list_by_owner().times(0);
        repository
            .expect_list_all()
            .times(1)
            .returning(|| Ok(vec![device(Uuid::new_v4()), device(Uuid::new_v4())]));

        let service = DeviceService::new(Arc::new(repository));
        let devices = service.list_devices(&requester).await.unwrap();

        assert_eq!(devices.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_device_denied_for_non_owner() {
        let requester = principal(Role::Client);
        let stored = device(Uuid::new_v4());

        let mut repository = MockTestDeviceRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));
        repository.expect_delete().times(0);

        let service = DeviceService::new(Arc::new(repository));
        let result = service.delete_device(&DeviceId::new(), &requester).await;

        assert!(matches!(result, Err(DeviceError::AccessDenied)));
    }

    #[tokio::test]
    async fn test_delete_device_by_owner() {
        let requester = principal(Role::Client);
        let stored = device(requester.user_id);
        let stored_id = stored.id;

        let mut repository = MockTestDeviceRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(move |_| Ok(Some(stored.clone())));
        repository
            .expect_delete()
            .withf(move |id| *id == stored_id)
            .times(1)
            .returning(|_| Ok(()));

        let service = DeviceService::new(Arc::new(repository));
        let result = service.delete_device(&stored_id, &requester).await;

        assert!(result.is_ok());
    }
}
