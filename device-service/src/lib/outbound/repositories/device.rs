use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::device::errors::DeviceError;
use crate::device::models::Device;
use crate::device::models::DeviceId;
use crate::device::models::DeviceName;
use crate::device::ports::DeviceRepository;

pub struct PostgresDeviceRepository {
    pool: PgPool,
}

impl PostgresDeviceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct DeviceRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    owner_id: Uuid,
    created_at: DateTime<Utc>,
}

impl TryFrom<DeviceRow> for Device {
    type Error = DeviceError;

    fn try_from(row: DeviceRow) -> Result<Self, Self::Error> {
        Ok(Device {
            id: DeviceId(row.id),
            name: DeviceName::new(row.name)?,
            description: row.description,
            owner_id: row.owner_id,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl DeviceRepository for PostgresDeviceRepository {
    async fn create(&self, device: Device) -> Result<Device, DeviceError> {
        sqlx::query(
            r#"
            INSERT INTO devices (id, name, description, owner_id, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(device.id.0)
        .bind(device.name.as_str())
        .bind(&device.description)
        .bind(device.owner_id)
        .bind(device.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() && db_err.constraint() == Some("devices_name_key")
                {
                    return DeviceError::NameAlreadyExists(device.name.as_str().to_string());
                }
            }
            DeviceError::DatabaseError(e.to_string())
        })?;

        Ok(device)
    }

    async fn find_by_id(&self, id: &DeviceId) -> Result<Option<Device>, DeviceError> {
        let row: Option<DeviceRow> = sqlx::query_as(
            r#"
            SELECT id, name, description, owner_id, created_at
            FROM devices
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DeviceError::DatabaseError(e.to_string()))?;

        row.map(Device::try_from).transpose()
    }

    async fn list_all(&self) -> Result<Vec<Device>, DeviceError> {
        let rows: Vec<DeviceRow> = sqlx::query_as(
            r#"
            SELECT id, name, description, owner_id, created_at
            FROM devices
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DeviceError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Device::try_from).collect()
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Device>, DeviceError> {
        let rows: Vec<DeviceRow> = sqlx::query_as(
            r#"
            SELECT id, name, description, owner_id, created_at
            FROM devices
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DeviceError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Device::try_from).collect()
    }

    async fn delete(&self, id: &DeviceId) -> Result<(), DeviceError> {
        let result = sqlx::query("DELETE FROM devices WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| DeviceError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(DeviceError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
