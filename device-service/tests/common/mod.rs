use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::AccessClaims;
use auth::LocalTokenVerifier;
use auth::Role;
use auth::TokenSigner;
use auth::TokenVerifier;
use device_service::device::errors::DeviceError;
use device_service::device::models::Device;
use device_service::device::models::DeviceId;
use device_service::device::ports::DeviceRepository;
use device_service::device::service::DeviceService;
use device_service::inbound::http::router::create_router;
use uuid::Uuid;

/// The secret shared with the token issuer. Tokens are minted directly
/// with it in tests, standing in for the auth service: the service under
/// test never talks to an issuer, it only verifies signatures.
pub const SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Device store double backed by a mutex-guarded map.
pub struct InMemoryDeviceRepository {
    devices: Mutex<HashMap<Uuid, Device>>,
}

impl InMemoryDeviceRepository {
    pub fn new() -> Self {
        Self {
            devices: Mutex::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl DeviceRepository for InMemoryDeviceRepository {
    async fn create(&self, device: Device) -> Result<Device, DeviceError> {
        let mut devices = self.devices.lock().unwrap();

        if devices
            .values()
            .any(|d| d.name.as_str() == device.name.as_str())
        {
            return Err(DeviceError::NameAlreadyExists(
                device.name.as_str().to_string(),
            ));
        }

        devices.insert(device.id.0, device.clone());
        Ok(device)
    }

    async fn find_by_id(&self, id: &DeviceId) -> Result<Option<Device>, DeviceError> {
        Ok(self.devices.lock().unwrap().get(&id.0).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Device>, DeviceError> {
        Ok(self.devices.lock().unwrap().values().cloned().collect())
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Device>, DeviceError> {
        Ok(self
            .devices
            .lock()
            .unwrap()
            .values()
            .filter(|d| d.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn delete(&self, id: &DeviceId) -> Result<(), DeviceError> {
        self.devices
            .lock()
            .unwrap()
            .remove(&id.0)
            .map(|_| ())
            .ok_or(DeviceError::NotFound(id.to_string()))
    }
}

/// Test application that spawns a real server over an in-memory store
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    signer: TokenSigner,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let repository = Arc::new(InMemoryDeviceRepository::new());
        let device_service = Arc::new(DeviceService::new(repository));
        let token_verifier: Arc<dyn TokenVerifier> = Arc::new(LocalTokenVerifier::new(SECRET));

        let router = create_router(device_service, token_verifier);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            signer: TokenSigner::new(SECRET),
        }
    }

    /// Mint an access token the way the issuing service would.
    pub fn mint_token(&self, user_id: Uuid, email: &str, role: Role) -> String {
        let claims = AccessClaims::new(user_id, email, role, 900);
        self.signer.encode(&claims).expect("Failed to mint token")
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// Helper to make DELETE request
    pub fn delete(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(format!("{}{}", self.address, path))
    }
}
