use std::sync::Arc;

use auth::LocalTokenVerifier;
use device_service::config::Config;
use device_service::domain::device::ports::DeviceServicePort;
use device_service::domain::device::service::DeviceService;
use device_service::inbound::http::router::create_router;
use device_service::outbound::repositories::PostgresDeviceRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "device_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "device-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(http_port = config.server.http_port, "Configuration loaded");

    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = 5,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let device_repository = Arc::new(PostgresDeviceRepository::new(pg_pool));
    let device_service: Arc<dyn DeviceServicePort> =
        Arc::new(DeviceService::new(device_repository));
    let token_verifier = Arc::new(LocalTokenVerifier::new(config.jwt.secret.as_bytes()));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let application = create_router(device_service, token_verifier);
    axum::serve(http_listener, application).await?;

    Ok(())
}
