use std::sync::Arc;
use std::time::Duration;

use auth::verify::TokenVerifier;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_device::create_device;
use super::handlers::delete_device::delete_device;
use super::handlers::get_device::get_device;
use super::handlers::list_devices::list_devices;
use crate::device::ports::DeviceServicePort;

#[derive(Clone)]
pub struct AppState {
    pub device_service: Arc<dyn DeviceServicePort>,
}

pub fn create_router(
    device_service: Arc<dyn DeviceServicePort>,
    token_verifier: Arc<dyn TokenVerifier>,
) -> Router {
    let state = AppState { device_service };

    // Token verification is local CPU work over the shared signing key;
    // nothing here ever calls the auth service
    let api_routes = Router::new()
        .route("/api/devices", post(create_device))
        .route("/api/devices", get(list_devices))
        .route("/api/devices/:device_id", get(get_device))
        .route("/api/devices/:device_id", delete(delete_device))
        .layer(middleware::from_fn_with_state(
            token_verifier,
            auth::authenticate,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    api_routes
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
