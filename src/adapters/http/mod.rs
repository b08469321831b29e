//! HTTP adapters - REST API implementations.
//!
//! `app_router` assembles the analysis endpoints, the health check, and the
//! tower-http middleware stack.

pub mod analysis;

use axum::{routing::get, Json, Router};
use http::{header, HeaderValue, Method};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::warn;

use crate::config::ServerConfig;

pub use analysis::{analysis_routes, AnalysisHandlers, ErrorResponse};

/// Builds the application router.
pub fn app_router(handlers: AnalysisHandlers, config: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/analysis", analysis_routes(handlers))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(cors_layer(config))
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(config.request_timeout())),
        )
}

/// GET /health - Liveness check
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins()
        .into_iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
}
