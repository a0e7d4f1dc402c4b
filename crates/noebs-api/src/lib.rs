//! noebs REST API
//!
//! HTTP boundary in front of the EBS payment switch. Every switch route
//! validates its body against the route's shape, forwards it, and returns
//! the sanitized response envelope.
//!
//! # API Structure
//!
//! ```text
//! /
//! ├── /health               - Liveness
//! ├── /{operation}          - Switch transactions (cashIn, balance, ...)
//! ├── /ebs/{operation}      - Any switch operation, by name
//! ├── /docs/routes          - Route catalogue
//! ├── /docs/fields?path=    - Fields of the shape a path resolves to
//! ├── /docs/shapes/{shape}  - Fields of a named shape
//! ├── /docs/reference       - Every route with its fields
//! └── /swagger-ui           - OpenAPI browser
//! ```

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod switch;
pub mod validation;

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderName;
use axum::Router;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

pub use error::{ApiError, ApiResult};
pub use state::AppState;
pub use switch::{HttpSwitchClient, SwitchClient, SwitchConfig, SwitchError};

/// API configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Enable CORS for browser clients
    pub enable_cors: bool,
    /// Allowed origins for CORS
    pub cors_origins: Vec<String>,
    /// Enable response compression
    pub enable_compression: bool,
    /// Enable request tracing
    pub enable_tracing: bool,
    /// Maximum request body size in bytes
    pub max_body_size: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            enable_cors: true,
            cors_origins: vec!["*".to_string()],
            enable_compression: true,
            enable_tracing: true,
            max_body_size: 64 * 1024,
        }
    }
}

/// Create the main API router with all middleware
pub fn create_router(state: Arc<AppState>, config: ApiConfig) -> Router {
    let mut router = Router::new()
        .merge(routes::api_routes())
        .merge(routes::swagger_routes())
        .layer(DefaultBodyLimit::max(config.max_body_size))
        .layer(axum::middleware::from_fn(middleware::timing_middleware))
        .with_state(state);

    // Add request ID middleware
    let x_request_id = HeaderName::from_static("x-request-id");
    router = router
        .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
        .layer(PropagateRequestIdLayer::new(x_request_id));

    // Add tracing
    if config.enable_tracing {
        router = router.layer(TraceLayer::new_for_http().make_span_with(
            |request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("unknown");

                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            },
        ));
    }

    // Add compression
    if config.enable_compression {
        router = router.layer(CompressionLayer::new());
    }

    // Add CORS
    if config.enable_cors {
        let cors = if config.cors_origins.iter().any(|o| o == "*") {
            CorsLayer::permissive()
        } else {
            CorsLayer::new()
                .allow_origin(
                    config
                        .cors_origins
                        .iter()
                        .filter_map(|o| o.parse().ok())
                        .collect::<Vec<_>>(),
                )
                .allow_methods([
                    axum::http::Method::GET,
                    axum::http::Method::POST,
                    axum::http::Method::OPTIONS,
                ])
                .allow_headers(Any)
        };
        router = router.layer(cors);
    }

    router
}

/// Create a minimal router for testing
pub fn create_test_router(state: Arc<AppState>) -> Router {
    Router::new().merge(routes::api_routes()).with_state(state)
}
