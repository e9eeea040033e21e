//! HTTP route handlers.
//!
//! The service exposes the visit-counted landing page at the root path (any
//! method) and a liveness probe at /health. Request tracing is enabled via
//! middleware that generates a unique request ID for each incoming request.

pub mod health;
pub mod index;

use axum::{
    middleware,
    routing::{any, get},
    Router,
};

use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Creates the Axum router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", any(index::visit))
        .route("/health", get(health::health))
        .with_state(state)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
