//! HTTP API application wiring (Axum router + service wiring).
//!
//! Folder layout:
//! - `services.rs`: store wiring + the load-modify-persist helper
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: request DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};

use shoplite_infra::OwnerStore;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub fn build_app(store: Arc<dyn OwnerStore>) -> Router {
    let services = Arc::new(services::AppServices::new(store));

    // Protected routes: require a resolvable owner context.
    let protected = routes::router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn(
            middleware::owner_context_middleware,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(protected)
}
