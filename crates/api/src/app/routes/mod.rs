use axum::{routing::get, Router};

pub mod customers;
pub mod invoices;
pub mod stock;
pub mod system;

/// Router for all owner-scoped endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .nest("/customers", customers::router())
        .nest("/stock", stock::router())
        .nest("/invoices", invoices::router())
}
