use std::sync::Arc;

#[tokio::main]
async fn main() {
    shoplite_observability::init();

    let store = Arc::new(shoplite_infra::InMemoryOwnerStore::new());

    // The in-memory store starts empty and account provisioning belongs to
    // the external auth collaborator, so seed one owner for local use.
    let owner_id = shoplite_core::OwnerId::new();
    store
        .register_owner(owner_id)
        .expect("failed to seed dev owner");
    tracing::info!(owner_id = %owner_id, "seeded dev owner; pass it as the X-Owner-Id header");

    let app = shoplite_api::app::build_app(store);

    let addr = std::env::var("SHOPLITE_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {addr}: {e}"));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
