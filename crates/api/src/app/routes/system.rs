use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

pub async fn health() -> axum::response::Response {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" }))).into_response()
}

pub async fn whoami(
    Extension(owner): Extension<crate::context::OwnerContext>,
) -> axum::response::Response {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "owner_id": owner.owner_id().to_string() })),
    )
        .into_response()
}
