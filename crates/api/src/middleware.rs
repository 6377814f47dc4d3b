use axum::{
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use shoplite_core::OwnerId;

use crate::context::OwnerContext;

/// Header carrying the opaque owner id issued by the external auth layer.
pub const OWNER_ID_HEADER: &str = "x-owner-id";

pub async fn owner_context_middleware(
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let owner_id = extract_owner_id(req.headers())?;

    req.extensions_mut().insert(OwnerContext::new(owner_id));

    Ok(next.run(req).await)
}

fn extract_owner_id(headers: &HeaderMap) -> Result<OwnerId, StatusCode> {
    let header = headers
        .get(OWNER_ID_HEADER)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let header = header.to_str().map_err(|_| StatusCode::UNAUTHORIZED)?;

    header
        .trim()
        .parse()
        .map_err(|_| StatusCode::UNAUTHORIZED)
}
