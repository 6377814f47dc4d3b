use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use shoplite_core::LedgerError;
use shoplite_infra::StoreError;

use crate::app::services::OpError;

pub fn op_error_to_response(err: OpError) -> axum::response::Response {
    match err {
        OpError::Domain(e) => ledger_error_to_response(e),
        OpError::Store(e) => store_error_to_response(e),
    }
}

pub fn ledger_error_to_response(err: LedgerError) -> axum::response::Response {
    let message = err.to_string();
    match err {
        LedgerError::NotFound { .. } => json_error(StatusCode::NOT_FOUND, "not_found", message),
        LedgerError::Conflict { .. } => json_error(StatusCode::BAD_REQUEST, "conflict", message),
        LedgerError::InsufficientStock {
            item_id,
            available,
            required,
        } => (
            StatusCode::BAD_REQUEST,
            axum::Json(json!({
                "error": "insufficient_stock",
                "message": message,
                "item_id": item_id.to_string(),
                "available": available,
                "required": required,
            })),
        )
            .into_response(),
        LedgerError::InvalidQuantity { .. } => {
            json_error(StatusCode::BAD_REQUEST, "invalid_quantity", message)
        }
        LedgerError::Validation { .. } => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", message)
        }
    }
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::OwnerNotFound(_) => {
            json_error(StatusCode::NOT_FOUND, "not_found", "owner not found")
        }
        StoreError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
        StoreError::Unavailable(msg) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", msg)
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
