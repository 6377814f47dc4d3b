use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};

use shoplite_core::StockItemId;
use shoplite_inventory::{QuantityOperation, StockItemPatch};
use shoplite_ledger::AddStockItem;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(add_stock_item).get(list_stock_items))
        .route(
            "/:id",
            get(get_stock_item)
                .put(update_stock_item)
                .delete(delete_stock_item),
        )
        .route("/:id/quantity", patch(adjust_quantity))
}

fn parse_item_id(id: &str) -> Result<StockItemId, axum::response::Response> {
    id.parse().map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid stock item id")
    })
}

pub async fn add_stock_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<crate::context::OwnerContext>,
    Json(body): Json<dto::AddStockItemRequest>,
) -> axum::response::Response {
    let result = services.with_owner(owner.owner_id(), |ledger| {
        ledger.add_stock_item(AddStockItem {
            name: body.name,
            price: body.price,
            quantity: body.quantity,
            description: body.description,
            category: body.category,
            sku: body.sku,
        })
    });

    match result {
        Ok(item) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "stock_item": dto::stock_item_to_json(&item) })),
        )
            .into_response(),
        Err(e) => errors::op_error_to_response(e),
    }
}

pub async fn list_stock_items(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<crate::context::OwnerContext>,
) -> axum::response::Response {
    match services.read_owner(owner.owner_id()) {
        Ok(aggregate) => {
            let items = aggregate
                .stock_items()
                .map(dto::stock_item_to_json)
                .collect::<Vec<_>>();
            (StatusCode::OK, Json(serde_json::json!({ "stock_items": items }))).into_response()
        }
        Err(e) => errors::op_error_to_response(e),
    }
}

pub async fn get_stock_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<crate::context::OwnerContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let item_id = match parse_item_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.read_owner(owner.owner_id()) {
        Ok(aggregate) => match aggregate.stock_item(item_id) {
            Some(item) => (
                StatusCode::OK,
                Json(serde_json::json!({ "stock_item": dto::stock_item_to_json(item) })),
            )
                .into_response(),
            None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "stock item not found"),
        },
        Err(e) => errors::op_error_to_response(e),
    }
}

pub async fn update_stock_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<crate::context::OwnerContext>,
    Path(id): Path<String>,
    Json(patch): Json<StockItemPatch>,
) -> axum::response::Response {
    let item_id = match parse_item_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let result =
        services.with_owner(owner.owner_id(), |ledger| ledger.update_stock_item(item_id, patch));

    match result {
        Ok(item) => (
            StatusCode::OK,
            Json(serde_json::json!({ "stock_item": dto::stock_item_to_json(&item) })),
        )
            .into_response(),
        Err(e) => errors::op_error_to_response(e),
    }
}

pub async fn adjust_quantity(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<crate::context::OwnerContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::AdjustQuantityRequest>,
) -> axum::response::Response {
    let item_id = match parse_item_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let operation = body.operation.unwrap_or(QuantityOperation::Set);
    let result = services.with_owner(owner.owner_id(), |ledger| {
        ledger.adjust_stock_quantity(item_id, body.quantity, operation)
    });

    match result {
        Ok(adjusted) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "stock_item": dto::stock_item_to_json(&adjusted.item),
                "previous_quantity": adjusted.previous_quantity,
                "operation": operation,
            })),
        )
            .into_response(),
        Err(e) => errors::op_error_to_response(e),
    }
}

pub async fn delete_stock_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<crate::context::OwnerContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let item_id = match parse_item_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let result =
        services.with_owner(owner.owner_id(), |ledger| ledger.remove_stock_item(item_id));

    match result {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "id": item_id.to_string(), "deleted": true })),
        )
            .into_response(),
        Err(e) => errors::op_error_to_response(e),
    }
}
