use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
    Json, Router,
};

use shoplite_core::{CustomerId, InvoiceId, StockItemId};
use shoplite_invoicing::{InvoicePatch, LineItem};
use shoplite_ledger::CreateInvoice;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_invoice).get(list_invoices))
        .route(
            "/:id",
            get(get_invoice).put(update_invoice).delete(delete_invoice),
        )
        .route("/:id/status", patch(change_invoice_status))
}

fn parse_invoice_id(id: &str) -> Result<InvoiceId, axum::response::Response> {
    id.parse().map_err(|_| {
        errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid invoice id")
    })
}

pub async fn create_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<crate::context::OwnerContext>,
    Json(body): Json<dto::CreateInvoiceRequest>,
) -> axum::response::Response {
    let customer_id: CustomerId = match body.customer_id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid customer id")
        }
    };

    let mut items: Vec<LineItem> = Vec::with_capacity(body.items.len());
    for line in body.items {
        let item_id: StockItemId = match line.item_id.parse() {
            Ok(v) => v,
            Err(_) => {
                return errors::json_error(
                    StatusCode::BAD_REQUEST,
                    "invalid_id",
                    "invalid stock item id",
                )
            }
        };
        items.push(LineItem {
            item_id,
            name: line.name,
            quantity: line.quantity,
            price: line.price,
        });
    }

    let result = services.with_owner(owner.owner_id(), |ledger| {
        ledger.create_invoice(CreateInvoice {
            customer_id,
            invoice_number: body.invoice_number,
            items,
            total_amount: body.total_amount,
            status: body.status,
        })
    });

    match result {
        Ok(created) => (
            StatusCode::CREATED,
            Json(serde_json::json!({
                "invoice": dto::invoice_to_json(&created.invoice),
                "customer_balance": created.customer_balance,
            })),
        )
            .into_response(),
        Err(e) => errors::op_error_to_response(e),
    }
}

pub async fn list_invoices(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<crate::context::OwnerContext>,
    Query(query): Query<dto::ListInvoicesQuery>,
) -> axum::response::Response {
    let customer_id: Option<CustomerId> = match &query.customer_id {
        Some(raw) => match raw.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                return errors::json_error(
                    StatusCode::BAD_REQUEST,
                    "invalid_id",
                    "invalid customer id",
                )
            }
        },
        None => None,
    };

    match services.read_owner(owner.owner_id()) {
        Ok(aggregate) => {
            let items = aggregate
                .invoices_filtered(query.status, customer_id)
                .into_iter()
                .map(dto::invoice_to_json)
                .collect::<Vec<_>>();
            (StatusCode::OK, Json(serde_json::json!({ "invoices": items }))).into_response()
        }
        Err(e) => errors::op_error_to_response(e),
    }
}

pub async fn get_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<crate::context::OwnerContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let invoice_id = match parse_invoice_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    match services.read_owner(owner.owner_id()) {
        Ok(aggregate) => match aggregate.invoice(invoice_id) {
            Some(invoice) => {
                // The referenced customer may have been removed since; the
                // invoice is still served.
                let customer = aggregate
                    .customer(invoice.customer_id)
                    .map(dto::customer_to_json);
                (
                    StatusCode::OK,
                    Json(serde_json::json!({
                        "invoice": dto::invoice_to_json(invoice),
                        "customer": customer,
                    })),
                )
                    .into_response()
            }
            None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "invoice not found"),
        },
        Err(e) => errors::op_error_to_response(e),
    }
}

pub async fn update_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<crate::context::OwnerContext>,
    Path(id): Path<String>,
    Json(patch): Json<InvoicePatch>,
) -> axum::response::Response {
    let invoice_id = match parse_invoice_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let result =
        services.with_owner(owner.owner_id(), |ledger| ledger.update_invoice(invoice_id, patch));

    match result {
        Ok(invoice) => (
            StatusCode::OK,
            Json(serde_json::json!({ "invoice": dto::invoice_to_json(&invoice) })),
        )
            .into_response(),
        Err(e) => errors::op_error_to_response(e),
    }
}

pub async fn change_invoice_status(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<crate::context::OwnerContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::ChangeInvoiceStatusRequest>,
) -> axum::response::Response {
    let invoice_id = match parse_invoice_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let result = services.with_owner(owner.owner_id(), |ledger| {
        ledger.change_invoice_status(invoice_id, body.status)
    });

    match result {
        Ok(changed) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "invoice": dto::invoice_to_json(&changed.invoice),
                "previous_status": changed.previous_status,
                "customer_balance": changed.customer_balance,
            })),
        )
            .into_response(),
        Err(e) => errors::op_error_to_response(e),
    }
}

pub async fn delete_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<crate::context::OwnerContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let invoice_id = match parse_invoice_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let result =
        services.with_owner(owner.owner_id(), |ledger| ledger.delete_invoice(invoice_id));

    match result {
        Ok(deleted) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "id": invoice_id.to_string(),
                "deleted": true,
                "customer_balance": deleted.customer_balance,
            })),
        )
            .into_response(),
        Err(e) => errors::op_error_to_response(e),
    }
}
