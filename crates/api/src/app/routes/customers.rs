use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use shoplite_core::CustomerId;
use shoplite_customers::CustomerPatch;
use shoplite_ledger::RegisterCustomer;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(register_customer).get(list_customers))
        .route(
            "/:id",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
}

pub async fn register_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<crate::context::OwnerContext>,
    Json(body): Json<dto::RegisterCustomerRequest>,
) -> axum::response::Response {
    let result = services.with_owner(owner.owner_id(), |ledger| {
        ledger.register_customer(RegisterCustomer {
            full_name: body.full_name,
            phone_number: body.phone_number,
            balance: body.balance,
        })
    });

    match result {
        Ok(customer) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "customer": dto::customer_to_json(&customer) })),
        )
            .into_response(),
        Err(e) => errors::op_error_to_response(e),
    }
}

pub async fn list_customers(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<crate::context::OwnerContext>,
) -> axum::response::Response {
    match services.read_owner(owner.owner_id()) {
        Ok(aggregate) => {
            let items = aggregate
                .customers()
                .map(dto::customer_to_json)
                .collect::<Vec<_>>();
            (StatusCode::OK, Json(serde_json::json!({ "customers": items }))).into_response()
        }
        Err(e) => errors::op_error_to_response(e),
    }
}

pub async fn get_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<crate::context::OwnerContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let customer_id: CustomerId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid customer id")
        }
    };

    match services.read_owner(owner.owner_id()) {
        Ok(aggregate) => match aggregate.customer(customer_id) {
            Some(customer) => (
                StatusCode::OK,
                Json(serde_json::json!({ "customer": dto::customer_to_json(customer) })),
            )
                .into_response(),
            None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "customer not found"),
        },
        Err(e) => errors::op_error_to_response(e),
    }
}

pub async fn update_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<crate::context::OwnerContext>,
    Path(id): Path<String>,
    Json(patch): Json<CustomerPatch>,
) -> axum::response::Response {
    let customer_id: CustomerId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid customer id")
        }
    };

    let result =
        services.with_owner(owner.owner_id(), |ledger| ledger.update_customer(customer_id, patch));

    match result {
        Ok(customer) => (
            StatusCode::OK,
            Json(serde_json::json!({ "customer": dto::customer_to_json(&customer) })),
        )
            .into_response(),
        Err(e) => errors::op_error_to_response(e),
    }
}

pub async fn delete_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(owner): Extension<crate::context::OwnerContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let customer_id: CustomerId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid customer id")
        }
    };

    let result =
        services.with_owner(owner.owner_id(), |ledger| ledger.remove_customer(customer_id));

    match result {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "id": customer_id.to_string(), "deleted": true })),
        )
            .into_response(),
        Err(e) => errors::op_error_to_response(e),
    }
}
