use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use stockbill_allocation::{BillStore, CommitRequest};
use stockbill_core::{BillId, CustomerId, WarehouseId};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/availability", post(check_availability))
        .route("/bills", post(commit_bill).get(list_bills))
        .route("/bills/:id", get(get_bill))
        .route("/bills/customer/:customer_id", get(list_customer_bills))
}

/// Read-only availability check; never mutates the ledger.
pub async fn check_availability(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::AvailabilityRequest>,
) -> axum::response::Response {
    let warehouse_id: WarehouseId = match dto::parse_id(&body.warehouse_id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.billing.check_availability(warehouse_id, &body.items) {
        Ok(results) => (
            StatusCode::OK,
            Json(serde_json::json!({ "results": results })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// Commit: consume matching stock and persist the bill.
pub async fn commit_bill(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CommitBillRequest>,
) -> axum::response::Response {
    let customer_id: CustomerId = match dto::parse_id(&body.customer_id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let warehouse_id: WarehouseId = match dto::parse_id(&body.warehouse_id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let request = CommitRequest {
        customer_id,
        warehouse_id,
        lines: body.lines,
        price_type: body.price_type,
    };
    match services.billing.commit_bill(request) {
        Ok(outcome) => (StatusCode::CREATED, Json(outcome)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_bills(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services.bills.bills();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn get_bill(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: BillId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.bills.bill(id) {
        Some(bill) => (StatusCode::OK, Json(bill)).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "bill not found"),
    }
}

pub async fn list_customer_bills(
    Extension(services): Extension<Arc<AppServices>>,
    Path(customer_id): Path<String>,
) -> axum::response::Response {
    let customer_id: CustomerId = match dto::parse_id(&customer_id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let items = services.bills.bills_for_customer(customer_id);
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}
