use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::Utc;

use stockbill_allocation::WarehouseLookup;
use stockbill_core::{CustomerId, WarehouseId};
use stockbill_directory::Warehouse;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", axum::routing::post(create_warehouse).get(list_warehouses))
        .route(
            "/:id",
            get(get_warehouse).put(update_warehouse).delete(delete_warehouse),
        )
        .route("/sorted/:customer_id", get(sorted_for_customer))
}

pub async fn create_warehouse(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::WarehouseRequest>,
) -> axum::response::Response {
    let warehouse = match Warehouse::new(body.name, body.address, body.city, body.state, Utc::now())
    {
        Ok(w) => w,
        Err(e) => return errors::domain_error_to_response(e),
    };

    services.directory.insert_warehouse(warehouse.clone());
    tracing::info!(warehouse_id = %warehouse.id, "warehouse created");
    (StatusCode::CREATED, Json(warehouse)).into_response()
}

pub async fn list_warehouses(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services.directory.warehouses();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn get_warehouse(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: WarehouseId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.directory.warehouse(id) {
        Some(w) => (StatusCode::OK, Json(w)).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "warehouse not found"),
    }
}

pub async fn update_warehouse(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::WarehouseRequest>,
) -> axum::response::Response {
    let id: WarehouseId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Some(existing) = services.directory.warehouse(id) else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "warehouse not found");
    };

    let mut updated = match Warehouse::new(
        body.name,
        body.address,
        body.city,
        body.state,
        existing.created_at,
    ) {
        Ok(w) => w,
        Err(e) => return errors::domain_error_to_response(e),
    };
    updated.id = existing.id;

    match services.directory.update_warehouse(updated) {
        Ok(w) => (StatusCode::OK, Json(w)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_warehouse(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: WarehouseId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.directory.remove_warehouse(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// Warehouses split into location-matching and other, for warehouse pickers.
pub async fn sorted_for_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(customer_id): Path<String>,
) -> axum::response::Response {
    let customer_id: CustomerId = match dto::parse_id(&customer_id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.billing.warehouses_sorted(customer_id) {
        Ok((customer, partition)) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "customer": customer,
                "matching": partition.matching,
                "non_matching": partition.non_matching,
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}
