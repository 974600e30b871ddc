use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;

use stockbill_allocation::CustomerLookup;
use stockbill_catalog::{CatalogItem, ItemCode};
use stockbill_core::{CatalogItemId, CustomerId};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/items", post(create_item))
        .route(
            "/items/:id",
            get(get_item).put(update_item).delete(delete_item),
        )
        .route("/items/bulk/:customer_id", post(bulk_replace))
}

pub async fn create_item(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CatalogItemCreate>,
) -> axum::response::Response {
    let customer_id: CustomerId = match dto::parse_id(&body.customer_id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if services.directory.customer(customer_id).is_none() {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "customer not found");
    }

    let item = match build_item(customer_id, &body.code, body.price, body.master_price) {
        Ok(i) => i,
        Err(resp) => return resp,
    };

    services.catalog.insert(item.clone());
    tracing::info!(item_id = %item.id, customer_id = %customer_id, "catalog item created");
    (StatusCode::CREATED, Json(item)).into_response()
}

pub async fn get_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CatalogItemId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.catalog.item(id) {
        Some(item) => (StatusCode::OK, Json(item)).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "catalog item not found"),
    }
}

pub async fn update_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::CatalogItemUpdate>,
) -> axum::response::Response {
    let id: CatalogItemId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Some(existing) = services.catalog.item(id) else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "catalog item not found");
    };

    let mut updated = match build_item(
        existing.customer_id,
        &body.code,
        body.price,
        body.master_price,
    ) {
        Ok(i) => i,
        Err(resp) => return resp,
    };
    updated.id = existing.id;
    updated.created_at = existing.created_at;

    match services.catalog.update(updated) {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_item(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CatalogItemId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.catalog.remove(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

/// Bulk import: replaces the customer's whole catalog in one call.
pub async fn bulk_replace(
    Extension(services): Extension<Arc<AppServices>>,
    Path(customer_id): Path<String>,
    Json(body): Json<dto::BulkCatalogRequest>,
) -> axum::response::Response {
    let customer_id: CustomerId = match dto::parse_id(&customer_id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if services.directory.customer(customer_id).is_none() {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "customer not found");
    }

    let mut items = Vec::with_capacity(body.items.len());
    for entry in &body.items {
        match build_item(customer_id, &entry.code, entry.price, entry.master_price) {
            Ok(i) => items.push(i),
            Err(resp) => return resp,
        }
    }

    match services.catalog.replace_for_customer(customer_id, items) {
        Ok(installed) => {
            tracing::info!(customer_id = %customer_id, installed, "catalog bulk import");
            (
                StatusCode::OK,
                Json(serde_json::json!({ "installed": installed })),
            )
                .into_response()
        }
        Err(e) => errors::domain_error_to_response(e),
    }
}

fn build_item(
    customer_id: CustomerId,
    code: &str,
    price: f64,
    master_price: f64,
) -> Result<CatalogItem, axum::response::Response> {
    let code = ItemCode::new(code).map_err(errors::domain_error_to_response)?;
    CatalogItem::new(customer_id, code, price, master_price, Utc::now())
        .map_err(errors::domain_error_to_response)
}
