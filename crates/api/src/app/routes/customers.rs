use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::Utc;

use stockbill_allocation::CustomerLookup;
use stockbill_core::CustomerId;
use stockbill_directory::Customer;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", axum::routing::post(create_customer).get(list_customers))
        .route(
            "/:id",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
        .route("/:id/items", get(list_customer_items))
}

pub async fn create_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CustomerRequest>,
) -> axum::response::Response {
    let customer = match Customer::new(
        body.name,
        body.address,
        body.city,
        body.state,
        body.gst_no,
        body.phone,
        Utc::now(),
    ) {
        Ok(c) => c,
        Err(e) => return errors::domain_error_to_response(e),
    };

    services.directory.insert_customer(customer.clone());
    tracing::info!(customer_id = %customer.id, "customer created");
    (StatusCode::CREATED, Json(customer)).into_response()
}

pub async fn list_customers(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services.directory.customers();
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

pub async fn get_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CustomerId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.directory.customer(id) {
        Some(c) => (StatusCode::OK, Json(c)).into_response(),
        None => errors::json_error(StatusCode::NOT_FOUND, "not_found", "customer not found"),
    }
}

pub async fn update_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::CustomerRequest>,
) -> axum::response::Response {
    let id: CustomerId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Some(existing) = services.directory.customer(id) else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "customer not found");
    };

    // Re-validate through the constructor, then keep the stable identity.
    let mut updated = match Customer::new(
        body.name,
        body.address,
        body.city,
        body.state,
        body.gst_no,
        body.phone,
        existing.created_at,
    ) {
        Ok(c) => c,
        Err(e) => return errors::domain_error_to_response(e),
    };
    updated.id = existing.id;

    match services.directory.update_customer(updated) {
        Ok(c) => (StatusCode::OK, Json(c)).into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn delete_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CustomerId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match services.directory.remove_customer(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::domain_error_to_response(e),
    }
}

pub async fn list_customer_items(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CustomerId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if services.directory.customer(id).is_none() {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "customer not found");
    }
    let items = services.catalog.items_for_customer(id);
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}
