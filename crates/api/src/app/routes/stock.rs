use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, post},
    Json, Router,
};
use chrono::Utc;

use stockbill_allocation::WarehouseLookup;
use stockbill_core::{StockUnitId, WarehouseId};
use stockbill_ledger::StockUnit;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(intake).get(list_units))
        .route("/:id", delete(delete_unit))
}

/// Intake: one stock unit per submitted code, stamped with the current time.
pub async fn intake(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::StockIntakeRequest>,
) -> axum::response::Response {
    let warehouse_id: WarehouseId = match dto::parse_id(&body.warehouse_id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let Some(warehouse) = services.directory.warehouse(warehouse_id) else {
        return errors::json_error(StatusCode::NOT_FOUND, "not_found", "warehouse not found");
    };
    if body.codes.is_empty() {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "intake requires at least one unit code",
        );
    }

    // Validate the whole batch before touching the ledger.
    let now = Utc::now();
    let mut units = Vec::with_capacity(body.codes.len());
    for code in &body.codes {
        match StockUnit::new(code, warehouse.id, &warehouse.name, now) {
            Ok(u) => units.push(u),
            Err(e) => return errors::domain_error_to_response(e),
        }
    }

    let added = units.len();
    for unit in &units {
        services.ledger.add(unit.clone());
    }
    tracing::info!(warehouse_id = %warehouse.id, added, "stock intake");
    (
        StatusCode::CREATED,
        Json(serde_json::json!({ "added": added, "units": units })),
    )
        .into_response()
}

pub async fn list_units(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::StockQuery>,
) -> axum::response::Response {
    let warehouse_id = match query.warehouse_id.as_deref() {
        Some(raw) => match dto::parse_id::<WarehouseId>(raw) {
            Ok(v) => Some(v),
            Err(resp) => return resp,
        },
        None => None,
    };
    let items = services.ledger.list(warehouse_id);
    (StatusCode::OK, Json(serde_json::json!({ "items": items }))).into_response()
}

/// Intake correction: remove one mistyped unit.
pub async fn delete_unit(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: StockUnitId = match dto::parse_id(&id) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    if services.ledger.remove(id) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        errors::json_error(StatusCode::NOT_FOUND, "not_found", "stock unit not found")
    }
}
