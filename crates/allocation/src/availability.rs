//! Availability checking: read-only, idempotent, safely retryable.
//!
//! Stock shortfall is a normal, reportable outcome here, never an error.
//! Results are advisory only; the commit path re-selects under its own
//! atomic section, so a check-then-bill sequence cannot double-spend stock.

use serde::{Deserialize, Serialize};

use stockbill_catalog::{ItemCode, Prefix};
use stockbill_core::{DomainError, DomainResult, WarehouseId};

use crate::ports::{AlternativeStock, StockLedger, WarehouseLookup};

/// One requested sale item: catalog code plus quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedItem {
    pub code: String,
    pub quantity: u32,
}

/// Human-readable availability verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
    Available,
    NotAvailable,
}

/// Per-item availability in the target warehouse, with alternatives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    pub item_code: ItemCode,
    pub prefix: Prefix,
    pub requested_quantity: u32,
    pub available_quantity: u32,
    pub is_available: bool,
    pub warehouse_id: WarehouseId,
    pub warehouse_name: String,
    pub status: AvailabilityStatus,
    pub message: String,
    /// Matching stock per other warehouse.
    pub alternatives: Vec<AlternativeStock>,
    /// Literal matched unit codes, for audit/debugging.
    pub matching_codes: Vec<String>,
}

/// Check each requested item against the target warehouse.
///
/// Errors: unknown warehouse -> `NotFound`; empty item list, blank code, or
/// zero quantity -> `Validation`.
pub fn check_availability(
    ledger: &dyn StockLedger,
    warehouses: &dyn WarehouseLookup,
    warehouse_id: WarehouseId,
    items: &[RequestedItem],
) -> DomainResult<Vec<AllocationResult>> {
    if items.is_empty() {
        return Err(DomainError::validation(
            "availability check requires at least one item",
        ));
    }

    let warehouse = warehouses
        .warehouse(warehouse_id)
        .ok_or_else(DomainError::not_found)?;

    let mut results = Vec::with_capacity(items.len());
    for item in items {
        let code = ItemCode::new(&item.code)?;
        if item.quantity == 0 {
            return Err(DomainError::validation(format!(
                "requested quantity for {code} must be positive"
            )));
        }
        let prefix = code.prefix();

        let units = ledger.matching_units(warehouse_id, &prefix);
        let available_quantity = units.len() as u32;
        let is_available = available_quantity >= item.quantity;
        let alternatives = ledger.matching_elsewhere(warehouse_id, &prefix);

        let (status, verdict) = if is_available {
            (AvailabilityStatus::Available, "available")
        } else {
            (AvailabilityStatus::NotAvailable, "not available")
        };
        let message = format!(
            "item {code} (prefix {prefix}) {verdict} in {}",
            warehouse.name
        );

        results.push(AllocationResult {
            item_code: code,
            prefix,
            requested_quantity: item.quantity,
            available_quantity,
            is_available,
            warehouse_id,
            warehouse_name: warehouse.name.clone(),
            status,
            message,
            alternatives,
            matching_codes: units.into_iter().map(|u| u.code).collect(),
        });
    }

    Ok(results)
}
