//! Allocation commit: consume stock and persist the bill.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockbill_catalog::{ItemCode, Prefix, PriceType};
use stockbill_core::{BillId, CustomerId, DomainError, DomainResult, WarehouseId};

use crate::bill::{Bill, BillLine};
use crate::ports::{BillStore, CustomerLookup, LineDemand, StockLedger, WarehouseLookup};

/// One requested bill line: code, quantity, and the two catalog prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillLineRequest {
    pub code: String,
    pub quantity: u32,
    pub price: f64,
    pub master_price: f64,
}

/// A commit request for one bill.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitRequest {
    pub customer_id: CustomerId,
    pub warehouse_id: WarehouseId,
    pub lines: Vec<BillLineRequest>,
    #[serde(default)]
    pub price_type: PriceType,
}

/// What was actually consumed for one bill line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineConsumption {
    pub code: ItemCode,
    pub prefix: Prefix,
    pub requested: u32,
    pub found: u32,
    pub deleted: u32,
    pub deleted_codes: Vec<String>,
}

impl LineConsumption {
    /// Whether fewer units were deleted than requested.
    pub fn is_short(&self) -> bool {
        self.deleted < self.requested
    }
}

/// Fulfillment verdict over a whole bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fulfillment {
    Full,
    Partial,
}

/// Per-line consumption audit for a committed bill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConsumptionReport {
    pub lines: Vec<LineConsumption>,
}

impl ConsumptionReport {
    pub fn fulfillment(&self) -> Fulfillment {
        if self.lines.iter().any(LineConsumption::is_short) {
            Fulfillment::Partial
        } else {
            Fulfillment::Full
        }
    }

    pub fn total_deleted(&self) -> u32 {
        self.lines.iter().map(|l| l.deleted).sum()
    }

    /// Lines where fewer units were deleted than requested.
    pub fn short_lines(&self) -> Vec<&LineConsumption> {
        self.lines.iter().filter(|l| l.is_short()).collect()
    }
}

/// Result of a commit: the persisted bill plus the consumption report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommitOutcome {
    pub bill: Bill,
    pub report: ConsumptionReport,
    pub fulfillment: Fulfillment,
}

/// Finalize a bill: consume matching stock and persist the bill.
///
/// Lines are processed in caller order, each selecting units in
/// deterministic (oldest-first) order; the whole selection+deletion runs as
/// one atomic unit in the ledger. The bill is always created, even when some
/// or all requested units could not be found; the bill carries the
/// *requested* quantities and prices while the report carries what was
/// actually deducted, so downstream accounting can reconcile.
pub fn commit_bill(
    ledger: &dyn StockLedger,
    customers: &dyn CustomerLookup,
    warehouses: &dyn WarehouseLookup,
    bills: &dyn BillStore,
    request: CommitRequest,
    created_at: DateTime<Utc>,
) -> DomainResult<CommitOutcome> {
    if request.lines.is_empty() {
        return Err(DomainError::validation("bill must contain at least one line item"));
    }

    let mut demands = Vec::with_capacity(request.lines.len());
    for line in &request.lines {
        let code = ItemCode::new(&line.code)?;
        if line.quantity == 0 {
            return Err(DomainError::validation(format!(
                "quantity for {code} must be positive"
            )));
        }
        require_price("price", line.price)?;
        require_price("master_price", line.master_price)?;
        let prefix = code.prefix();
        demands.push(LineDemand {
            code,
            prefix,
            quantity: line.quantity,
        });
    }

    let customer = customers
        .customer(request.customer_id)
        .ok_or_else(DomainError::not_found)?;
    let warehouse = warehouses
        .warehouse(request.warehouse_id)
        .ok_or_else(DomainError::not_found)?;

    // One atomic unit: no concurrent commit can select the same units.
    let consumed = ledger.consume(request.warehouse_id, &demands);
    let report = ConsumptionReport { lines: consumed };

    let bill_number = bills.next_bill_number();

    let lines: Vec<BillLine> = request
        .lines
        .iter()
        .zip(&demands)
        .map(|(line, demand)| {
            let selected_price = match request.price_type {
                PriceType::Regular => line.price,
                PriceType::Master => line.master_price,
            };
            BillLine {
                code: demand.code.clone(),
                price: line.price,
                master_price: line.master_price,
                selected_price,
                quantity: line.quantity,
                total: selected_price * f64::from(line.quantity),
            }
        })
        .collect();
    let total_amount = lines.iter().map(|l| l.total).sum();

    let bill = Bill {
        id: BillId::new(),
        bill_number: bill_number.clone(),
        customer_id: customer.id,
        customer_name: customer.name.clone(),
        warehouse_id: warehouse.id,
        warehouse_name: warehouse.name.clone(),
        lines,
        total_amount,
        price_type: request.price_type,
        created_at,
        consumption: report.clone(),
    };
    bills.insert(bill.clone());

    let fulfillment = report.fulfillment();
    match fulfillment {
        Fulfillment::Full => {
            tracing::info!(
                bill_number = %bill_number,
                warehouse = %warehouse.name,
                units_deleted = report.total_deleted(),
                "bill committed"
            );
        }
        Fulfillment::Partial => {
            tracing::warn!(
                bill_number = %bill_number,
                warehouse = %warehouse.name,
                units_deleted = report.total_deleted(),
                short_lines = report.short_lines().len(),
                "bill committed with partial fulfillment"
            );
        }
    }

    Ok(CommitOutcome { bill, report, fulfillment })
}

fn require_price(field: &str, value: f64) -> DomainResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(DomainError::validation(format!(
            "{field} must be a non-negative number"
        )));
    }
    Ok(())
}
