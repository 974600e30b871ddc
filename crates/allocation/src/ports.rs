//! Boundary contracts between the engine and its collaborators.
//!
//! Customer/warehouse CRUD, intake, and persistence are external concerns;
//! the engine only consumes these narrow lookup/store interfaces.

use serde::{Deserialize, Serialize};

use stockbill_catalog::{ItemCode, Prefix};
use stockbill_core::{BillId, CustomerId, WarehouseId};
use stockbill_directory::{Customer, Warehouse};
use stockbill_ledger::StockUnit;

use crate::bill::{Bill, BillNumber};
use crate::commit::LineConsumption;

/// One bill line's stock demand, in caller order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineDemand {
    pub code: ItemCode,
    pub prefix: Prefix,
    pub quantity: u32,
}

/// Matching stock present in a warehouse other than the requested one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlternativeStock {
    pub warehouse_id: WarehouseId,
    pub warehouse_name: String,
    pub available_quantity: u32,
}

/// Customer lookup consumed by the engine.
pub trait CustomerLookup: Send + Sync {
    fn customer(&self, id: CustomerId) -> Option<Customer>;
}

/// Warehouse lookup consumed by the engine.
pub trait WarehouseLookup: Send + Sync {
    fn warehouse(&self, id: WarehouseId) -> Option<Warehouse>;

    /// The full warehouse set, in a stable listing order.
    fn warehouses(&self) -> Vec<Warehouse>;
}

/// Durable store of individual stock units.
pub trait StockLedger: Send + Sync {
    /// Units in `warehouse_id` whose code starts with `prefix`, in
    /// allocation order (oldest first). Read-only.
    fn matching_units(&self, warehouse_id: WarehouseId, prefix: &Prefix) -> Vec<StockUnit>;

    /// Matching stock in every *other* warehouse, grouped per warehouse.
    /// Read-only.
    fn matching_elsewhere(&self, exclude: WarehouseId, prefix: &Prefix) -> Vec<AlternativeStock>;

    /// Select and delete up to `quantity` units per demand, processing the
    /// demands in the order given.
    ///
    /// Contract: the whole call is one atomic unit. Implementations must
    /// serialize it against concurrent `consume` calls so that no two
    /// commits can select the same unit. Under-fulfillment is not an error;
    /// each returned entry reports requested vs. actually-deleted counts.
    fn consume(&self, warehouse_id: WarehouseId, demands: &[LineDemand]) -> Vec<LineConsumption>;
}

/// Persistent bill store plus the bill-number sequence.
pub trait BillStore: Send + Sync {
    /// Mint the next bill number. Must be collision-safe under concurrent
    /// commits (atomic increment, never a snapshot count).
    fn next_bill_number(&self) -> BillNumber;

    fn insert(&self, bill: Bill);

    fn bill(&self, id: BillId) -> Option<Bill>;

    /// All bills, newest first.
    fn bills(&self) -> Vec<Bill>;

    /// Bills for one customer, newest first.
    fn bills_for_customer(&self, customer_id: CustomerId) -> Vec<Bill>;
}
