//! In-memory stock ledger.

use std::sync::{PoisonError, RwLock};

use stockbill_allocation::{AlternativeStock, LineConsumption, LineDemand, StockLedger};
use stockbill_catalog::Prefix;
use stockbill_core::{StockUnitId, WarehouseId};
use stockbill_ledger::{select_for_allocation, StockUnit};

/// RwLock-guarded vector of stock units.
#[derive(Debug, Default)]
pub struct InMemoryStockLedger {
    inner: RwLock<Vec<StockUnit>>,
}

impl InMemoryStockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intake: one record per physical unit received.
    pub fn add(&self, unit: StockUnit) {
        self.write().push(unit);
    }

    /// All units, optionally narrowed to one warehouse.
    pub fn list(&self, warehouse_id: Option<WarehouseId>) -> Vec<StockUnit> {
        self.read()
            .iter()
            .filter(|u| warehouse_id.is_none_or(|w| u.warehouse_id == w))
            .cloned()
            .collect()
    }

    /// Remove a single unit by id (intake corrections).
    pub fn remove(&self, id: StockUnitId) -> bool {
        let mut units = self.write();
        let before = units.len();
        units.retain(|u| u.id != id);
        units.len() != before
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<StockUnit>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<StockUnit>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StockLedger for InMemoryStockLedger {
    fn matching_units(&self, warehouse_id: WarehouseId, prefix: &Prefix) -> Vec<StockUnit> {
        let units = self.read();
        let in_warehouse = units.iter().filter(|u| u.warehouse_id == warehouse_id);
        select_for_allocation(prefix, in_warehouse, usize::MAX)
            .into_iter()
            .cloned()
            .collect()
    }

    fn matching_elsewhere(&self, exclude: WarehouseId, prefix: &Prefix) -> Vec<AlternativeStock> {
        let units = self.read();
        let mut grouped: Vec<AlternativeStock> = Vec::new();
        for unit in units.iter() {
            if unit.warehouse_id == exclude || !prefix.matches(&unit.code) {
                continue;
            }
            match grouped.iter_mut().find(|g| g.warehouse_id == unit.warehouse_id) {
                Some(g) => g.available_quantity += 1,
                None => grouped.push(AlternativeStock {
                    warehouse_id: unit.warehouse_id,
                    warehouse_name: unit.warehouse_name.clone(),
                    available_quantity: 1,
                }),
            }
        }
        grouped.sort_by(|a, b| a.warehouse_name.cmp(&b.warehouse_name));
        grouped
    }

    fn consume(&self, warehouse_id: WarehouseId, demands: &[LineDemand]) -> Vec<LineConsumption> {
        // One write lock for the whole bill: selection and deletion for all
        // lines are a single critical section.
        let mut units = self.write();
        let mut report = Vec::with_capacity(demands.len());

        for demand in demands {
            let selected: Vec<(StockUnitId, String)> = {
                let in_warehouse = units.iter().filter(|u| u.warehouse_id == warehouse_id);
                select_for_allocation(&demand.prefix, in_warehouse, demand.quantity as usize)
                    .into_iter()
                    .map(|u| (u.id, u.code.clone()))
                    .collect()
            };
            units.retain(|u| !selected.iter().any(|(id, _)| *id == u.id));

            let deleted = selected.len() as u32;
            tracing::debug!(
                prefix = %demand.prefix,
                requested = demand.quantity,
                deleted,
                "consumed stock units"
            );
            report.push(LineConsumption {
                code: demand.code.clone(),
                prefix: demand.prefix.clone(),
                requested: demand.quantity,
                found: deleted,
                deleted,
                deleted_codes: selected.into_iter().map(|(_, code)| code).collect(),
            });
        }

        report
    }
}
