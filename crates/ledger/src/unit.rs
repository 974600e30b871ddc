//! Stock units: one record per physical item.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockbill_core::{DomainError, DomainResult, Entity, StockUnitId, WarehouseId};

/// One discrete physical unit of stock, present in exactly one warehouse.
///
/// A unit is either present (available) or deleted (consumed); there is no
/// intermediate reserved state. The warehouse is referenced by stable id;
/// `warehouse_name` is a display cache only and never used for matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockUnit {
    pub id: StockUnitId,
    pub code: String,
    pub warehouse_id: WarehouseId,
    pub warehouse_name: String,
    pub added_at: DateTime<Utc>,
}

impl StockUnit {
    pub fn new(
        code: impl Into<String>,
        warehouse_id: WarehouseId,
        warehouse_name: impl Into<String>,
        added_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let code = code.into();
        let trimmed = code.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("stock unit code cannot be empty"));
        }
        Ok(Self {
            id: StockUnitId::new(),
            code: trimmed.to_string(),
            warehouse_id,
            warehouse_name: warehouse_name.into(),
            added_at,
        })
    }
}

impl Entity for StockUnit {
    type Id = StockUnitId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
