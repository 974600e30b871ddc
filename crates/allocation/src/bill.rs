//! Bills and bill numbering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockbill_catalog::{ItemCode, PriceType};
use stockbill_core::{BillId, CustomerId, Entity, ValueObject, WarehouseId};

use crate::commit::ConsumptionReport;

/// Sequential bill number, `BILL-` + zero-padded counter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BillNumber(String);

impl BillNumber {
    /// Format the `seq`-th bill number (`1` -> `BILL-000001`). Sequences
    /// past six digits widen rather than truncate.
    pub fn from_seq(seq: u64) -> Self {
        Self(format!("BILL-{seq:06}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for BillNumber {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl ValueObject for BillNumber {}

/// One line of a bill, priced as requested by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillLine {
    pub code: ItemCode,
    pub price: f64,
    pub master_price: f64,
    pub selected_price: f64,
    pub quantity: u32,
    pub total: f64,
}

/// A finalized bill, including the audit trail of what was actually
/// consumed from the stock ledger.
///
/// Line quantities and `total_amount` reflect what was *requested*, not what
/// was deducted; the consumption report carries the discrepancy, if any.
/// `total_amount` equals the sum of line totals at creation time and is
/// never recomputed afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub id: BillId,
    pub bill_number: BillNumber,
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub warehouse_id: WarehouseId,
    pub warehouse_name: String,
    pub lines: Vec<BillLine>,
    pub total_amount: f64,
    pub price_type: PriceType,
    pub created_at: DateTime<Utc>,
    pub consumption: ConsumptionReport,
}

impl Entity for Bill {
    type Id = BillId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
