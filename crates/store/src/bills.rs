//! In-memory bill store and the bill-number sequence.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use stockbill_allocation::{Bill, BillNumber, BillStore};
use stockbill_core::{BillId, CustomerId};

/// Bills plus an atomic counter for numbering.
///
/// The counter is incremented with `fetch_add`, never derived from a count
/// of stored bills, so concurrent commits cannot mint the same number.
#[derive(Debug, Default)]
pub struct InMemoryBillStore {
    inner: RwLock<Vec<Bill>>,
    sequence: AtomicU64,
}

impl InMemoryBillStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<Bill>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<Bill>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl BillStore for InMemoryBillStore {
    fn next_bill_number(&self) -> BillNumber {
        BillNumber::from_seq(self.sequence.fetch_add(1, Ordering::Relaxed) + 1)
    }

    fn insert(&self, bill: Bill) {
        self.write().push(bill);
    }

    fn bill(&self, id: BillId) -> Option<Bill> {
        self.read().iter().find(|b| b.id == id).cloned()
    }

    fn bills(&self) -> Vec<Bill> {
        let mut out = self.read().clone();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        out
    }

    fn bills_for_customer(&self, customer_id: CustomerId) -> Vec<Bill> {
        let mut out: Vec<Bill> = self
            .read()
            .iter()
            .filter(|b| b.customer_id == customer_id)
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        out
    }
}
