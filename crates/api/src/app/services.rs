//! Service wiring: in-memory stores plus the billing engine facade.

use std::sync::Arc;

use stockbill_allocation::BillingService;
use stockbill_store::{InMemoryBillStore, InMemoryCatalog, InMemoryDirectory, InMemoryStockLedger};

/// Everything the handlers need, shared via `Extension<Arc<AppServices>>`.
pub struct AppServices {
    pub directory: Arc<InMemoryDirectory>,
    pub catalog: Arc<InMemoryCatalog>,
    pub ledger: Arc<InMemoryStockLedger>,
    pub bills: Arc<InMemoryBillStore>,
    pub billing: BillingService,
}

impl AppServices {
    pub fn new() -> Self {
        let directory = Arc::new(InMemoryDirectory::new());
        let catalog = Arc::new(InMemoryCatalog::new());
        let ledger = Arc::new(InMemoryStockLedger::new());
        let bills = Arc::new(InMemoryBillStore::new());

        let billing = BillingService::new(
            ledger.clone(),
            directory.clone(),
            directory.clone(),
            bills.clone(),
        );

        Self { directory, catalog, ledger, bills, billing }
    }
}

impl Default for AppServices {
    fn default() -> Self {
        Self::new()
    }
}
