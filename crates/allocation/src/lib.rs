//! Stock-allocation engine: availability checking and bill commit.
//!
//! The engine talks to its collaborators through the ports in [`ports`];
//! checking availability is read-only and idempotent, committing a bill
//! consumes stock (deletes units) and persists the bill in one pass.

pub mod availability;
pub mod bill;
pub mod commit;
pub mod ports;
pub mod service;

pub use availability::{check_availability, AllocationResult, AvailabilityStatus, RequestedItem};
pub use bill::{Bill, BillLine, BillNumber};
pub use commit::{
    commit_bill, BillLineRequest, CommitOutcome, CommitRequest, ConsumptionReport, Fulfillment,
    LineConsumption,
};
pub use ports::{AlternativeStock, BillStore, CustomerLookup, LineDemand, StockLedger, WarehouseLookup};
pub use service::BillingService;
