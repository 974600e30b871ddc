//! In-memory implementations of the allocation engine's ports.
//!
//! All stores are `RwLock`-guarded vectors: availability reads run in
//! parallel, while `consume` executes a whole bill's selection + deletion
//! under one write lock so concurrent commits can never select the same
//! stock unit.

pub mod bills;
pub mod catalog;
pub mod directory;
pub mod stock;

pub use bills::InMemoryBillStore;
pub use catalog::InMemoryCatalog;
pub use directory::InMemoryDirectory;
pub use stock::InMemoryStockLedger;
