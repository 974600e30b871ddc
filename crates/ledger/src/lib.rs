//! Stock ledger domain module.
//!
//! The ledger tracks individual, countable stock units. There is no quantity
//! field anywhere: quantity is the count of records, and consuming a unit
//! deletes its record.

pub mod matcher;
pub mod unit;

pub use matcher::{allocation_order, match_units, select_for_allocation};
pub use unit::StockUnit;
