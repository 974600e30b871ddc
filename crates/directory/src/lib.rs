//! Directory domain module: customers, warehouses, and location affinity.

pub mod affinity;
pub mod customer;
pub mod warehouse;

pub use affinity::{partition_by_location, LocationPartition};
pub use customer::Customer;
pub use warehouse::Warehouse;
