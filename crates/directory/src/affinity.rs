//! Location-affinity ranking of warehouses against a customer's address.
//!
//! The rule is a plain partition: a warehouse matches when its city AND state
//! equal the customer's, case-insensitively. No partial-match scoring, no
//! distance metric.

use serde::Serialize;

use crate::customer::Customer;
use crate::warehouse::Warehouse;

/// Warehouses split by whether they share the customer's city and state.
/// Input order is preserved within each half.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocationPartition {
    pub matching: Vec<Warehouse>,
    pub non_matching: Vec<Warehouse>,
}

/// Partition the full warehouse set for one customer. Pure function.
pub fn partition_by_location(customer: &Customer, warehouses: Vec<Warehouse>) -> LocationPartition {
    let city = customer.city.to_lowercase();
    let state = customer.state.to_lowercase();

    let mut matching = Vec::new();
    let mut non_matching = Vec::new();
    for warehouse in warehouses {
        if warehouse.city.to_lowercase() == city && warehouse.state.to_lowercase() == state {
            matching.push(warehouse);
        } else {
            non_matching.push(warehouse);
        }
    }

    LocationPartition { matching, non_matching }
}
