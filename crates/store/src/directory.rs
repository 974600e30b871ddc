//! In-memory customer and warehouse registry.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use stockbill_allocation::{CustomerLookup, WarehouseLookup};
use stockbill_core::{CustomerId, DomainError, DomainResult, WarehouseId};
use stockbill_directory::{Customer, Warehouse};

/// Customers and warehouses behind independent locks.
#[derive(Debug, Default)]
pub struct InMemoryDirectory {
    customers: RwLock<Vec<Customer>>,
    warehouses: RwLock<Vec<Warehouse>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_customer(&self, customer: Customer) {
        write(&self.customers).push(customer);
    }

    /// All customers, newest first.
    pub fn customers(&self) -> Vec<Customer> {
        let mut out = read(&self.customers).clone();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        out
    }

    /// Replace the customer with the same id. `NotFound` if absent.
    pub fn update_customer(&self, updated: Customer) -> DomainResult<Customer> {
        let mut customers = write(&self.customers);
        match customers.iter_mut().find(|c| c.id == updated.id) {
            Some(slot) => {
                *slot = updated.clone();
                Ok(updated)
            }
            None => Err(DomainError::not_found()),
        }
    }

    pub fn remove_customer(&self, id: CustomerId) -> DomainResult<()> {
        let mut customers = write(&self.customers);
        let before = customers.len();
        customers.retain(|c| c.id != id);
        if customers.len() == before {
            return Err(DomainError::not_found());
        }
        Ok(())
    }

    pub fn insert_warehouse(&self, warehouse: Warehouse) {
        write(&self.warehouses).push(warehouse);
    }

    pub fn update_warehouse(&self, updated: Warehouse) -> DomainResult<Warehouse> {
        let mut warehouses = write(&self.warehouses);
        match warehouses.iter_mut().find(|w| w.id == updated.id) {
            Some(slot) => {
                *slot = updated.clone();
                Ok(updated)
            }
            None => Err(DomainError::not_found()),
        }
    }

    pub fn remove_warehouse(&self, id: WarehouseId) -> DomainResult<()> {
        let mut warehouses = write(&self.warehouses);
        let before = warehouses.len();
        warehouses.retain(|w| w.id != id);
        if warehouses.len() == before {
            return Err(DomainError::not_found());
        }
        Ok(())
    }
}

impl CustomerLookup for InMemoryDirectory {
    fn customer(&self, id: CustomerId) -> Option<Customer> {
        read(&self.customers).iter().find(|c| c.id == id).cloned()
    }
}

impl WarehouseLookup for InMemoryDirectory {
    fn warehouse(&self, id: WarehouseId) -> Option<Warehouse> {
        read(&self.warehouses).iter().find(|w| w.id == id).cloned()
    }

    fn warehouses(&self) -> Vec<Warehouse> {
        let mut out = read(&self.warehouses).clone();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        out
    }
}

fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
