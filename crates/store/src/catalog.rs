//! In-memory catalog of per-customer priced items.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use stockbill_catalog::CatalogItem;
use stockbill_core::{CatalogItemId, CustomerId, DomainError, DomainResult};

#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    inner: RwLock<Vec<CatalogItem>>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, item: CatalogItem) {
        self.write().push(item);
    }

    pub fn item(&self, id: CatalogItemId) -> Option<CatalogItem> {
        self.read().iter().find(|i| i.id == id).cloned()
    }

    /// One customer's items, sorted by code.
    pub fn items_for_customer(&self, customer_id: CustomerId) -> Vec<CatalogItem> {
        let mut out: Vec<CatalogItem> = self
            .read()
            .iter()
            .filter(|i| i.customer_id == customer_id)
            .cloned()
            .collect();
        out.sort_by(|a, b| a.code.as_str().cmp(b.code.as_str()));
        out
    }

    pub fn update(&self, updated: CatalogItem) -> DomainResult<CatalogItem> {
        let mut items = self.write();
        match items.iter_mut().find(|i| i.id == updated.id) {
            Some(slot) => {
                *slot = updated.clone();
                Ok(updated)
            }
            None => Err(DomainError::not_found()),
        }
    }

    pub fn remove(&self, id: CatalogItemId) -> DomainResult<()> {
        let mut items = self.write();
        let before = items.len();
        items.retain(|i| i.id != id);
        if items.len() == before {
            return Err(DomainError::not_found());
        }
        Ok(())
    }

    /// Bulk import: drop the customer's current items and install `items`.
    /// Returns the number installed.
    pub fn replace_for_customer(
        &self,
        customer_id: CustomerId,
        items: Vec<CatalogItem>,
    ) -> DomainResult<usize> {
        if items.iter().any(|i| i.customer_id != customer_id) {
            return Err(DomainError::validation(
                "bulk import items must all belong to the target customer",
            ));
        }
        let count = items.len();
        let mut all = self.write();
        all.retain(|i| i.customer_id != customer_id);
        all.extend(items);
        Ok(count)
    }

    fn read(&self) -> RwLockReadGuard<'_, Vec<CatalogItem>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Vec<CatalogItem>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}
