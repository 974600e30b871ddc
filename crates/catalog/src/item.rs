//! Priced catalog items, scoped to a single customer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockbill_core::{CatalogItemId, CustomerId, DomainError, DomainResult, Entity};

use crate::code::ItemCode;

/// Which of the two catalog prices a bill uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriceType {
    #[default]
    Regular,
    Master,
}

/// A priced item definition belonging to exactly one customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: CatalogItemId,
    pub customer_id: CustomerId,
    pub code: ItemCode,
    pub price: f64,
    pub master_price: f64,
    pub created_at: DateTime<Utc>,
}

impl CatalogItem {
    pub fn new(
        customer_id: CustomerId,
        code: ItemCode,
        price: f64,
        master_price: f64,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        validate_price("price", price)?;
        validate_price("master_price", master_price)?;
        Ok(Self {
            id: CatalogItemId::new(),
            customer_id,
            code,
            price,
            master_price,
            created_at,
        })
    }

    /// Unit price under the given price type.
    pub fn unit_price(&self, price_type: PriceType) -> f64 {
        match price_type {
            PriceType::Regular => self.price,
            PriceType::Master => self.master_price,
        }
    }
}

impl Entity for CatalogItem {
    type Id = CatalogItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

pub(crate) fn validate_price(field: &str, value: f64) -> DomainResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(DomainError::validation(format!(
            "{field} must be a non-negative number"
        )));
    }
    Ok(())
}
