//! Warehouse (godown) records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockbill_core::{DomainResult, Entity, WarehouseId};

use crate::customer::require_non_blank;

/// A physical storage location holding stock units.
///
/// Login credentials from the original admin flows are out of scope and not
/// modeled here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: WarehouseId,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub created_at: DateTime<Utc>,
}

impl Warehouse {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let name = name.into();
        let address = address.into();
        let city = city.into();
        let state = state.into();
        require_non_blank("name", &name)?;
        require_non_blank("city", &city)?;
        require_non_blank("state", &state)?;
        Ok(Self {
            id: WarehouseId::new(),
            name,
            address,
            city,
            state,
            created_at,
        })
    }
}

impl Entity for Warehouse {
    type Id = WarehouseId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
