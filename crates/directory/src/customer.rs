//! Customer records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockbill_core::{CustomerId, DomainError, DomainResult, Entity};

/// A billed customer. The city/state pair drives warehouse affinity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub gst_no: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        gst_no: Option<String>,
        phone: Option<String>,
        created_at: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let name = name.into();
        let address = address.into();
        let city = city.into();
        let state = state.into();
        require_non_blank("name", &name)?;
        require_non_blank("address", &address)?;
        require_non_blank("city", &city)?;
        require_non_blank("state", &state)?;
        Ok(Self {
            id: CustomerId::new(),
            name,
            address,
            city,
            state,
            gst_no,
            phone,
            created_at,
        })
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

pub(crate) fn require_non_blank(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!("{field} cannot be empty")));
    }
    Ok(())
}
