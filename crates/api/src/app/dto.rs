//! Request DTOs and mapping helpers.

use serde::Deserialize;

use stockbill_core::DomainError;

use crate::app::errors;

#[derive(Debug, Deserialize)]
pub struct CustomerRequest {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub gst_no: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WarehouseRequest {
    pub name: String,
    #[serde(default)]
    pub address: String,
    pub city: String,
    pub state: String,
}

#[derive(Debug, Deserialize)]
pub struct CatalogItemCreate {
    pub customer_id: String,
    pub code: String,
    pub price: f64,
    pub master_price: f64,
}

#[derive(Debug, Deserialize)]
pub struct CatalogItemUpdate {
    pub code: String,
    pub price: f64,
    pub master_price: f64,
}

#[derive(Debug, Deserialize)]
pub struct BulkCatalogRequest {
    pub items: Vec<CatalogItemUpdate>,
}

#[derive(Debug, Deserialize)]
pub struct StockIntakeRequest {
    pub warehouse_id: String,
    pub codes: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct StockQuery {
    pub warehouse_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityRequest {
    pub warehouse_id: String,
    pub items: Vec<stockbill_allocation::RequestedItem>,
}

/// Commit body with string ids, parsed explicitly so malformed ids get the
/// same `invalid_id` response as path parameters.
#[derive(Debug, Deserialize)]
pub struct CommitBillRequest {
    pub customer_id: String,
    pub warehouse_id: String,
    pub lines: Vec<stockbill_allocation::BillLineRequest>,
    #[serde(default)]
    pub price_type: stockbill_catalog::PriceType,
}

/// Parse a path/body id into its typed form, mapping failure to a 400.
pub fn parse_id<T>(raw: &str) -> Result<T, axum::response::Response>
where
    T: std::str::FromStr<Err = DomainError>,
{
    raw.parse().map_err(errors::domain_error_to_response)
}
