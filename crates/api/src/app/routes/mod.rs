use axum::Router;

pub mod billing;
pub mod catalog;
pub mod customers;
pub mod stock;
pub mod system;
pub mod warehouses;

/// Router for all application endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/customers", customers::router())
        .nest("/warehouses", warehouses::router())
        .nest("/catalog", catalog::router())
        .nest("/stock", stock::router())
        .nest("/billing", billing::router())
}
