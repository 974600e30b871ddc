//! Catalog domain module: per-customer priced item definitions.
//!
//! A catalog item's `code` carries no referential integrity with stock unit
//! codes beyond the prefix relationship: the first three characters of the
//! code are the key that matches it to more specific stock unit codes.

pub mod code;
pub mod item;

pub use code::{ItemCode, Prefix, PREFIX_LEN};
pub use item::{CatalogItem, PriceType};
