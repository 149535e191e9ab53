//! # Products
//!
//! Product records, the patch casting applied on update, and the
//! persistence accessor the HTTP handlers call.

pub mod model;
pub mod service;

pub use model::{cast_patch, Inventory, Product, ProductFields, Variant};
pub use service::{ProductConfig, ProductError, ProductResult, ProductService};
