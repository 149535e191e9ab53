//! Schema Validator subsystem
//!
//! Schemas are declarative descriptions of a record's shape. The validator
//! checks a JSON document against one and either returns a normalized copy
//! or every violated rule.
//!
//! # Design Principles
//!
//! - Pure: no side effects, same input gives the same result
//! - All violations reported, in schema order
//! - Undeclared fields stripped, never rejected

mod errors;
mod product;
mod types;
mod validator;

pub use errors::{ValidationError, ValidationIssue, ValidationResult};
pub use product::product_schema;
pub use types::{Bound, FieldDef, FieldType, Schema};
pub use validator::SchemaValidator;
