//! storefront - product catalog over HTTP
//!
//! Every write passes through the same pipeline: the schema validator
//! checks the body, the product accessor issues one call against the
//! document store, and the HTTP layer wraps the outcome in the response
//! envelope.

pub mod cli;
pub mod config;
pub mod http_server;
pub mod observability;
pub mod product;
pub mod schema;
pub mod store;
