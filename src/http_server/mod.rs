//! # HTTP Server Module
//!
//! Combines the product endpoints and status routes into one Axum server.
//!
//! # Endpoints
//!
//! - `/` - Running banner
//! - `/health` - Health check
//! - `/api/products` - Create and list/search products
//! - `/api/products/:productId` - Get, update, delete one product

pub mod config;
pub mod envelope;
pub mod product_routes;
pub mod server;
pub mod status_routes;

pub use config::HttpServerConfig;
pub use envelope::{ErrorEnvelope, StatusEnvelope, SuccessEnvelope};
pub use product_routes::ProductState;
pub use server::HttpServer;
