//! Observability for storefront
//!
//! Structured logging through `tracing`. Request spans are added by the
//! HTTP layer; this module only installs the subscriber.

mod logging;

pub use logging::{init, LogFormat, LoggingConfig};
