//! CLI module for storefront
//!
//! Provides command-line interface for:
//! - start: Serve the product API
//! - validate: Check a product JSON file against the schema
//! - config: Print the effective configuration

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{run, run_command, show_config, start, validate, validate_value};
pub use errors::{CliError, CliResult};
