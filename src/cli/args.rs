//! CLI argument definitions using clap
//!
//! Commands:
//! - storefront start [--config <path>] [--host <host>] [--port <port>]
//! - storefront validate <file>
//! - storefront config [--config <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// storefront - product catalog API
#[derive(Parser, Debug)]
#[command(name = "storefront")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Start {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Host to bind to (overrides the config file)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides the config file)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Validate a product JSON file against the product schema
    Validate {
        /// Path to a JSON file holding one product
        file: PathBuf,
    },

    /// Print the effective configuration
    Config {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
