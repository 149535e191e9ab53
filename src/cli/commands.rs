//! CLI command implementations
//!
//! `start` is the only command that touches the network or installs the
//! log subscriber. `validate` and `config` are one-shot and print JSON.

use std::path::Path;

use serde_json::Value;
use tracing::info;

use crate::config::AppConfig;
use crate::http_server::HttpServer;
use crate::observability;
use crate::product::ProductService;
use crate::schema::{product_schema, SchemaValidator};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{read_json_file, write_json};

/// Parse CLI args and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Start { config, host, port } => start(config.as_deref(), host, port),
        Command::Validate { file } => validate(&file),
        Command::Config { config } => show_config(config.as_deref()),
    }
}

/// Boot logging, build the product store and serve until Ctrl-C
pub fn start(config_path: Option<&Path>, host: Option<String>, port: Option<u16>) -> CliResult<()> {
    let config = AppConfig::load_or_default(config_path)?.with_overrides(host, port)?;

    observability::init(&config.logging)?;
    let source = match config_path {
        Some(path) => path.display().to_string(),
        None => "<defaults>".to_string(),
    };
    info!(
        config = %source,
        collection = %config.products.collection,
        validate_updates = config.products.validate_updates,
        "starting storefront"
    );

    let products = ProductService::in_memory(&config.products);
    let server = HttpServer::new(config.server, products);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::Server(format!("failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::Server(e.to_string()))
    })
}

/// Validate one product document and print its normalized form
pub fn validate(file: &Path) -> CliResult<()> {
    let normalized = validate_value(&read_json_file(file)?)?;
    write_json(&normalized)
}

/// Schema check shared by `validate`; unknown keys are stripped
pub fn validate_value(input: &Value) -> CliResult<Value> {
    let validator = SchemaValidator::new(product_schema());
    let normalized = validator.validate(input)?;
    Ok(Value::Object(normalized))
}

/// Print the effective configuration
pub fn show_config(config_path: Option<&Path>) -> CliResult<()> {
    let config = AppConfig::load_or_default(config_path)?;
    write_json(&config)
}
