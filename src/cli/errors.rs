//! CLI-specific error types
//!
//! Every CLI error is fatal: `main` prints it and exits non-zero.

use std::io;

use thiserror::Error;

use crate::config::ConfigError;
use crate::schema::ValidationError;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("server failed: {0}")]
    Server(String),
}

impl CliError {
    /// Stable error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "STOREFRONT_CLI_CONFIG_ERROR",
            Self::Io(_) => "STOREFRONT_CLI_IO_ERROR",
            Self::Json(_) => "STOREFRONT_CLI_JSON_ERROR",
            Self::Validation(_) => "STOREFRONT_CLI_VALIDATION_ERROR",
            Self::Server(_) => "STOREFRONT_CLI_SERVER_ERROR",
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        let err = CliError::Server("bind failed".into());
        assert_eq!(err.code(), "STOREFRONT_CLI_SERVER_ERROR");
        assert_eq!(err.to_string(), "server failed: bind failed");

        let err: CliError = ConfigError::Invalid("server.port must be > 0".into()).into();
        assert_eq!(err.code(), "STOREFRONT_CLI_CONFIG_ERROR");
    }
}
