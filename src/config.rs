//! Configuration file handling
//!
//! The configuration is a single JSON document with three sections.
//! Every field has a default, so an empty object `{}` is a valid file.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http_server::HttpServerConfig;
use crate::observability::LoggingConfig;
use crate::product::ProductConfig;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),

    #[error("failed to initialize logging: {0}")]
    Logging(String),
}

/// Top-level application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: HttpServerConfig,

    #[serde(default)]
    pub products: ProductConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load and validate configuration from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json_str(&content)
    }

    /// Parse and validate configuration from JSON text
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise use defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;

        if self.products.collection.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "products.collection must not be empty".into(),
            ));
        }

        if self.products.text_index.iter().any(|f| f.trim().is_empty()) {
            return Err(ConfigError::Invalid(
                "products.text_index entries must not be empty".into(),
            ));
        }

        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::Invalid("logging.filter must not be empty".into()));
        }

        Ok(())
    }

    /// Apply `--host` / `--port` overrides from the command line
    pub fn with_overrides(mut self, host: Option<String>, port: Option<u16>) -> Result<Self, ConfigError> {
        if let Some(host) = host {
            self.server.host = host;
        }
        if let Some(port) = port {
            self.server.port = port;
        }
        self.validate()?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::LogFormat;
    use crate::store::ReturnDocument;
    use std::io::Write;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = AppConfig::from_json_str("{}").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.products.collection, "products");
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_partial_sections() {
        let config = AppConfig::from_json_str(
            r#"{
                "server": { "port": 8080 },
                "products": { "validate_updates": true, "return_document": "after" },
                "logging": { "format": "json" }
            }"#,
        )
        .unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert!(config.products.validate_updates);
        assert_eq!(config.products.return_document, ReturnDocument::After);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_zero_port_rejected() {
        let err = AppConfig::from_json_str(r#"{ "server": { "port": 0 } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_empty_collection_rejected() {
        let err =
            AppConfig::from_json_str(r#"{ "products": { "collection": "  " } }"#).unwrap_err();
        assert!(err.to_string().contains("products.collection"));
    }

    #[test]
    fn test_unknown_log_format_rejected() {
        let err =
            AppConfig::from_json_str(r#"{ "logging": { "format": "xml" } }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{ "server": {{ "host": "127.0.0.1", "port": 3000 }} }}"#).unwrap();

        let config = AppConfig::load(file.path()).unwrap();
        assert_eq!(config.server.socket_addr(), "127.0.0.1:3000");
    }

    #[test]
    fn test_load_missing_file() {
        let err = AppConfig::load("/nonexistent/storefront.json").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::default()
            .with_overrides(Some("127.0.0.1".into()), Some(9000))
            .unwrap();
        assert_eq!(config.server.socket_addr(), "127.0.0.1:9000");

        assert!(AppConfig::default().with_overrides(None, Some(0)).is_err());
    }
}
