//! # Store Errors
//!
//! Failures raised by the document store. Every variant carries a stable
//! `name` so callers can echo a structured error object.

use serde_json::{json, Value};
use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Document store errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// Id is not a 24-digit hex string
    #[error("Cast to ObjectId failed for value \"{value}\" (type string) at path \"_id\"")]
    InvalidId { value: String },

    /// Value cannot be cast to the field's declared type
    #[error("Cast to {expected} failed for value \"{value}\" (type {actual}) at path \"{path}\"")]
    Cast {
        path: String,
        expected: &'static str,
        actual: &'static str,
        value: String,
    },

    /// Write would duplicate a uniquely indexed value
    #[error("E11000 duplicate key error collection: {collection} index: {field}_1 dup key: {{ {field}: {value} }}")]
    DuplicateKey {
        collection: String,
        field: String,
        value: String,
    },

    /// Update tried to change an immutable field
    #[error("Performing an update on the path '{field}' would modify the immutable field '{field}'")]
    ImmutableField { field: String },

    /// Dotted update path runs through a non-object value
    #[error("Cannot create field '{field}' in element {{{parent}: {existing}}}")]
    PathConflict {
        field: String,
        parent: String,
        existing: String,
    },

    /// Text search on a collection without a text index
    #[error("text index required for $text query")]
    MissingTextIndex,

    /// Stored document no longer decodes into its record type
    #[error("Document {id} is malformed: {reason}")]
    Decode { id: String, reason: String },
}

impl StoreError {
    /// Stable error name reported to callers
    pub fn name(&self) -> &'static str {
        match self {
            StoreError::InvalidId { .. } | StoreError::Cast { .. } => "CastError",
            StoreError::DuplicateKey { .. } => "DuplicateKeyError",
            StoreError::ImmutableField { .. } | StoreError::PathConflict { .. } => "WriteError",
            StoreError::MissingTextIndex => "TextIndexError",
            StoreError::Decode { .. } => "DecodeError",
        }
    }

    /// Field path the error is about, if any
    pub fn path(&self) -> Option<&str> {
        match self {
            StoreError::InvalidId { .. } => Some("_id"),
            StoreError::Cast { path, .. } => Some(path),
            StoreError::DuplicateKey { field, .. }
            | StoreError::ImmutableField { field }
            | StoreError::PathConflict { field, .. } => Some(field),
            StoreError::MissingTextIndex | StoreError::Decode { .. } => None,
        }
    }

    /// Structured error object: `{name, message, path?}`
    pub fn to_json(&self) -> Value {
        let mut body = json!({
            "name": self.name(),
            "message": self.to_string(),
        });
        if let Some(path) = self.path() {
            body["path"] = Value::String(path.to_string());
        }
        body
    }
}
