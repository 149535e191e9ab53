//! Schema type definitions
//!
//! Supported types:
//! - string: UTF-8 string, with an optional minimum length
//! - number: JSON number (integer or float), with an optional minimum
//! - bool: Boolean
//! - object: Nested object with an ordered field list
//! - array: Homogeneous array with element type

use serde::{Deserialize, Serialize};

/// A minimum-bound rule with the message reported when it is violated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bound<T> {
    pub min: T,
    pub message: String,
}

impl<T> Bound<T> {
    pub fn new(min: T, message: impl Into<String>) -> Self {
        Self {
            min,
            message: message.into(),
        }
    }
}

/// Supported field types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldType {
    /// UTF-8 string
    String {
        /// Minimum length in characters
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_len: Option<Bound<usize>>,
    },
    /// 64-bit floating point (integers accepted)
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<Bound<f64>>,
    },
    /// Boolean
    Bool,
    /// Nested object with its own field schema
    Object {
        /// Nested field definitions, in reporting order
        fields: Vec<FieldDef>,
    },
    /// Homogeneous array with single element type
    Array {
        /// Element type (boxed to allow recursive types)
        element_type: Box<FieldType>,
    },
}

impl FieldType {
    /// Returns the type name used in mismatch messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::String { .. } => "string",
            FieldType::Number { .. } => "number",
            FieldType::Bool => "boolean",
            FieldType::Object { .. } => "object",
            FieldType::Array { .. } => "array",
        }
    }

    /// A string with a minimum length of one
    pub fn non_empty_string(message: impl Into<String>) -> Self {
        FieldType::String {
            min_len: Some(Bound::new(1, message)),
        }
    }

    /// A number that must be at least zero
    pub fn non_negative_number(message: impl Into<String>) -> Self {
        FieldType::Number {
            min: Some(Bound::new(0.0, message)),
        }
    }
}

/// Field definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    /// Field data type
    #[serde(flatten)]
    pub field_type: FieldType,
    /// Whether field must be present
    pub required: bool,
}

impl FieldDef {
    /// Create a required field of the given type
    pub fn required(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: true,
        }
    }

    /// Create an optional field of the given type
    pub fn optional(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            required: false,
        }
    }

    /// Create a required array field
    pub fn required_array(name: impl Into<String>, element_type: FieldType) -> Self {
        Self::required(
            name,
            FieldType::Array {
                element_type: Box::new(element_type),
            },
        )
    }

    /// Create a required object field
    pub fn required_object(name: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        Self::required(name, FieldType::Object { fields })
    }
}

/// Complete schema definition for one record kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Record kind this schema describes
    pub name: String,
    /// Top-level field definitions, in reporting order
    pub fields: Vec<FieldDef>,
}

impl Schema {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Looks up a top-level field definition by name
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Validates the schema structure itself (not a document)
    pub fn validate_structure(&self) -> Result<(), String> {
        check_unique_names(&self.fields, "")
    }
}

fn check_unique_names(fields: &[FieldDef], prefix: &str) -> Result<(), String> {
    let mut seen = std::collections::HashSet::new();
    for field in fields {
        if !seen.insert(field.name.as_str()) {
            return Err(format!("Field '{}{}' is declared twice", prefix, field.name));
        }
        if let FieldType::Object { fields: nested } = &field.field_type {
            check_unique_names(nested, &format!("{}{}.", prefix, field.name))?;
        }
    }
    Ok(())
}
