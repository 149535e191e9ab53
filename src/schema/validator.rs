//! Schema validator for document validation
//!
//! Validation semantics:
//! - All required fields are present
//! - Field types exactly match schema types (integers count as numbers)
//! - Bound rules (minimum length, minimum value) hold
//! - Undeclared fields are stripped from the normalized output
//!
//! Unlike a first-failure check, every violation is collected so the caller
//! can report all of them at once.

use serde_json::{Map, Value};

use super::errors::{ValidationError, ValidationIssue, ValidationResult};
use super::types::{FieldDef, FieldType, Schema};

/// Schema validator that enforces schema rules on documents.
///
/// Validator does not mutate its input; it returns a normalized copy.
#[derive(Debug, Clone)]
pub struct SchemaValidator {
    schema: Schema,
}

impl SchemaValidator {
    /// Creates a new validator for the given schema.
    pub fn new(schema: Schema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Validates a full document.
    ///
    /// Returns the document restricted to declared fields.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` carrying one issue per violated rule.
    pub fn validate(&self, document: &Value) -> ValidationResult<Map<String, Value>> {
        let mut issues = Vec::new();
        let normalized = match document.as_object() {
            Some(obj) => validate_object(obj, &self.schema.fields, "", &mut issues),
            None => {
                issues.push(type_issue("", "object", document));
                Map::new()
            }
        };
        finish(normalized, issues)
    }

    /// Validates only the fields present in `patch`.
    ///
    /// Missing fields are not reported, at any depth: a nested object is
    /// checked key by key. Arrays are checked in full.
    pub fn validate_partial(&self, patch: &Value) -> ValidationResult<Map<String, Value>> {
        let mut issues = Vec::new();
        let normalized = match patch.as_object() {
            Some(obj) => validate_partial_object(obj, &self.schema.fields, "", &mut issues),
            None => {
                issues.push(type_issue("", "object", patch));
                Map::new()
            }
        };
        finish(normalized, issues)
    }
}

fn finish(
    normalized: Map<String, Value>,
    issues: Vec<ValidationIssue>,
) -> ValidationResult<Map<String, Value>> {
    if issues.is_empty() {
        Ok(normalized)
    } else {
        Err(ValidationError::new(issues))
    }
}

/// Validates an object against field definitions, collecting issues.
fn validate_object(
    obj: &Map<String, Value>,
    fields: &[FieldDef],
    path_prefix: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Map<String, Value> {
    let mut normalized = Map::new();

    for field in fields {
        let field_path = make_path(path_prefix, &field.name);
        match obj.get(&field.name) {
            Some(value) => {
                if let Some(v) = validate_value(value, &field.field_type, &field_path, issues) {
                    normalized.insert(field.name.clone(), v);
                }
            }
            None => {
                if field.required {
                    issues.push(ValidationIssue::missing_field(field_path));
                }
            }
        }
    }

    normalized
}

/// Like [`validate_object`], but absent fields are never reported.
fn validate_partial_object(
    obj: &Map<String, Value>,
    fields: &[FieldDef],
    path_prefix: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Map<String, Value> {
    let mut normalized = Map::new();

    for field in fields {
        let Some(value) = obj.get(&field.name) else {
            continue;
        };
        let field_path = make_path(path_prefix, &field.name);
        let checked = match (&field.field_type, value) {
            (FieldType::Object { fields: nested }, Value::Object(inner)) => Some(Value::Object(
                validate_partial_object(inner, nested, &field_path, issues),
            )),
            (field_type, _) => validate_value(value, field_type, &field_path, issues),
        };
        if let Some(v) = checked {
            normalized.insert(field.name.clone(), v);
        }
    }

    normalized
}

/// Validates a value against a field type.
///
/// Returns the normalized value, or `None` if the type itself was wrong.
fn validate_value(
    value: &Value,
    expected: &FieldType,
    field_path: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<Value> {
    match expected {
        FieldType::String { min_len } => {
            let Some(s) = value.as_str() else {
                issues.push(type_issue(field_path, "string", value));
                return None;
            };
            if let Some(bound) = min_len {
                if s.chars().count() < bound.min {
                    issues.push(ValidationIssue::new(field_path, bound.message.clone()));
                }
            }
            Some(value.clone())
        }
        FieldType::Number { min } => {
            let Some(n) = value.as_f64() else {
                issues.push(type_issue(field_path, "number", value));
                return None;
            };
            if let Some(bound) = min {
                if n < bound.min {
                    issues.push(ValidationIssue::new(field_path, bound.message.clone()));
                }
            }
            Some(value.clone())
        }
        FieldType::Bool => {
            if !value.is_boolean() {
                issues.push(type_issue(field_path, "boolean", value));
                return None;
            }
            Some(value.clone())
        }
        FieldType::Object { fields } => {
            let Some(obj) = value.as_object() else {
                issues.push(type_issue(field_path, "object", value));
                return None;
            };
            Some(Value::Object(validate_object(obj, fields, field_path, issues)))
        }
        FieldType::Array { element_type } => {
            let Some(arr) = value.as_array() else {
                issues.push(type_issue(field_path, "array", value));
                return None;
            };
            let elements = arr
                .iter()
                .enumerate()
                .filter_map(|(i, elem)| {
                    let elem_path = format!("{}[{}]", field_path, i);
                    validate_value(elem, element_type, &elem_path, issues)
                })
                .collect();
            Some(Value::Array(elements))
        }
    }
}

/// Returns the JSON type name for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Creates a field path from prefix and field name.
fn make_path(prefix: &str, field: &str) -> String {
    if prefix.is_empty() {
        field.to_string()
    } else {
        format!("{}.{}", prefix, field)
    }
}

fn type_issue(field_path: &str, expected: &str, actual: &Value) -> ValidationIssue {
    ValidationIssue::type_mismatch(field_path, expected, json_type_name(actual))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn users_validator() -> SchemaValidator {
        SchemaValidator::new(Schema::new(
            "users",
            vec![
                FieldDef::required("name", FieldType::non_empty_string("Name is required")),
                FieldDef::optional("age", FieldType::non_negative_number("Age too low")),
                FieldDef::required("active", FieldType::Bool),
                FieldDef::required_array("tags", FieldType::non_empty_string("Bad tag")),
            ],
        ))
    }

    #[test]
    fn test_valid_document_passes() {
        let doc = json!({ "name": "Alice", "active": true, "tags": ["a"] });
        let normalized = users_validator().validate(&doc).unwrap();
        assert_eq!(Value::Object(normalized), doc);
    }

    #[test]
    fn test_unknown_fields_are_stripped() {
        let doc = json!({ "name": "Alice", "active": true, "tags": [], "role": "admin" });
        let normalized = users_validator().validate(&doc).unwrap();
        assert!(!normalized.contains_key("role"));
        assert_eq!(normalized.len(), 3);
    }

    #[test]
    fn test_all_violations_collected() {
        let doc = json!({ "name": "", "age": -1, "tags": ["", "ok", 3] });
        let err = users_validator().validate(&doc).unwrap_err();
        let messages: Vec<_> = err.issues().iter().map(|i| i.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Name is required",
                "Age too low",
                "Required",
                "Bad tag",
                "Expected string, received number",
            ]
        );
        assert!(err.has_issue_at("tags[0]"));
        assert!(err.has_issue_at("tags[2]"));
        assert!(err.has_issue_at("active"));
    }

    #[test]
    fn test_type_mismatch_reports_received_type() {
        let doc = json!({ "name": 123, "active": "yes", "tags": null });
        let err = users_validator().validate(&doc).unwrap_err();
        assert_eq!(
            err.message(),
            "Expected string, received number, Expected boolean, received string, Expected array, received null"
        );
    }

    #[test]
    fn test_non_object_root_rejected() {
        let err = users_validator().validate(&json!([1, 2])).unwrap_err();
        assert_eq!(err.message(), "Expected object, received array");
    }

    #[test]
    fn test_float_and_integer_numbers_accepted() {
        let v = users_validator();
        assert!(v.validate(&json!({ "name": "a", "active": false, "tags": [], "age": 0 })).is_ok());
        assert!(v.validate(&json!({ "name": "a", "active": false, "tags": [], "age": 0.5 })).is_ok());
    }

    #[test]
    fn test_nested_object_paths() {
        let v = SchemaValidator::new(Schema::new(
            "items",
            vec![FieldDef::required_object(
                "stock",
                vec![
                    FieldDef::required("count", FieldType::non_negative_number("Count low")),
                    FieldDef::required("open", FieldType::Bool),
                ],
            )],
        ));
        let err = v.validate(&json!({ "stock": { "count": -2 } })).unwrap_err();
        assert!(err.has_issue_at("stock.count"));
        assert!(err.has_issue_at("stock.open"));
    }

    #[test]
    fn test_partial_only_checks_present_fields() {
        let v = users_validator();
        let normalized = v.validate_partial(&json!({ "age": 3, "extra": 1 })).unwrap();
        assert_eq!(Value::Object(normalized), json!({ "age": 3 }));

        let err = v.validate_partial(&json!({ "name": "" })).unwrap_err();
        assert_eq!(err.message(), "Name is required");
    }

    #[test]
    fn test_partial_checks_only_present_nested_fields() {
        let v = SchemaValidator::new(Schema::new(
            "items",
            vec![FieldDef::required_object(
                "stock",
                vec![
                    FieldDef::required("count", FieldType::non_negative_number("Bad count")),
                    FieldDef::required("open", FieldType::Bool),
                ],
            )],
        ));

        let normalized = v.validate_partial(&json!({ "stock": { "count": 0 } })).unwrap();
        assert_eq!(Value::Object(normalized), json!({ "stock": { "count": 0 } }));

        let err = v.validate_partial(&json!({ "stock": { "count": -1 } })).unwrap_err();
        assert_eq!(err.message(), "Bad count");
        assert!(err.has_issue_at("stock.count"));

        let err = v.validate_partial(&json!({ "stock": 3 })).unwrap_err();
        assert!(err.has_issue_at("stock"));
    }

    #[test]
    fn test_validation_is_deterministic() {
        let v = users_validator();
        let doc = json!({ "name": "", "tags": [""] });
        let first = v.validate(&doc).unwrap_err();
        for _ in 0..50 {
            assert_eq!(v.validate(&doc).unwrap_err(), first);
        }
    }
}
