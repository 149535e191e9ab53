//! Validation error types
//!
//! A rejected document yields one [`ValidationIssue`] per violated rule.
//! The error's display form joins every issue message with `", "`.

use std::fmt;

use serde::Serialize;

/// A single violated rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// Field path (e.g., "inventory.quantity", "tags[2]")
    pub path: String,
    /// Human-readable message for the rule
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn missing_field(path: impl Into<String>) -> Self {
        Self::new(path, "Required")
    }

    pub fn type_mismatch(path: impl Into<String>, expected: &str, received: &str) -> Self {
        Self::new(path, format!("Expected {}, received {}", expected, received))
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "field '{}': {}", self.path, self.message)
    }
}

/// Document failed validation.
///
/// Never empty: a validator only builds one when at least one rule failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{}", join_messages(.issues))]
pub struct ValidationError {
    name: &'static str,
    issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub(crate) fn new(issues: Vec<ValidationIssue>) -> Self {
        debug_assert!(!issues.is_empty());
        Self {
            name: "ValidationError",
            issues,
        }
    }

    /// Every violated rule, in schema order
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Messages joined with `", "`
    pub fn message(&self) -> String {
        join_messages(&self.issues)
    }

    /// Returns whether some issue is reported at `path`
    pub fn has_issue_at(&self, path: &str) -> bool {
        self.issues.iter().any(|issue| issue.path == path)
    }
}

fn join_messages(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.message.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type for validation
pub type ValidationResult<T> = Result<T, ValidationError>;
