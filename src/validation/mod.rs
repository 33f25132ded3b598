//! Payload validation
//!
//! Declarative field constraints re-expressed as pure functions from a JSON
//! payload to `Result<ValidatedPayload, ValidationError>`. Every violated
//! constraint is reported, not just the first one. Unknown payload fields
//! are accepted here and simply never make it into the validated payload.

pub mod article;
pub mod category;
pub mod comment;

use serde::Serialize;
use serde_json::Value;

pub use article::{validate_article, ArticlePayload, CategoryRef};
pub use category::{validate_category, CategoryPayload};
pub use comment::{validate_comment, CommentPayload};

/// A single violated field constraint
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Validation failure carrying one entry per violated field
#[derive(Debug, Clone, thiserror::Error)]
#[error("payload validation failed: {}", self.describe())]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    /// Render the violated fields as a single human-readable line
    pub fn describe(&self) -> String {
        self.errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Per-field detail payload for API error responses
    pub fn details(&self) -> Value {
        serde_json::to_value(&self.errors).unwrap_or(Value::Null)
    }
}

/// Count a string's length in characters, not bytes
pub(crate) fn char_len(value: &str) -> usize {
    value.chars().count()
}

/// Extract a required string field, recording errors for absence, wrong
/// type, or out-of-bounds length.
pub(crate) fn required_string(
    payload: &Value,
    field: &'static str,
    min: usize,
    max: usize,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match payload.get(field) {
        None | Some(Value::Null) => {
            errors.push(FieldError {
                field,
                message: "is required".to_string(),
            });
            None
        }
        Some(Value::String(value)) => {
            let len = char_len(value);
            if len < min || len > max {
                errors.push(FieldError {
                    field,
                    message: format!("length must be between {min} and {max} characters"),
                });
                None
            } else {
                Some(value.clone())
            }
        }
        Some(_) => {
            errors.push(FieldError {
                field,
                message: "must be a string".to_string(),
            });
            None
        }
    }
}

/// Extract an optional string field bounded by a maximum length. Absent
/// fields and nulls yield `None` without an error.
pub(crate) fn optional_string(
    payload: &Value,
    field: &'static str,
    max: usize,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match payload.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(value)) => {
            if char_len(value) > max {
                errors.push(FieldError {
                    field,
                    message: format!("length must be at most {max} characters"),
                });
                None
            } else {
                Some(value.clone())
            }
        }
        Some(_) => {
            errors.push(FieldError {
                field,
                message: "must be a string".to_string(),
            });
            None
        }
    }
}
