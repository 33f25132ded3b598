//! Article payload validation
//!
//! Accepts a candidate article payload and returns either the recognized
//! fields as an `ArticlePayload` or a failure listing every violated
//! constraint. Runs before any persistence operation; a failure halts the
//! pipeline with zero side effects.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::models::article::{announce_limits, full_text_limits, title_limits};

use super::{optional_string, required_string, FieldError, ValidationError};

/// Accepted picture filenames: a word character followed by a `.jpg` or
/// `.png` suffix, case as given.
static IMAGE_NAME_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w\.(jpg|png)$").unwrap());

/// A category reference in an article payload: the schema admits both
/// numeric identifiers and string identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryRef {
    Id(i64),
    Name(String),
}

impl CategoryRef {
    /// Numeric identifier of the reference, parsing string references.
    /// Strings that do not parse resolve to no category at all.
    pub fn as_id(&self) -> Option<i64> {
        match self {
            CategoryRef::Id(id) => Some(*id),
            CategoryRef::Name(name) => name.trim().parse().ok(),
        }
    }
}

/// A validated article payload, carrying only recognized fields
#[derive(Debug, Clone)]
pub struct ArticlePayload {
    pub image: Option<String>,
    pub title: String,
    pub announce: String,
    pub full_text: Option<String>,
    pub categories: Vec<CategoryRef>,
}

/// Validate a candidate article payload against the field constraints.
pub fn validate_article(payload: &Value) -> Result<ArticlePayload, ValidationError> {
    let mut errors = Vec::new();

    let title = required_string(
        payload,
        "title",
        title_limits::MIN,
        title_limits::MAX,
        &mut errors,
    );
    let announce = required_string(
        payload,
        "announce",
        announce_limits::MIN,
        announce_limits::MAX,
        &mut errors,
    );
    let full_text = optional_string(payload, "fullText", full_text_limits::MAX, &mut errors);
    let image = validate_image(payload, &mut errors);
    let categories = validate_categories(payload, &mut errors);

    if errors.is_empty() {
        Ok(ArticlePayload {
            image,
            // Unwraps are safe: a missing value always records an error
            title: title.unwrap(),
            announce: announce.unwrap(),
            full_text,
            categories: categories.unwrap(),
        })
    } else {
        Err(ValidationError::new(errors))
    }
}

/// Optional picture filename; an empty string counts as absent.
fn validate_image(payload: &Value, errors: &mut Vec<FieldError>) -> Option<String> {
    match payload.get("image") {
        None | Some(Value::Null) => None,
        Some(Value::String(value)) if value.is_empty() => None,
        Some(Value::String(value)) => {
            if IMAGE_NAME_PATTERN.is_match(value) {
                Some(value.clone())
            } else {
                errors.push(FieldError {
                    field: "image",
                    message: "must be a filename ending in .jpg or .png".to_string(),
                });
                None
            }
        }
        Some(_) => {
            errors.push(FieldError {
                field: "image",
                message: "must be a string".to_string(),
            });
            None
        }
    }
}

/// Required non-empty sequence of numeric or string identifiers.
fn validate_categories(payload: &Value, errors: &mut Vec<FieldError>) -> Option<Vec<CategoryRef>> {
    let items = match payload.get("categories") {
        None | Some(Value::Null) => {
            errors.push(FieldError {
                field: "categories",
                message: "is required".to_string(),
            });
            return None;
        }
        Some(Value::Array(items)) => items,
        Some(_) => {
            errors.push(FieldError {
                field: "categories",
                message: "must be an array".to_string(),
            });
            return None;
        }
    };

    if items.is_empty() {
        errors.push(FieldError {
            field: "categories",
            message: "must contain at least one category".to_string(),
        });
        return None;
    }

    let mut refs = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Number(n) if n.as_i64().is_some() => {
                refs.push(CategoryRef::Id(n.as_i64().unwrap()));
            }
            Value::String(s) => refs.push(CategoryRef::Name(s.clone())),
            _ => {
                errors.push(FieldError {
                    field: "categories",
                    message: "every element must be a numeric or string identifier".to_string(),
                });
                return None;
            }
        }
    }

    Some(refs)
}
