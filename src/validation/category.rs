//! Category payload validation

use serde_json::Value;

use crate::models::category::title_limits;

use super::{required_string, ValidationError};

/// A validated category payload
#[derive(Debug, Clone)]
pub struct CategoryPayload {
    pub title: String,
}

/// Validate a candidate category payload.
pub fn validate_category(payload: &Value) -> Result<CategoryPayload, ValidationError> {
    let mut errors = Vec::new();

    let title = required_string(
        payload,
        "title",
        title_limits::MIN,
        title_limits::MAX,
        &mut errors,
    );

    if errors.is_empty() {
        Ok(CategoryPayload {
            title: title.unwrap(),
        })
    } else {
        Err(ValidationError::new(errors))
    }
}
