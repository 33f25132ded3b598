//! Comment payload validation
//!
//! The owning article is named by the request path, so the payload only
//! carries the comment text.

use serde_json::Value;

use crate::models::comment::message_limits;

use super::{char_len, FieldError, ValidationError};

/// A validated comment payload
#[derive(Debug, Clone)]
pub struct CommentPayload {
    pub text: String,
}

/// Validate a candidate comment payload.
pub fn validate_comment(payload: &Value) -> Result<CommentPayload, ValidationError> {
    let text = match payload.get("text") {
        None | Some(Value::Null) => Err("is required".to_string()),
        Some(Value::String(value)) => {
            if char_len(value) < message_limits::MIN {
                Err(format!(
                    "length must be at least {} characters",
                    message_limits::MIN
                ))
            } else {
                Ok(value.clone())
            }
        }
        Some(_) => Err("must be a string".to_string()),
    };

    match text {
        Ok(text) => Ok(CommentPayload { text }),
        Err(message) => Err(ValidationError::new(vec![FieldError {
            field: "text",
            message,
        }])),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimum_length_is_inclusive() {
        let text = "t".repeat(message_limits::MIN);
        assert!(validate_comment(&json!({ "text": text })).is_ok());

        let text = "t".repeat(message_limits::MIN - 1);
        assert!(validate_comment(&json!({ "text": text })).is_err());
    }

    #[test]
    fn test_missing_text_fails() {
        assert!(validate_comment(&json!({})).is_err());
    }

    #[test]
    fn test_non_string_text_fails() {
        assert!(validate_comment(&json!({"text": 42})).is_err());
    }
}
