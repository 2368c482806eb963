//! Create-time validation of request bodies.
//!
//! Input arrives as an already-decoded JSON value. Errors are collected per
//! field so the response can carry `{"content": ["..."]}`.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::types::NewText;

/// Key under which errors not tied to a single field are reported.
pub const NON_FIELD_ERRORS: &str = "non_field_errors";

pub const MSG_REQUIRED: &str = "This field is required.";
pub const MSG_NULL: &str = "This field may not be null.";
pub const MSG_BLANK: &str = "This field may not be blank.";
pub const MSG_NOT_A_STRING: &str = "Not a valid string.";
pub const MSG_NULL_CHARS: &str = "Null characters are not allowed.";
pub const MSG_NO_DATA: &str = "No data provided";

/// Field name → messages. Serializes as a flat JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Error)]
#[serde(transparent)]
#[error("validation failed: {fields:?}")]
pub struct ValidationErrors {
    fields: BTreeMap<String, Vec<String>>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a single message on a single field.
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.fields.get(field).map(Vec::as_slice)
    }
}

/// Validate a create request body and extract its `content`.
///
/// Numbers are accepted and stored as their decimal text; booleans, arrays
/// and objects are rejected, as is text containing NUL. Keys other than
/// `content` are ignored.
pub fn validate_new_text(body: &Value) -> Result<NewText, ValidationErrors> {
    if body.is_null() {
        return Err(ValidationErrors::single(NON_FIELD_ERRORS, MSG_NO_DATA));
    }
    let Value::Object(fields) = body else {
        return Err(ValidationErrors::single(
            NON_FIELD_ERRORS,
            format!(
                "Invalid data. Expected a dictionary, but got {}.",
                json_type_name(body)
            ),
        ));
    };

    let message = match fields.get("content") {
        None => MSG_REQUIRED,
        Some(Value::Null) => MSG_NULL,
        Some(Value::String(s)) => match NewText::new(s) {
            Some(text) if text.as_str().contains('\0') => MSG_NULL_CHARS,
            Some(text) => return Ok(text),
            None => MSG_BLANK,
        },
        Some(Value::Number(n)) => match NewText::new(n.to_string()) {
            Some(text) => return Ok(text),
            None => MSG_BLANK,
        },
        Some(Value::Bool(_) | Value::Array(_) | Value::Object(_)) => MSG_NOT_A_STRING,
    };
    Err(ValidationErrors::single("content", message))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "int",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}
