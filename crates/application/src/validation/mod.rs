//! Validation Framework
//!
//! Input schemas are plain structs deriving `validator::Validate`. The API
//! layer validates a schema before any side effect happens and reports all
//! failures at once.

use crate::ApplicationError;
use postboard_domain::post::{BODY_MAX_LEN, TITLE_MAX_LEN};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use validator::{Validate, ValidationError};

/// Validation result containing all errors
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Whether validation passed
    pub valid: bool,
    /// Field-level errors, ordered by field name
    pub field_errors: BTreeMap<String, Vec<String>>,
    /// Object-level errors
    pub object_errors: Vec<String>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn success() -> Self {
        Self {
            valid: true,
            field_errors: BTreeMap::new(),
            object_errors: Vec::new(),
        }
    }

    /// Add a field-level error
    pub fn add_field_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.valid = false;
        self.field_errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Add an object-level error
    pub fn add_object_error(&mut self, message: impl Into<String>) {
        self.valid = false;
        self.object_errors.push(message.into());
    }

    /// All messages, field errors first, joined with `; `
    pub fn message(&self) -> String {
        self.field_errors
            .values()
            .flatten()
            .chain(self.object_errors.iter())
            .cloned()
            .collect::<Vec<_>>()
            .join("; ")
    }

    /// Convert to ApplicationError if invalid
    pub fn to_error(&self) -> Option<ApplicationError> {
        if self.valid {
            None
        } else {
            Some(ApplicationError::ValidationFailed(self.message()))
        }
    }

    /// Ensure validation passed, returning error if not
    pub fn ensure_valid(&self) -> Result<(), ApplicationError> {
        match self.to_error() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Extension to convert validator errors to our format
pub trait ValidatorExt {
    fn to_validation_result(&self) -> ValidationResult;
}

impl<T: Validate> ValidatorExt for T {
    fn to_validation_result(&self) -> ValidationResult {
        let mut result = ValidationResult::success();

        if let Err(errors) = self.validate() {
            for (field, field_errors) in errors.field_errors() {
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("{} is invalid ({})", field, error.code));
                    result.add_field_error(field.to_string(), message);
                }
            }
        }

        result
    }
}

/// Form fields of a post creation request
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(required(message = "title is required"), custom = "validate_title")]
    pub title: Option<String>,

    #[validate(required(message = "body is required"), custom = "validate_body")]
    pub body: Option<String>,
}

impl CreatePostRequest {
    /// Title after validation; empty if validation was skipped
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// Body after validation; empty if validation was skipped
    pub fn body(&self) -> &str {
        self.body.as_deref().unwrap_or_default()
    }
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    check_trimmed_length("title", title, TITLE_MAX_LEN)
}

fn validate_body(body: &str) -> Result<(), ValidationError> {
    check_trimmed_length("body", body, BODY_MAX_LEN)
}

fn check_trimmed_length(field: &str, value: &str, max: usize) -> Result<(), ValidationError> {
    let len = value.trim().chars().count();
    if len == 0 {
        let mut error = ValidationError::new("empty");
        error.message = Some(Cow::Owned(format!("{} must not be empty", field)));
        return Err(error);
    }
    if len > max {
        let mut error = ValidationError::new("length");
        error.message = Some(Cow::Owned(format!(
            "{} must be at most {} characters",
            field, max
        )));
        return Err(error);
    }
    Ok(())
}
