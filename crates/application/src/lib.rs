//! Application layer for Postboard
//!
//! Orchestrates the domain and coordinates between layers.
//!
//! ## Modules
//!
//! - `services` - Post creation service and the ports it depends on
//! - `validation` - Input schemas and validation error formatting
//! - `dto` - Data transfer objects returned to the API layer

pub mod dto;
pub mod services;
pub mod validation;

pub use dto::PostDto;
pub use services::{
    EventPublisher, NoOpEventPublisher, PostRepositoryPort, PostService, PostServiceTrait,
    ServiceEvent,
};
pub use validation::{CreatePostRequest, ValidationResult, ValidatorExt};

use postboard_domain::errors::{AppError, PostError, StorageError, ValidationError};
use thiserror::Error;

/// Application-level errors
#[derive(Error, Debug, Clone)]
pub enum ApplicationError {
    /// Resource not found
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// Resource conflict (e.g., duplicate)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Backing store unavailable
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl ApplicationError {
    /// The bare message, without the category prefix used by `Display`
    pub fn message(&self) -> &str {
        match self {
            ApplicationError::NotFound(msg)
            | ApplicationError::InvalidInput(msg)
            | ApplicationError::ValidationFailed(msg)
            | ApplicationError::Conflict(msg)
            | ApplicationError::Internal(msg)
            | ApplicationError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Get HTTP status code for this error
    pub fn http_status(&self) -> u16 {
        match self {
            ApplicationError::NotFound(_) => 404,
            ApplicationError::InvalidInput(_) => 400,
            ApplicationError::ValidationFailed(_) => 400,
            ApplicationError::Conflict(_) => 409,
            ApplicationError::Internal(_) => 500,
            ApplicationError::ServiceUnavailable(_) => 503,
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(self, ApplicationError::ServiceUnavailable(_))
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            ApplicationError::NotFound(_) => "NOT_FOUND",
            ApplicationError::InvalidInput(_) => "INVALID_INPUT",
            ApplicationError::ValidationFailed(_) => "VALIDATION_FAILED",
            ApplicationError::Conflict(_) => "CONFLICT",
            ApplicationError::Internal(_) => "INTERNAL_ERROR",
            ApplicationError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }
}

impl From<ValidationError> for ApplicationError {
    fn from(err: ValidationError) -> Self {
        ApplicationError::InvalidInput(err.to_string())
    }
}

impl From<AppError> for ApplicationError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Validation(e) => e.into(),
            AppError::Post(e @ PostError::NotFound(_)) => ApplicationError::NotFound(e.to_string()),
            AppError::Post(e @ PostError::FileNotProvided) => {
                ApplicationError::InvalidInput(e.to_string())
            }
            AppError::Storage(e @ StorageError::FileTooLarge { .. }) => {
                ApplicationError::InvalidInput(e.to_string())
            }
            AppError::Storage(e) => ApplicationError::ServiceUnavailable(e.to_string()),
            AppError::Internal(msg) => ApplicationError::Internal(msg),
        }
    }
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;
