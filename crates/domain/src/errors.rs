//! Error types for the Postboard domain.
//!
//! Errors carry an error code for API responses and a hint for the HTTP
//! status they map to.

use crate::identifiers::PostId;

/// Top-level domain error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Post-related errors
    #[error("Post error: {0}")]
    Post(#[from] PostError),

    /// Validation-related errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Internal errors
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Post(_) => "POST_ERROR",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Storage(_) => "STORAGE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Post(PostError::NotFound(_)) => 404,
            Self::Storage(StorageError::FileTooLarge { .. }) => 413,
            Self::Storage(_) => 503,
            Self::Internal(_) => 500,
            _ => 400,
        }
    }
}

/// Post-specific errors
#[derive(Debug, thiserror::Error)]
pub enum PostError {
    /// Post not found
    #[error("Post not found: {0}")]
    NotFound(PostId),

    /// A post must be created with an uploaded file
    #[error("File not provided")]
    FileNotProvided,
}

/// Validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// A single field failed validation
    #[error("{field} {message}")]
    FieldValidation {
        /// Field name
        field: String,
        /// What is wrong with the field
        message: String,
    },

    /// Multiple validation errors
    #[error("{}", .0.join("; "))]
    Multiple(Vec<String>),
}

impl ValidationError {
    /// Shorthand for a single field error
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FieldValidation {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// File storage errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Upload exceeds the configured limit
    #[error("File too large: {size} bytes exceeds limit of {limit} bytes")]
    FileTooLarge {
        /// Size of the rejected upload
        size: u64,
        /// Configured limit
        limit: u64,
    },

    /// The backend failed to write the file
    #[error("Failed to store file: {0}")]
    WriteFailed(String),
}

/// Application-wide result type
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = AppError::Post(PostError::NotFound(PostId::new()));
        assert_eq!(err.error_code(), "POST_ERROR");
        assert_eq!(err.http_status(), 404);

        let err = AppError::Post(PostError::FileNotProvided);
        assert_eq!(err.http_status(), 400);
    }

    #[test]
    fn test_file_not_provided_message() {
        assert_eq!(PostError::FileNotProvided.to_string(), "File not provided");
    }

    #[test]
    fn test_storage_status() {
        let err = AppError::from(StorageError::FileTooLarge { size: 10, limit: 5 });
        assert_eq!(err.http_status(), 413);

        let err = AppError::from(StorageError::WriteFailed("disk full".to_string()));
        assert_eq!(err.http_status(), 503);
    }

    #[test]
    fn test_multiple_validation_message() {
        let err = ValidationError::Multiple(vec![
            "title is required".to_string(),
            "body is required".to_string(),
        ]);
        assert_eq!(err.to_string(), "title is required; body is required");
    }
}
