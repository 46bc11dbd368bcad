//! HTTP error handling and conversion.
//!
//! This module provides error types for the REST API and implements
//! conversion from application and storage errors to HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use postboard_application::ApplicationError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

/// API-specific error type.
///
/// `Display` yields the message sent to the client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Application layer error
    #[error("{}", .0.message())]
    Application(#[from] ApplicationError),

    /// Form fields failed schema validation
    #[error("{0}")]
    Validation(String),

    /// Malformed request
    #[error("{0}")]
    BadRequest(String),

    /// Upload or body over the configured limit
    #[error("{0}")]
    PayloadTooLarge(String),

    /// Uploaded file could not be written
    #[error("Failed to store file")]
    Storage(String),

    /// Explicit status and message
    #[error("{1}")]
    Http(StatusCode, String),

    /// Internal server error
    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Application(err) => StatusCode::from_u16(err.http_status())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Storage(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Http(status, _) => *status,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code for API response
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Application(err) => err.error_code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            Self::Storage(_) => "STORAGE_UNAVAILABLE",
            Self::Http(status, _) => match *status {
                StatusCode::BAD_REQUEST => "BAD_REQUEST",
                StatusCode::NOT_FOUND => "NOT_FOUND",
                StatusCode::PAYLOAD_TOO_LARGE => "PAYLOAD_TOO_LARGE",
                s if s.is_server_error() => "INTERNAL_ERROR",
                _ => "HTTP_ERROR",
            },
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Standardized error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code
    pub error: String,

    /// Human-readable message
    pub message: String,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        match &self {
            Self::Storage(detail) | Self::Internal(detail) => {
                error!(error_code, detail = %detail, "Request failed");
            }
            _ => {}
        }

        let body = ErrorResponse::new(error_code, self.to_string());

        (status, Json(body)).into_response()
    }
}

impl From<postboard_infrastructure::Error> for ApiError {
    fn from(err: postboard_infrastructure::Error) -> Self {
        match err {
            postboard_infrastructure::Error::InvalidKey(key) => {
                Self::BadRequest(format!("Invalid file name: {}", key))
            }
            other => Self::Storage(other.to_string()),
        }
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_keeps_status_and_message() {
        let err = ApiError::Http(StatusCode::BAD_REQUEST, "File not provided".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "BAD_REQUEST");
        assert_eq!(err.to_string(), "File not provided");
    }

    #[test]
    fn test_application_error_message_is_bare() {
        let err = ApiError::from(ApplicationError::Conflict("duplicate post".to_string()));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        assert_eq!(err.to_string(), "duplicate post");
    }

    #[test]
    fn test_storage_error_hides_detail() {
        let err = ApiError::from(postboard_infrastructure::Error::Storage(
            "bucket policy denied".to_string(),
        ));
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.to_string(), "Failed to store file");
    }
}
