//! Infrastructure layer for Postboard
//!
//! This crate provides implementations for:
//! - File storage for uploads (local filesystem, S3-compatible object storage)
//! - Database access (PostgreSQL with sqlx)
//! - Post repositories (PostgreSQL, in-memory)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use postboard_infrastructure::{
//!     database::{DatabaseConfig, DatabasePool},
//!     repositories::PgPostRepository,
//!     storage::build_storage,
//! };
//!
//! let pool = DatabasePool::new(&DatabaseConfig::from_settings(&settings.database)?).await?;
//! let posts = PgPostRepository::new(pool.pool().clone());
//! let storage = build_storage(&settings.storage).await?;
//! ```

pub mod database;
pub mod repositories;
pub mod storage;

pub use database::{DatabaseConfig, DatabasePool, HealthStatus};
pub use repositories::{InMemoryPostRepository, PgPostRepository};
pub use storage::{
    build_storage, generate_key, LocalStorage, S3Storage, Storage, StorageConfig,
    StorageHealthStatus,
};

use postboard_application::ApplicationError;

pub type Result<T> = std::result::Result<T, Error>;

/// Infrastructure-level errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Database errors from sqlx
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration errors
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Storage errors from the object store
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Resource not found errors
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rejected storage key
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl Error {
    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Database(_) | Error::Storage(_) | Error::Io(_))
    }
}

impl From<Error> for ApplicationError {
    fn from(err: Error) -> Self {
        match err {
            Error::NotFound(msg) => ApplicationError::NotFound(msg),
            Error::InvalidKey(msg) => ApplicationError::InvalidInput(msg),
            Error::Database(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                ApplicationError::Conflict(db.message().to_string())
            }
            Error::Configuration(msg) => ApplicationError::Internal(msg),
            other => ApplicationError::ServiceUnavailable(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_retryable() {
        let db_err = Error::Database(sqlx::Error::PoolTimedOut);
        assert!(db_err.is_retryable());

        let not_found = Error::NotFound("test".to_string());
        assert!(!not_found.is_retryable());
    }

    #[test]
    fn test_application_error_mapping() {
        let err: ApplicationError = Error::Database(sqlx::Error::PoolTimedOut).into();
        assert!(matches!(err, ApplicationError::ServiceUnavailable(_)));

        let err: ApplicationError = Error::InvalidKey("../etc".to_string()).into();
        assert!(matches!(err, ApplicationError::InvalidInput(_)));
    }
}
