//! Storage module - where uploaded files end up.
//!
//! The upload layer writes each accepted file through [`Storage`] and hands
//! the returned path to the post service.

mod local;
mod s3;

pub use local::LocalStorage;
pub use s3::{S3Storage, StorageConfig};

use crate::Result;
use async_trait::async_trait;
use bytes::Bytes;
use postboard_common::config::{StorageProvider, StorageSettings};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

/// Storage provider trait for uploaded files.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write an object and return the path (or key) it is reachable under.
    async fn upload(&self, key: &str, data: Bytes, content_type: Option<&str>) -> Result<String>;

    /// Delete an object. Returns `false` if it did not exist.
    async fn delete(&self, key: &str) -> Result<bool>;

    /// Check if an object exists.
    async fn exists(&self, key: &str) -> Result<bool>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> Result<StorageHealthStatus>;
}

/// Storage health status.
#[derive(Debug, Clone)]
pub struct StorageHealthStatus {
    /// Whether the storage is healthy
    pub healthy: bool,
    /// Check latency
    pub latency: Duration,
    /// Error message if unhealthy
    pub error: Option<String>,
}

/// Build the storage backend selected in configuration.
pub async fn build_storage(settings: &StorageSettings) -> Result<Arc<dyn Storage>> {
    match settings.provider {
        StorageProvider::Local => {
            info!(upload_dir = %settings.upload_dir, "Using local file storage");
            Ok(Arc::new(LocalStorage::new(&settings.upload_dir).await?))
        }
        StorageProvider::S3 => {
            let storage = S3Storage::new(StorageConfig::from_settings(settings)).await?;
            Ok(Arc::new(storage))
        }
    }
}

/// Generate a fresh storage key for an upload.
///
/// Keys look like `<unix-millis>-<uuid>[.<ext>]`; only the extension of the
/// client filename is kept.
pub fn generate_key(original_name: Option<&str>) -> String {
    let stem = format!(
        "{}-{}",
        chrono::Utc::now().timestamp_millis(),
        Uuid::new_v4().simple()
    );

    match original_name.and_then(extension_of) {
        Some(ext) => format!("{}.{}", stem, ext),
        None => stem,
    }
}

fn extension_of(name: &str) -> Option<String> {
    // Browsers may send a full client path (e.g. `C:\fakepath\a.png`).
    let file_name = name.rsplit(['/', '\\']).next()?;
    let (base, ext) = file_name.rsplit_once('.')?;
    if base.is_empty() || ext.is_empty() || ext.len() > 16 {
        return None;
    }
    if !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Reject keys that could escape the storage root.
pub(crate) fn check_key(key: &str) -> Result<()> {
    let bad = key.is_empty()
        || key.starts_with('/')
        || key.contains('\\')
        || key.split('/').any(|part| part.is_empty() || part == "." || part == "..");
    if bad {
        return Err(crate::Error::InvalidKey(key.to_string()));
    }
    Ok(())
}
