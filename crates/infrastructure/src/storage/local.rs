//! Local filesystem storage

use async_trait::async_trait;
use bytes::Bytes;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, instrument, warn};

use super::{check_key, Storage, StorageHealthStatus};
use crate::Result;

/// Stores uploads as files under a root directory.
///
/// `upload` returns `<root>/<key>`, which is what gets recorded on the post.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    /// Create the storage, creating `root` if it does not exist.
    pub async fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).await?;
        Ok(Self { root })
    }

    /// Root directory files are written under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        check_key(key)?;
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl Storage for LocalStorage {
    #[instrument(skip(self, data), fields(size = data.len()))]
    async fn upload(&self, key: &str, data: Bytes, _content_type: Option<&str>) -> Result<String> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::write(&path, &data).await?;

        let stored = path.to_string_lossy().into_owned();
        debug!(path = %stored, "File written");
        Ok(stored)
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: &str) -> Result<bool> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn exists(&self, key: &str) -> Result<bool> {
        let path = self.path_for(key)?;
        Ok(fs::try_exists(&path).await?)
    }

    async fn health_check(&self) -> Result<StorageHealthStatus> {
        let start = std::time::Instant::now();
        match fs::metadata(&self.root).await {
            Ok(meta) if meta.is_dir() && !meta.permissions().readonly() => Ok(StorageHealthStatus {
                healthy: true,
                latency: start.elapsed(),
                error: None,
            }),
            Ok(_) => Ok(StorageHealthStatus {
                healthy: false,
                latency: start.elapsed(),
                error: Some(format!("{} is not a writable directory", self.root.display())),
            }),
            Err(e) => {
                warn!(error = %e, "Upload directory unavailable");
                Ok(StorageHealthStatus {
                    healthy: false,
                    latency: start.elapsed(),
                    error: Some(e.to_string()),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[tokio::test]
    async fn test_upload_writes_file_under_root() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().join("uploads")).await.unwrap();

        let path = storage
            .upload("1-abc.txt", Bytes::from_static(b"hello"), Some("text/plain"))
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("uploads/1-abc.txt").to_string_lossy());
        assert_eq!(std::fs::read(&path).unwrap(), b"hello");
        assert!(storage.exists("1-abc.txt").await.unwrap());
    }

    #[tokio::test]
    async fn test_delete() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();
        storage
            .upload("a.bin", Bytes::from_static(b"x"), None)
            .await
            .unwrap();

        assert!(storage.delete("a.bin").await.unwrap());
        assert!(!storage.delete("a.bin").await.unwrap());
        assert!(!storage.exists("a.bin").await.unwrap());
    }

    #[tokio::test]
    async fn test_rejects_escaping_keys() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let result = storage
            .upload("../escape.txt", Bytes::from_static(b"x"), None)
            .await;
        assert!(matches!(result, Err(Error::InvalidKey(_))));
        assert!(!dir.path().parent().unwrap().join("escape.txt").exists());
    }

    #[tokio::test]
    async fn test_health_check() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();
        assert!(storage.health_check().await.unwrap().healthy);

        std::fs::remove_dir(dir.path()).unwrap();
        assert!(!storage.health_check().await.unwrap().healthy);
    }
}
