//! S3-compatible object storage provider
//!
//! Stores uploaded files in AWS S3 or a compatible service (MinIO,
//! Cloudflare R2, etc.).

use async_trait::async_trait;
use aws_sdk_s3::{
    config::{BehaviorVersion, Builder, Credentials, Region},
    primitives::ByteStream,
    Client,
};
use bytes::Bytes;
use postboard_common::config::StorageSettings;
use tracing::{debug, info, instrument, warn};

use super::{check_key, Storage, StorageHealthStatus};
use crate::{Error, Result};

/// S3 storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// S3-compatible endpoint URL (for MinIO, R2, etc.)
    pub endpoint_url: Option<String>,
    /// AWS region
    pub region: String,
    /// S3 bucket name
    pub bucket: String,
    /// Access key ID
    pub access_key_id: String,
    /// Secret access key
    pub secret_access_key: String,
    /// Path prefix for all objects
    pub path_prefix: String,
    /// Force path-style access (required for MinIO)
    pub force_path_style: bool,
}

impl StorageConfig {
    /// Build from application settings. Credentials come from the standard
    /// `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY` variables.
    pub fn from_settings(settings: &StorageSettings) -> Self {
        Self {
            endpoint_url: settings.endpoint.clone(),
            region: settings.region.clone(),
            bucket: settings.bucket.clone(),
            access_key_id: std::env::var("AWS_ACCESS_KEY_ID").unwrap_or_default(),
            secret_access_key: std::env::var("AWS_SECRET_ACCESS_KEY").unwrap_or_default(),
            path_prefix: settings.path_prefix.clone(),
            force_path_style: settings.force_path_style,
        }
    }
}

/// S3-compatible storage implementation.
pub struct S3Storage {
    client: Client,
    bucket: String,
    path_prefix: String,
}

impl S3Storage {
    /// Create a new S3 storage instance.
    #[instrument(skip(config))]
    pub async fn new(config: StorageConfig) -> Result<Self> {
        if config.bucket.is_empty() {
            return Err(Error::Configuration("S3 bucket not set".to_string()));
        }

        info!(bucket = %config.bucket, region = %config.region, "Initializing S3 storage");

        let mut builder = Builder::new()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));

        if !config.access_key_id.is_empty() && !config.secret_access_key.is_empty() {
            let credentials = Credentials::new(
                &config.access_key_id,
                &config.secret_access_key,
                None,
                None,
                "environment",
            );
            builder = builder.credentials_provider(credentials);
        }

        if let Some(ref endpoint_url) = config.endpoint_url {
            builder = builder.endpoint_url(endpoint_url);
        }

        if config.force_path_style {
            builder = builder.force_path_style(true);
        }

        let client = Client::from_conf(builder.build());

        Ok(Self {
            client,
            bucket: config.bucket,
            path_prefix: config.path_prefix,
        })
    }

    fn full_key(&self, key: &str) -> String {
        prefixed_key(&self.path_prefix, key)
    }
}

fn prefixed_key(prefix: &str, key: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}/{}", prefix, key)
    }
}

fn is_not_found(message: &str) -> bool {
    message.contains("NotFound") || message.contains("NoSuchKey")
}

#[async_trait]
impl Storage for S3Storage {
    #[instrument(skip(self, data), fields(size = data.len()))]
    async fn upload(&self, key: &str, data: Bytes, content_type: Option<&str>) -> Result<String> {
        check_key(key)?;
        let full_key = self.full_key(key);

        let mut request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(&full_key)
            .body(ByteStream::from(data));

        if let Some(ct) = content_type {
            request = request.content_type(ct);
        }

        request
            .send()
            .await
            .map_err(|e| Error::Storage(e.to_string()))?;

        debug!(key = %full_key, "Object uploaded");
        Ok(full_key)
    }

    #[instrument(skip(self))]
    async fn delete(&self, key: &str) -> Result<bool> {
        check_key(key)?;
        if !self.exists(key).await? {
            return Ok(false);
        }

        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(self.full_key(key))
            .send()
            .await
            .map_err(|e| Error::Storage(e.to_string()))?;

        debug!(key = %key, "Object deleted");
        Ok(true)
    }

    #[instrument(skip(self))]
    async fn exists(&self, key: &str) -> Result<bool> {
        check_key(key)?;
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(self.full_key(key))
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) if is_not_found(&format!("{:?}", e)) => Ok(false),
            Err(e) => Err(Error::Storage(e.to_string())),
        }
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> Result<StorageHealthStatus> {
        let start = std::time::Instant::now();

        match self.client.head_bucket().bucket(&self.bucket).send().await {
            Ok(_) => {
                let latency = start.elapsed();
                debug!(latency_ms = latency.as_millis(), "Storage health check passed");
                Ok(StorageHealthStatus {
                    healthy: true,
                    latency,
                    error: None,
                })
            }
            Err(e) => {
                warn!(error = %e, "Storage health check failed");
                Ok(StorageHealthStatus {
                    healthy: false,
                    latency: start.elapsed(),
                    error: Some(e.to_string()),
                })
            }
        }
    }
}

impl std::fmt::Debug for S3Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Storage")
            .field("bucket", &self.bucket)
            .field("path_prefix", &self.path_prefix)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_settings() {
        let settings = StorageSettings {
            bucket: "posts".to_string(),
            endpoint: Some("http://localhost:9000".to_string()),
            force_path_style: true,
            ..Default::default()
        };
        let config = StorageConfig::from_settings(&settings);
        assert_eq!(config.bucket, "posts");
        assert_eq!(config.region, "us-east-1");
        assert_eq!(config.path_prefix, "uploads");
        assert!(config.force_path_style);
    }

    #[test]
    fn test_prefixed_key() {
        assert_eq!(prefixed_key("uploads/", "a.png"), "uploads/a.png");
        assert_eq!(prefixed_key("", "a.png"), "a.png");
    }

    #[tokio::test]
    async fn test_missing_bucket_is_rejected() {
        let config = StorageConfig::from_settings(&StorageSettings::default());
        assert!(matches!(
            S3Storage::new(config).await,
            Err(Error::Configuration(_))
        ));
    }
}
