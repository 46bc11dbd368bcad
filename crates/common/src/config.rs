//! Configuration management for the application.
//!
//! Settings are loaded in the following order (later sources override
//! earlier ones):
//!
//! 1. Built-in defaults
//! 2. `config/default.toml` (if it exists)
//! 3. `config/{environment}.toml` (if it exists, environment from `APP_ENV`)
//! 4. Environment variables prefixed with `APP_`, e.g. `APP_SERVER__PORT=3000`
//!
//! ## Example Configuration
//!
//! ```toml
//! [server]
//! port = 3000
//! cors_allowed_origins = ["https://example.com"]
//!
//! [storage]
//! provider = "local"
//! upload_dir = "/var/lib/postboard/uploads"
//! max_file_size = 5242880
//!
//! [database]
//! url = "postgres://localhost:5432/postboard"
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Host to bind to (e.g., "0.0.0.0")
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Request timeout in seconds
    pub request_timeout_seconds: u64,

    /// Maximum request body size in bytes (multipart envelope included)
    pub max_body_size: usize,

    /// CORS allowed origins, `*` for any
    pub cors_allowed_origins: Vec<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_seconds: 30,
            max_body_size: 12 * 1024 * 1024, // 12 MB
            cors_allowed_origins: vec!["*".to_string()],
        }
    }
}

/// Database settings. Without a URL posts are kept in memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// PostgreSQL connection URL
    pub url: Option<String>,

    /// Connection pool size
    pub pool_size: u32,

    /// Connection acquire timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: None,
            pool_size: 10,
            timeout_seconds: 30,
        }
    }
}

/// Where uploaded files are written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageProvider {
    /// Local filesystem under `upload_dir`
    #[default]
    Local,
    /// S3-compatible object storage
    S3,
}

/// File storage settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    pub provider: StorageProvider,

    /// Directory for the local provider
    pub upload_dir: String,

    /// Largest accepted upload in bytes
    pub max_file_size: u64,

    /// S3 bucket name
    pub bucket: String,

    /// AWS region
    pub region: String,

    /// Custom S3 endpoint (MinIO, R2, ...)
    pub endpoint: Option<String>,

    /// Key prefix for uploaded objects
    pub path_prefix: String,

    /// Force path-style access (required for MinIO)
    pub force_path_style: bool,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            provider: StorageProvider::Local,
            upload_dir: "uploads".to_string(),
            max_file_size: 10 * 1024 * 1024, // 10 MB
            bucket: String::new(),
            region: "us-east-1".to_string(),
            endpoint: None,
            path_prefix: "uploads".to_string(),
            force_path_style: false,
        }
    }
}

/// Telemetry settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetrySettings {
    /// Service name reported in logs
    pub service_name: String,

    /// Emit JSON logs instead of pretty output
    pub json_logging: bool,

    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            service_name: "postboard".to_string(),
            json_logging: false,
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `./config` and the environment.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use postboard_common::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load configuration");
    /// println!("Server will run on {}:{}", config.server.host, config.server.port);
    /// ```
    pub fn load() -> Result<Self> {
        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        Self::load_from(Path::new("config"), &env)
    }

    /// Load configuration files from `dir` for the given environment name.
    pub fn load_from(dir: &Path, env: &str) -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::from(dir.join("default")).required(false))
            .add_source(config::File::from(dir.join(env)).required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors_allowed_origins")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to build configuration")?;

        let app_config: AppConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;

        app_config.validate()?;

        Ok(app_config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            anyhow::bail!("Server port must be greater than 0");
        }

        if self.server.request_timeout_seconds == 0 {
            anyhow::bail!("Request timeout must be greater than 0");
        }

        if let Some(url) = &self.database.url {
            if url.is_empty() {
                anyhow::bail!("Database URL must not be empty when set");
            }
            if self.database.pool_size == 0 {
                anyhow::bail!("Database pool size must be greater than 0");
            }
        }

        if self.storage.max_file_size == 0 {
            anyhow::bail!("Maximum file size must be greater than 0");
        }

        match self.storage.provider {
            StorageProvider::Local if self.storage.upload_dir.trim().is_empty() => {
                anyhow::bail!("Upload directory is required for local storage");
            }
            StorageProvider::S3 if self.storage.bucket.is_empty() => {
                anyhow::bail!("S3 bucket name is required for S3 storage");
            }
            _ => {}
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.telemetry.log_level.as_str()) {
            anyhow::bail!(
                "Invalid log level '{}'. Must be one of: {}",
                self.telemetry.log_level,
                valid_log_levels.join(", ")
            );
        }

        Ok(())
    }

    /// Address the HTTP server binds to
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Database connection timeout as a Duration
    pub fn database_timeout(&self) -> Duration {
        Duration::from_secs(self.database.timeout_seconds)
    }
}
