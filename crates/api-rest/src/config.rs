//! API configuration.

use postboard_common::config::AppConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Server host to bind to
    pub host: String,

    /// Server port to bind to
    pub port: u16,

    /// CORS allowed origins
    pub cors_allowed_origins: Vec<String>,

    /// Maximum request body size in bytes
    pub max_body_size: usize,

    /// Largest accepted upload in bytes
    pub max_file_size: u64,

    /// Request timeout in seconds
    pub request_timeout_seconds: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_settings(&AppConfig::default())
    }
}

impl ApiConfig {
    /// Derive the HTTP settings from the loaded application configuration
    pub fn from_settings(settings: &AppConfig) -> Self {
        Self {
            host: settings.server.host.clone(),
            port: settings.server.port,
            cors_allowed_origins: settings.server.cors_allowed_origins.clone(),
            max_body_size: settings.server.max_body_size,
            max_file_size: settings.storage.max_file_size,
            request_timeout_seconds: settings.server.request_timeout_seconds,
        }
    }

    /// Get request timeout as Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }

    /// Get server address
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Whether any origin is allowed
    pub fn allows_any_origin(&self) -> bool {
        self.cors_allowed_origins.iter().any(|origin| origin == "*")
    }
}
