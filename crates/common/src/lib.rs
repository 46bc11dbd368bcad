//! Common utilities shared across the Postboard crates.
//!
//! - Configuration management (layered files + environment)
//! - Telemetry setup (tracing subscriber)

pub mod config;
pub mod telemetry;

pub use config::{
    AppConfig, DatabaseSettings, ServerSettings, StorageProvider, StorageSettings,
    TelemetrySettings,
};
pub use telemetry::init_tracing;

/// Common error type used throughout the crate
pub type Result<T> = std::result::Result<T, anyhow::Error>;
