//! Postboard REST API
//!
//! Axum-based HTTP layer for Postboard: accepts multipart post submissions,
//! validates them, stores the uploaded file and hands the post to the
//! application layer.
//!
//! ## Architecture
//!
//! - **app**: Router assembly and middleware stack
//! - **routes**: HTTP route handlers
//! - **middleware**: Request ID, logging and panic handling
//! - **extractors**: Multipart upload extractor with schema validation
//! - **responses**: Standardized response types
//! - **error**: HTTP error handling and conversion
//!
//! ## Usage
//!
//! ```rust,no_run
//! use postboard_api_rest::{create_app, AppState};
//! use postboard_common::config::AppConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = AppConfig::load()?;
//!     let state = AppState::from_settings(&settings).await?;
//!     let app = create_app(state);
//!
//!     let listener = tokio::net::TcpListener::bind(settings.server_address()).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod app;
pub mod config;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod responses;
pub mod routes;
pub mod state;

// Re-export commonly used types
pub use app::create_app;
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use state::AppState;
