//! HTTP route handlers.

pub mod health;
pub mod posts;

use crate::state::AppState;
use axum::Router;

pub use health::routes as health_routes;

/// Resources mounted under the API root
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(posts::routes())
}
