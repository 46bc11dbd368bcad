//! Health check endpoints.

use crate::{responses::ApiResponse, state::AppState};
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

/// Readiness check response
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// Overall readiness status
    pub ready: bool,

    /// Individual component checks
    pub checks: ReadinessChecks,
}

/// Individual readiness checks
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessChecks {
    /// Post repository reachable
    pub repository: bool,

    /// File storage writable
    pub storage: bool,
}

/// Health check routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
}

/// Liveness check; always succeeds while the process serves requests
async fn health() -> Json<ApiResponse<HealthResponse>> {
    let response = HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    Json(ApiResponse::success(response))
}

/// Readiness check; 503 when a dependency is down
async fn ready(State(state): State<AppState>) -> (StatusCode, Json<ApiResponse<ReadinessResponse>>) {
    let repository = state.post_service.ready().await;
    let storage = match state.storage.health_check().await {
        Ok(status) => status.healthy,
        Err(e) => {
            warn!(error = %e, "Storage health check errored");
            false
        }
    };

    let checks = ReadinessChecks {
        repository,
        storage,
    };
    let ready = checks.repository && checks.storage;
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(ApiResponse::success(ReadinessResponse { ready, checks })),
    )
}
