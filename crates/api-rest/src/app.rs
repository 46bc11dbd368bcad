//! Application builder.
//!
//! Assembles routes, middleware and state into an Axum router.

use crate::{
    config::ApiConfig,
    middleware::{handle_panic, logging_middleware, request_id_middleware},
    routes,
    state::AppState,
};
use axum::{extract::DefaultBodyLimit, http::HeaderValue, middleware, Router};
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::warn;

/// Create the main application router
pub fn create_app(state: AppState) -> Router {
    let config = state.config.clone();
    let cors = build_cors_layer(&config);

    Router::new()
        .merge(routes::health_routes())
        .nest("/api", routes::api_routes())
        .layer(DefaultBodyLimit::max(config.max_body_size))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CatchPanicLayer::custom(handle_panic))
                .layer(CompressionLayer::new())
                .layer(cors)
                .layer(TimeoutLayer::new(config.request_timeout()))
                .layer(middleware::from_fn(request_id_middleware))
                .layer(middleware::from_fn(logging_middleware)),
        )
}

/// Build CORS layer from configuration
fn build_cors_layer(config: &ApiConfig) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.allows_any_origin() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
}
