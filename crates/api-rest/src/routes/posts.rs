//! Post endpoints.

use crate::{
    error::{ApiError, ApiResult},
    extractors::ValidatedUpload,
    responses::{Created, PostEnvelope},
    state::AppState,
};
use axum::{extract::State, http::StatusCode, routing::post, Router};
use postboard_application::CreatePostRequest;
use postboard_domain::errors::PostError;
use tracing::{info, instrument, warn};

/// Post routes. `/posts/` is accepted as well as `/posts`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/posts", post(create_post))
        .route("/posts/", post(create_post))
}

/// Create a post from a multipart form with `title`, `body` and `file`.
///
/// Field validation and file storage happen in the extractor. Every
/// failure from here on is reported as 400 with the bare message.
#[instrument(skip_all)]
pub async fn create_post(
    State(state): State<AppState>,
    upload: ValidatedUpload<CreatePostRequest>,
) -> ApiResult<Created<PostEnvelope>> {
    let ValidatedUpload { data, file } = upload;

    let file = file.ok_or_else(|| {
        ApiError::Http(StatusCode::BAD_REQUEST, PostError::FileNotProvided.to_string())
    })?;

    let post = state
        .post_service
        .create(data.title(), data.body(), &file.path)
        .await
        .map_err(|e| {
            warn!(error = %e, file_path = %file.path, "Post creation failed");
            ApiError::Http(StatusCode::BAD_REQUEST, e.message().to_string())
        })?;

    info!(post_id = %post.id, "Post created via API");
    Ok(Created(PostEnvelope { post }))
}
