//! Standardized API response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use postboard_application::PostDto;
use serde::{Deserialize, Serialize};

/// Standard API response wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Indicates if the request was successful
    pub success: bool,

    /// Response data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    /// Create a success response with data
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
        }
    }
}

impl<T> IntoResponse for ApiResponse<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// A single post, keyed as `post`
#[derive(Debug, Serialize, Deserialize)]
pub struct PostEnvelope {
    /// The post
    pub post: PostDto,
}

/// Created response (HTTP 201); the payload is serialized as-is
pub struct Created<T>(pub T);

impl<T> IntoResponse for Created<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        (StatusCode::CREATED, Json(self.0)).into_response()
    }
}
