//! Data Transfer Objects (DTOs) for the API layer
//!
//! DTOs provide a stable API contract separate from the domain model.

use chrono::{DateTime, Utc};
use postboard_domain::post::Post;
use serde::{Deserialize, Serialize};

/// Post as returned to API clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDto {
    pub id: String,
    pub title: String,
    pub body: String,
    pub file_path: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.to_string(),
            title: post.title,
            body: post.body,
            file_path: post.file_path,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}
