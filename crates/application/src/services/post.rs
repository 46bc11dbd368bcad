//! Post Service
//!
//! Creates posts from a validated title and body plus the path of a file
//! that the upload layer has already stored.

use super::{EventPublisher, ServiceEvent};
use crate::dto::PostDto;
use crate::{ApplicationError, ApplicationResult};
use async_trait::async_trait;
use postboard_domain::post::Post;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Post repository port
#[async_trait]
pub trait PostRepositoryPort: Send + Sync {
    /// Persist a new post
    async fn create(&self, post: &Post) -> Result<(), ApplicationError>;

    /// Check that the backing store is reachable
    async fn ping(&self) -> Result<(), ApplicationError>;
}

/// Type-erased post service used by route handlers
#[async_trait]
pub trait PostServiceTrait: Send + Sync {
    /// Create a post referencing an already stored file
    async fn create(&self, title: &str, body: &str, file_path: &str) -> ApplicationResult<PostDto>;

    /// Whether the service can currently accept writes
    async fn ready(&self) -> bool;
}

/// Post service implementation
pub struct PostService<R, E>
where
    R: PostRepositoryPort,
    E: EventPublisher,
{
    repository: Arc<R>,
    event_publisher: Arc<E>,
}

impl<R, E> PostService<R, E>
where
    R: PostRepositoryPort,
    E: EventPublisher,
{
    pub fn new(repository: Arc<R>, event_publisher: Arc<E>) -> Self {
        Self {
            repository,
            event_publisher,
        }
    }

    /// Create a new post
    #[instrument(skip(self, title, body))]
    pub async fn create(
        &self,
        title: &str,
        body: &str,
        file_path: &str,
    ) -> ApplicationResult<PostDto> {
        let post = Post::new(title, body, file_path)?;

        self.repository.create(&post).await?;

        let event = ServiceEvent::PostCreated {
            post_id: post.id.to_string(),
            file_path: post.file_path.clone(),
        };
        if let Err(e) = self.event_publisher.publish(event).await {
            // Already persisted; publishing is best-effort.
            warn!(post_id = %post.id, error = %e, "Failed to publish PostCreated event");
        }

        info!(post_id = %post.id, "Post created");
        Ok(post.into())
    }
}

#[async_trait]
impl<R, E> PostServiceTrait for PostService<R, E>
where
    R: PostRepositoryPort + 'static,
    E: EventPublisher + 'static,
{
    async fn create(&self, title: &str, body: &str, file_path: &str) -> ApplicationResult<PostDto> {
        PostService::create(self, title, body, file_path).await
    }

    async fn ready(&self) -> bool {
        self.repository.ping().await.is_ok()
    }
}
