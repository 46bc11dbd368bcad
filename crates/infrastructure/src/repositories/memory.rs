//! In-memory post repository, used when no database is configured.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use tracing::debug;

use postboard_application::{ApplicationError, PostRepositoryPort};
use postboard_domain::{identifiers::PostId, post::Post};

/// Posts kept in a process-local map. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryPostRepository {
    posts: RwLock<HashMap<PostId, Post>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: PostId) -> Option<Post> {
        self.posts.read().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.posts.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.read().is_empty()
    }

    /// All posts, oldest first.
    pub fn all(&self) -> Vec<Post> {
        let mut posts: Vec<Post> = self.posts.read().values().cloned().collect();
        posts.sort_by_key(|post| post.id);
        posts
    }
}

#[async_trait]
impl PostRepositoryPort for InMemoryPostRepository {
    async fn create(&self, post: &Post) -> Result<(), ApplicationError> {
        let mut posts = self.posts.write();
        if posts.contains_key(&post.id) {
            return Err(ApplicationError::Conflict(format!(
                "Post {} already exists",
                post.id
            )));
        }
        posts.insert(post.id, post.clone());
        debug!(post_id = %post.id, "Post stored in memory");
        Ok(())
    }

    async fn ping(&self) -> Result<(), ApplicationError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(title: &str) -> Post {
        Post::new(title, "body", "uploads/1-a.png").unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get() {
        let repo = InMemoryPostRepository::new();
        let post = post("first");

        repo.create(&post).await.unwrap();

        assert_eq!(repo.len(), 1);
        assert_eq!(repo.get(post.id).unwrap().title, "first");
    }

    #[tokio::test]
    async fn test_duplicate_id_conflicts() {
        let repo = InMemoryPostRepository::new();
        let post = post("first");

        repo.create(&post).await.unwrap();
        let err = repo.create(&post).await.unwrap_err();

        assert!(matches!(err, ApplicationError::Conflict(_)));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_all_is_time_ordered() {
        let repo = InMemoryPostRepository::new();
        let first = post("first");
        std::thread::sleep(std::time::Duration::from_millis(2));
        let second = post("second");

        repo.create(&second).await.unwrap();
        repo.create(&first).await.unwrap();

        let titles: Vec<_> = repo.all().into_iter().map(|p| p.title).collect();
        assert_eq!(titles, vec!["first", "second"]);
        assert!(repo.ping().await.is_ok());
    }
}
