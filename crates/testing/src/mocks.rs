//! Mock implementations for repositories and external services.
//!
//! Provides in-memory mocks for testing without database or filesystem
//! dependencies. Every mock records what it was asked to do.

use async_trait::async_trait;
use bytes::Bytes;
use parking_lot::RwLock;
use postboard_application::{
    ApplicationError, ApplicationResult, EventPublisher, PostDto, PostRepositoryPort,
    PostServiceTrait, ServiceEvent,
};
use postboard_domain::{identifiers::PostId, post::Post};
use postboard_infrastructure::{Error as InfraError, Result as InfraResult, Storage, StorageHealthStatus};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Mock post repository for testing
pub struct MockPostRepository {
    posts: Arc<RwLock<HashMap<PostId, Post>>>,
    failure: RwLock<Option<ApplicationError>>,
}

impl MockPostRepository {
    pub fn new() -> Self {
        Self {
            posts: Arc::new(RwLock::new(HashMap::new())),
            failure: RwLock::new(None),
        }
    }

    /// Make every following call fail with `error`
    pub fn fail_with(&self, error: ApplicationError) {
        *self.failure.write() = Some(error);
    }

    pub fn find_by_id(&self, id: &PostId) -> Option<Post> {
        self.posts.read().get(id).cloned()
    }

    pub fn posts(&self) -> Vec<Post> {
        self.posts.read().values().cloned().collect()
    }

    pub fn count(&self) -> usize {
        self.posts.read().len()
    }

    pub fn clear(&self) {
        self.posts.write().clear();
    }

    fn check_failure(&self) -> Result<(), ApplicationError> {
        match self.failure.read().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl Default for MockPostRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostRepositoryPort for MockPostRepository {
    async fn create(&self, post: &Post) -> Result<(), ApplicationError> {
        self.check_failure()?;
        self.posts.write().insert(post.id, post.clone());
        Ok(())
    }

    async fn ping(&self) -> Result<(), ApplicationError> {
        self.check_failure()
    }
}

/// Mock event publisher for testing service events
pub struct MockEventPublisher {
    pub published_events: Arc<RwLock<Vec<ServiceEvent>>>,
    fail: RwLock<bool>,
}

impl MockEventPublisher {
    pub fn new() -> Self {
        Self {
            published_events: Arc::new(RwLock::new(Vec::new())),
            fail: RwLock::new(false),
        }
    }

    /// Make every following publish fail
    pub fn fail(&self) {
        *self.fail.write() = true;
    }

    pub fn get_published_events(&self) -> Vec<ServiceEvent> {
        self.published_events.read().clone()
    }

    pub fn clear(&self) {
        self.published_events.write().clear();
    }

    pub fn event_count(&self) -> usize {
        self.published_events.read().len()
    }
}

impl Default for MockEventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for MockEventPublisher {
    async fn publish(&self, event: ServiceEvent) -> Result<(), ApplicationError> {
        if *self.fail.read() {
            return Err(ApplicationError::ServiceUnavailable(
                "event bus unavailable".to_string(),
            ));
        }
        self.published_events.write().push(event);
        Ok(())
    }
}

/// Arguments of one `PostServiceTrait::create` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateCall {
    pub title: String,
    pub body: String,
    pub file_path: String,
}

/// Post service double that records calls and returns a scripted outcome.
///
/// By default each call succeeds with a post built from the arguments.
pub struct RecordingPostService {
    calls: RwLock<Vec<CreateCall>>,
    failure: RwLock<Option<ApplicationError>>,
    ready: RwLock<bool>,
}

impl RecordingPostService {
    pub fn new() -> Self {
        Self {
            calls: RwLock::new(Vec::new()),
            failure: RwLock::new(None),
            ready: RwLock::new(true),
        }
    }

    /// Service whose `create` always fails with `error`
    pub fn failing(error: ApplicationError) -> Self {
        let service = Self::new();
        *service.failure.write() = Some(error);
        service
    }

    pub fn set_ready(&self, ready: bool) {
        *self.ready.write() = ready;
    }

    pub fn calls(&self) -> Vec<CreateCall> {
        self.calls.read().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.read().len()
    }
}

impl Default for RecordingPostService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostServiceTrait for RecordingPostService {
    async fn create(&self, title: &str, body: &str, file_path: &str) -> ApplicationResult<PostDto> {
        self.calls.write().push(CreateCall {
            title: title.to_string(),
            body: body.to_string(),
            file_path: file_path.to_string(),
        });

        if let Some(err) = self.failure.read().clone() {
            return Err(err);
        }

        let now = chrono::Utc::now();
        Ok(PostDto {
            id: PostId::new().to_string(),
            title: title.to_string(),
            body: body.to_string(),
            file_path: file_path.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    async fn ready(&self) -> bool {
        *self.ready.read()
    }
}

/// An object held by [`MemoryStorage`]
#[derive(Debug, Clone)]
pub struct StoredObject {
    pub data: Bytes,
    pub content_type: Option<String>,
}

/// In-memory file storage. Paths are reported as `uploads/<key>`.
pub struct MemoryStorage {
    objects: RwLock<HashMap<String, StoredObject>>,
    failure: RwLock<Option<String>>,
}

impl MemoryStorage {
    pub const ROOT: &'static str = "uploads";

    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
            failure: RwLock::new(None),
        }
    }

    /// Make every following call fail with a storage error
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.write() = Some(message.into());
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.objects.read().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn get(&self, key: &str) -> Option<StoredObject> {
        self.objects.read().get(key).cloned()
    }

    pub fn object_count(&self) -> usize {
        self.objects.read().len()
    }

    fn check_failure(&self) -> InfraResult<()> {
        match self.failure.read().clone() {
            Some(message) => Err(InfraError::Storage(message)),
            None => Ok(()),
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn upload(&self, key: &str, data: Bytes, content_type: Option<&str>) -> InfraResult<String> {
        self.check_failure()?;
        self.objects.write().insert(
            key.to_string(),
            StoredObject {
                data,
                content_type: content_type.map(str::to_string),
            },
        );
        Ok(format!("{}/{}", Self::ROOT, key))
    }

    async fn delete(&self, key: &str) -> InfraResult<bool> {
        self.check_failure()?;
        Ok(self.objects.write().remove(key).is_some())
    }

    async fn exists(&self, key: &str) -> InfraResult<bool> {
        self.check_failure()?;
        Ok(self.objects.read().contains_key(key))
    }

    async fn health_check(&self) -> InfraResult<StorageHealthStatus> {
        let error = self.failure.read().clone();
        Ok(StorageHealthStatus {
            healthy: error.is_none(),
            latency: Duration::ZERO,
            error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_recording_post_service() {
        let service = RecordingPostService::new();
        let post = service.create("t", "b", "uploads/f.png").await.unwrap();

        assert_eq!(post.file_path, "uploads/f.png");
        assert_eq!(
            service.calls(),
            vec![CreateCall {
                title: "t".to_string(),
                body: "b".to_string(),
                file_path: "uploads/f.png".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_failing_post_service() {
        let service = RecordingPostService::failing(ApplicationError::Internal("boom".to_string()));
        let err = service.create("t", "b", "f").await.unwrap_err();
        assert_eq!(err.message(), "boom");
        assert_eq!(service.call_count(), 1);
    }

    #[tokio::test]
    async fn test_memory_storage() {
        let storage = MemoryStorage::new();
        let path = storage
            .upload("k.txt", Bytes::from_static(b"x"), Some("text/plain"))
            .await
            .unwrap();

        assert_eq!(path, "uploads/k.txt");
        assert!(storage.exists("k.txt").await.unwrap());
        assert!(storage.health_check().await.unwrap().healthy);

        storage.fail_with("disk full");
        assert!(storage.upload("k2", Bytes::new(), None).await.is_err());
        assert!(!storage.health_check().await.unwrap().healthy);
    }

    #[tokio::test]
    async fn test_mock_repository_failure() {
        let repo = MockPostRepository::new();
        repo.fail_with(ApplicationError::ServiceUnavailable("down".to_string()));
        assert!(repo.ping().await.is_err());
        assert_eq!(repo.count(), 0);
    }
}
