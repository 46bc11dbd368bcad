//! Integration tests for the post service against the shared mocks.

use postboard_application::{
    ApplicationError, PostService, PostServiceTrait, ServiceEvent,
};
use postboard_domain::post::TITLE_MAX_LEN;
use postboard_testing::{
    blank_text, create_test_file_path, create_test_post, overlong_title, valid_body, valid_title,
    MockEventPublisher, MockPostRepository,
};
use proptest::prelude::*;
use std::sync::Arc;

fn service() -> (
    PostService<MockPostRepository, MockEventPublisher>,
    Arc<MockPostRepository>,
    Arc<MockEventPublisher>,
) {
    let repo = Arc::new(MockPostRepository::new());
    let events = Arc::new(MockEventPublisher::new());
    (PostService::new(repo.clone(), events.clone()), repo, events)
}

#[tokio::test]
async fn test_create_persists_and_publishes() {
    let (service, repo, events) = service();

    let post = service
        .create("  Hello  ", "World", "uploads/1-a.png")
        .await
        .unwrap();

    assert_eq!(post.title, "Hello");
    assert_eq!(post.file_path, "uploads/1-a.png");
    assert_eq!(repo.count(), 1);
    assert_eq!(
        events.get_published_events(),
        vec![ServiceEvent::PostCreated {
            post_id: post.id.clone(),
            file_path: "uploads/1-a.png".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_invalid_input_is_not_persisted() {
    let (service, repo, events) = service();

    let err = service.create("   ", "World", "uploads/1-a.png").await.unwrap_err();
    assert!(matches!(err, ApplicationError::InvalidInput(_)));
    assert_eq!(err.message(), "title must not be empty");

    let err = service.create("Hello", "World", "").await.unwrap_err();
    assert!(matches!(err, ApplicationError::InvalidInput(_)));

    let long = "x".repeat(TITLE_MAX_LEN + 1);
    assert!(service.create(&long, "World", "uploads/a").await.is_err());

    assert_eq!(repo.count(), 0);
    assert_eq!(events.event_count(), 0);
}

#[tokio::test]
async fn test_repository_failure_propagates() {
    let (service, repo, events) = service();
    repo.fail_with(ApplicationError::ServiceUnavailable("database down".to_string()));

    let err = service.create("Hello", "World", "uploads/a").await.unwrap_err();

    assert_eq!(err.message(), "database down");
    assert!(err.is_retryable());
    assert_eq!(events.event_count(), 0);
}

#[tokio::test]
async fn test_publish_failure_does_not_fail_create() {
    let (service, repo, events) = service();
    events.fail();

    let post = service.create("Hello", "World", "uploads/a").await;

    assert!(post.is_ok());
    assert_eq!(repo.count(), 1);
}

#[tokio::test]
async fn test_ready_reflects_repository() {
    let (service, repo, _events) = service();
    assert!(PostServiceTrait::ready(&service).await);

    repo.fail_with(ApplicationError::ServiceUnavailable("down".to_string()));
    assert!(!PostServiceTrait::ready(&service).await);
}

#[tokio::test]
async fn test_create_with_generated_post() {
    let (service, repo, _events) = service();
    let fixture = create_test_post();

    let post = service
        .create(&fixture.title, &fixture.body, &fixture.file_path)
        .await
        .unwrap();

    let stored = repo.posts().pop().unwrap();
    assert_eq!(stored.id.to_string(), post.id);
    assert_eq!(stored.title, fixture.title);
    assert_eq!(stored.body, fixture.body);
    assert_eq!(stored.file_path, fixture.file_path);
}

fn block_on<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap()
        .block_on(future)
}

proptest! {
    #[test]
    fn valid_submissions_are_persisted(title in valid_title(), body in valid_body()) {
        let (service, repo, events) = service();
        let file_path = create_test_file_path();

        let post = block_on(service.create(&title, &body, &file_path)).unwrap();

        prop_assert_eq!(post.title, title.trim());
        prop_assert_eq!(repo.count(), 1);
        prop_assert_eq!(events.event_count(), 1);
    }

    #[test]
    fn rejected_submissions_leave_no_trace(title in overlong_title(), body in blank_text()) {
        let (service, repo, events) = service();

        let long_title = block_on(service.create(&title, "World", &create_test_file_path()));
        let blank_body = block_on(service.create("Hello", &body, &create_test_file_path()));

        prop_assert!(matches!(long_title, Err(ApplicationError::InvalidInput(_))));
        prop_assert!(matches!(blank_body, Err(ApplicationError::InvalidInput(_))));
        prop_assert_eq!(repo.count(), 0);
        prop_assert_eq!(events.event_count(), 0);
    }
}
