//! Application Services
//!
//! Business logic orchestration: coordinates domain operations, repository
//! access and event publication.

mod post;

pub use post::*;

use crate::ApplicationError;
use async_trait::async_trait;

/// Service event for event-driven integrations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceEvent {
    PostCreated { post_id: String, file_path: String },
}

/// Event publisher trait for service events
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: ServiceEvent) -> Result<(), ApplicationError>;
}

/// Event publisher that drops every event
pub struct NoOpEventPublisher;

#[async_trait]
impl EventPublisher for NoOpEventPublisher {
    async fn publish(&self, _event: ServiceEvent) -> Result<(), ApplicationError> {
        Ok(())
    }
}
