//! Application state and dependency injection.
//!
//! This module defines the shared application state that is passed
//! to all route handlers via Axum's state extraction.

use crate::config::ApiConfig;
use anyhow::Context;
use postboard_application::{NoOpEventPublisher, PostService, PostServiceTrait};
use postboard_common::config::AppConfig;
use postboard_infrastructure::{
    build_storage, DatabaseConfig, DatabasePool, InMemoryPostRepository, PgPostRepository,
    Storage,
};
use std::sync::Arc;
use tracing::{info, warn};

/// Application state shared across all requests
#[derive(Clone)]
pub struct AppState {
    /// API configuration
    pub config: Arc<ApiConfig>,

    /// Post service (type-erased)
    pub post_service: Arc<dyn PostServiceTrait>,

    /// Where uploaded files are written
    pub storage: Arc<dyn Storage>,

    /// PostgreSQL pool, closed on shutdown; `None` for the in-memory repository
    pub database: Option<DatabasePool>,
}

impl AppState {
    /// Create state from already constructed collaborators
    pub fn new(
        config: ApiConfig,
        post_service: Arc<dyn PostServiceTrait>,
        storage: Arc<dyn Storage>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            post_service,
            storage,
            database: None,
        }
    }

    /// Attach the database pool backing the post service
    pub fn with_database(mut self, database: DatabasePool) -> Self {
        self.database = Some(database);
        self
    }

    /// Close the database pool, if any
    pub async fn close(&self) {
        if let Some(database) = &self.database {
            database.close().await;
        }
    }

    /// Wire up repository and storage from configuration.
    ///
    /// Uses PostgreSQL when `database.url` is set (running pending
    /// migrations) and the in-memory repository otherwise.
    pub async fn from_settings(settings: &AppConfig) -> anyhow::Result<Self> {
        let storage = build_storage(&settings.storage)
            .await
            .context("Failed to initialize file storage")?;

        let event_publisher = Arc::new(NoOpEventPublisher);

        let api_config = ApiConfig::from_settings(settings);

        if settings.database.url.is_some() {
            let db_config = DatabaseConfig::from_settings(&settings.database)?;
            let pool = DatabasePool::new(&db_config)
                .await
                .context("Failed to connect to database")?;
            pool.migrate().await.context("Failed to run migrations")?;

            info!("Using PostgreSQL post repository");
            let repository = Arc::new(PgPostRepository::new(pool.pool().clone()));
            let post_service = Arc::new(PostService::new(repository, event_publisher));
            Ok(Self::new(api_config, post_service, storage).with_database(pool))
        } else {
            warn!("No database configured; posts are kept in memory");
            let repository = Arc::new(InMemoryPostRepository::new());
            let post_service = Arc::new(PostService::new(repository, event_publisher));
            Ok(Self::new(api_config, post_service, storage))
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("config", &self.config)
            .field("database", &self.database)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_from_settings_without_database_uses_memory() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = AppConfig::default();
        settings.database.url = None;
        settings.storage.upload_dir = dir.path().join("uploads").display().to_string();

        let state = AppState::from_settings(&settings).await.unwrap();

        assert!(state.database.is_none());
        assert!(state.post_service.ready().await);
        state.close().await;
    }
}
