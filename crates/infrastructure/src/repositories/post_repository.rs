//! Post repository implementation.
//!
//! PostgreSQL-backed persistence for posts.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use postboard_application::{ApplicationError, PostRepositoryPort};
use postboard_domain::post::Post;

use crate::{Error, Result};

/// PostgreSQL implementation of the post repository.
#[derive(Debug, Clone)]
pub struct PgPostRepository {
    pool: PgPool,
}

impl PgPostRepository {
    /// Create a new PostgreSQL post repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a post.
    #[instrument(skip(self, post), fields(post_id = %post.id))]
    pub async fn insert(&self, post: &Post) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO posts (id, title, body, file_path, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(post.id.as_uuid())
        .bind(&post.title)
        .bind(&post.body)
        .bind(&post.file_path)
        .bind(post.created_at)
        .bind(post.updated_at)
        .execute(&self.pool)
        .await?;

        debug!("Post inserted");
        Ok(())
    }

    /// Check connectivity with a trivial query.
    pub async fn check(&self) -> Result<()> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(())
    }
}

#[async_trait]
impl PostRepositoryPort for PgPostRepository {
    async fn create(&self, post: &Post) -> std::result::Result<(), ApplicationError> {
        self.insert(post).await.map_err(Into::into)
    }

    async fn ping(&self) -> std::result::Result<(), ApplicationError> {
        self.check().await.map_err(Into::into)
    }
}
