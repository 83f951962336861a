// Post repository implementation

use crate::db::DbPool;
use crate::errors::StorageError;
use crate::models::{Platform, Post};
use tracing::instrument;
use uuid::Uuid;

/// Repository for post-related database operations
pub struct PostRepository {
    pool: DbPool,
}

impl PostRepository {
    /// Create a new PostRepository
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Find a post by ID
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, StorageError> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, brand_id, campaign_id, title, media_url,
                   platform, created_at, updated_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.pool())
        .await?;

        Ok(post)
    }

    /// Find a campaign's posts for one platform, in stable placement order.
    ///
    /// Ordering is (created_at, id) so the mapping from posts to distributed
    /// publish slots is reproducible across calls.
    #[instrument(skip(self))]
    pub async fn find_by_campaign(
        &self,
        campaign_id: Uuid,
        platform: Platform,
    ) -> Result<Vec<Post>, StorageError> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, brand_id, campaign_id, title, media_url,
                   platform, created_at, updated_at
            FROM posts
            WHERE campaign_id = $1 AND platform = $2
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(campaign_id)
        .bind(platform.to_string())
        .fetch_all(self.pool.pool())
        .await?;

        tracing::debug!(count = posts.len(), "Fetched campaign posts");
        Ok(posts)
    }
}
