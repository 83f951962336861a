// Campaign repository implementation

use crate::db::DbPool;
use crate::errors::StorageError;
use crate::models::Campaign;
use tracing::instrument;
use uuid::Uuid;

/// Repository for campaign-related database operations
pub struct CampaignRepository {
    pool: DbPool,
}

impl CampaignRepository {
    /// Create a new CampaignRepository
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Find a campaign by ID
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Campaign>, StorageError> {
        let campaign = sqlx::query_as::<_, Campaign>(
            r#"
            SELECT id, brand_id, name, goal, start_date, end_date,
                   status, created_at, updated_at
            FROM campaigns
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.pool())
        .await?;

        Ok(campaign)
    }
}
