// Brand repository implementation

use crate::db::DbPool;
use crate::errors::StorageError;
use crate::models::Brand;
use tracing::instrument;
use uuid::Uuid;

/// Repository for brand-related database operations
pub struct BrandRepository {
    pool: DbPool,
}

impl BrandRepository {
    /// Create a new BrandRepository
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Find a brand by ID
    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Brand>, StorageError> {
        let brand = sqlx::query_as::<_, Brand>(
            r#"
            SELECT id, name, default_timezone, tone_profile
            FROM brands
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.pool())
        .await?;

        Ok(brand)
    }
}
