// Schedule repository implementation

use crate::db::DbPool;
use crate::errors::StorageError;
use crate::models::Schedule;
use sqlx::{Postgres, Transaction};
use tracing::instrument;
use uuid::Uuid;

/// One-statement upsert keyed on post_id. The UNIQUE constraint on
/// schedules.post_id makes "at most one active schedule per post" a database
/// guarantee; replacing rewrites every column including the token.
const UPSERT_SCHEDULE: &str = r#"
INSERT INTO schedules (id, post_id, publish_time, status, retry_count, created_at)
VALUES ($1, $2, $3, $4, $5, $6)
ON CONFLICT (post_id) DO UPDATE
SET id = EXCLUDED.id,
    publish_time = EXCLUDED.publish_time,
    status = EXCLUDED.status,
    retry_count = EXCLUDED.retry_count,
    created_at = EXCLUDED.created_at
"#;

/// Repository for schedule-related database operations
pub struct ScheduleRepository {
    pool: DbPool,
}

impl ScheduleRepository {
    /// Create a new ScheduleRepository
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Find the active schedule for a post
    #[instrument(skip(self))]
    pub async fn find_by_post(&self, post_id: Uuid) -> Result<Option<Schedule>, StorageError> {
        let schedule = sqlx::query_as::<_, Schedule>(
            r#"
            SELECT id, post_id, publish_time, status, retry_count, created_at
            FROM schedules
            WHERE post_id = $1
            "#,
        )
        .bind(post_id)
        .fetch_optional(self.pool.pool())
        .await?;

        Ok(schedule)
    }

    /// Find all schedules for a campaign's posts, in stable post order
    #[instrument(skip(self))]
    pub async fn find_by_campaign(&self, campaign_id: Uuid) -> Result<Vec<Schedule>, StorageError> {
        let schedules = sqlx::query_as::<_, Schedule>(
            r#"
            SELECT s.id, s.post_id, s.publish_time, s.status, s.retry_count, s.created_at
            FROM schedules s
            JOIN posts p ON p.id = s.post_id
            WHERE p.campaign_id = $1
            ORDER BY p.created_at ASC, p.id ASC
            "#,
        )
        .bind(campaign_id)
        .fetch_all(self.pool.pool())
        .await?;

        tracing::debug!(count = schedules.len(), "Fetched campaign schedules");
        Ok(schedules)
    }

    /// Create or replace the schedule for a single post
    #[instrument(skip(self, schedule), fields(schedule_id = %schedule.id, post_id = %schedule.post_id))]
    pub async fn upsert(&self, schedule: &Schedule) -> Result<(), StorageError> {
        sqlx::query(UPSERT_SCHEDULE)
            .bind(schedule.id)
            .bind(schedule.post_id)
            .bind(schedule.publish_time)
            .bind(schedule.status.to_string())
            .bind(schedule.retry_count)
            .bind(schedule.created_at)
            .execute(self.pool.pool())
            .await?;

        tracing::info!(
            schedule_id = %schedule.id,
            post_id = %schedule.post_id,
            publish_time = %schedule.publish_time,
            "Schedule upserted"
        );
        Ok(())
    }

    /// Create or replace a batch of schedules in one transaction.
    ///
    /// A failure anywhere in the batch rolls back every write, so concurrent
    /// campaign scheduling never observes a partial set.
    #[instrument(skip(self, schedules), fields(count = schedules.len()))]
    pub async fn upsert_all(&self, schedules: &[Schedule]) -> Result<(), StorageError> {
        let mut tx: Transaction<'_, Postgres> = self
            .pool
            .pool()
            .begin()
            .await
            .map_err(|e| StorageError::TransactionFailed(e.to_string()))?;

        for schedule in schedules {
            sqlx::query(UPSERT_SCHEDULE)
                .bind(schedule.id)
                .bind(schedule.post_id)
                .bind(schedule.publish_time)
                .bind(schedule.status.to_string())
                .bind(schedule.retry_count)
                .bind(schedule.created_at)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit()
            .await
            .map_err(|e| StorageError::TransactionFailed(e.to_string()))?;

        tracing::info!(count = schedules.len(), "Schedule batch upserted");
        Ok(())
    }
}
