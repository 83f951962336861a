// Data-access interface consumed by the scheduling core

use crate::db::repositories::{
    BrandRepository, CampaignRepository, PostRepository, ScheduleRepository,
};
use crate::db::DbPool;
use crate::errors::StorageError;
use crate::models::{Brand, Campaign, Platform, Post, Schedule};
use async_trait::async_trait;
use uuid::Uuid;

/// Storage interface for scheduling operations.
///
/// The orchestrator depends on this trait rather than on a concrete backend,
/// so tests can substitute an in-memory double and the persistence engine
/// stays a collaborator, not a dependency of the algorithm.
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Fetch a brand by id
    async fn brand(&self, id: Uuid) -> Result<Option<Brand>, StorageError>;

    /// Fetch a campaign by id
    async fn campaign(&self, id: Uuid) -> Result<Option<Campaign>, StorageError>;

    /// Fetch a post by id
    async fn post(&self, id: Uuid) -> Result<Option<Post>, StorageError>;

    /// Fetch a campaign's posts for one platform, in stable placement order
    async fn posts_for_campaign(
        &self,
        campaign_id: Uuid,
        platform: Platform,
    ) -> Result<Vec<Post>, StorageError>;

    /// Fetch the active schedule for a post
    async fn schedule_for_post(&self, post_id: Uuid) -> Result<Option<Schedule>, StorageError>;

    /// Fetch all schedules belonging to a campaign's posts, in stable post order
    async fn schedules_for_campaign(
        &self,
        campaign_id: Uuid,
    ) -> Result<Vec<Schedule>, StorageError>;

    /// Create or replace the schedule for a single post
    async fn replace_schedule(&self, schedule: &Schedule) -> Result<(), StorageError>;

    /// Create or replace a batch of schedules atomically.
    ///
    /// Implementations must persist the whole batch or nothing.
    async fn replace_schedules(&self, schedules: &[Schedule]) -> Result<(), StorageError>;
}

/// PostgreSQL-backed store composed from the per-entity repositories
pub struct PgScheduleStore {
    brands: BrandRepository,
    campaigns: CampaignRepository,
    posts: PostRepository,
    schedules: ScheduleRepository,
}

impl PgScheduleStore {
    /// Create a new store over a shared connection pool
    pub fn new(pool: DbPool) -> Self {
        Self {
            brands: BrandRepository::new(pool.clone()),
            campaigns: CampaignRepository::new(pool.clone()),
            posts: PostRepository::new(pool.clone()),
            schedules: ScheduleRepository::new(pool),
        }
    }
}

#[async_trait]
impl ScheduleStore for PgScheduleStore {
    async fn brand(&self, id: Uuid) -> Result<Option<Brand>, StorageError> {
        self.brands.find_by_id(id).await
    }

    async fn campaign(&self, id: Uuid) -> Result<Option<Campaign>, StorageError> {
        self.campaigns.find_by_id(id).await
    }

    async fn post(&self, id: Uuid) -> Result<Option<Post>, StorageError> {
        self.posts.find_by_id(id).await
    }

    async fn posts_for_campaign(
        &self,
        campaign_id: Uuid,
        platform: Platform,
    ) -> Result<Vec<Post>, StorageError> {
        self.posts.find_by_campaign(campaign_id, platform).await
    }

    async fn schedule_for_post(&self, post_id: Uuid) -> Result<Option<Schedule>, StorageError> {
        self.schedules.find_by_post(post_id).await
    }

    async fn schedules_for_campaign(
        &self,
        campaign_id: Uuid,
    ) -> Result<Vec<Schedule>, StorageError> {
        self.schedules.find_by_campaign(campaign_id).await
    }

    async fn replace_schedule(&self, schedule: &Schedule) -> Result<(), StorageError> {
        self.schedules.upsert(schedule).await
    }

    async fn replace_schedules(&self, schedules: &[Schedule]) -> Result<(), StorageError> {
        self.schedules.upsert_all(schedules).await
    }
}
