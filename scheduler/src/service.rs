// Schedule orchestration service

use crate::clock::{Clock, SystemClock};
use crate::distribution::{self, DistributionStrategy, NaiveDistribution, TARGET_PLATFORM};
use crate::ids::{IdGenerator, UuidIdGenerator};
use chrono::{DateTime, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use common::db::store::ScheduleStore;
use common::errors::{NotFoundError, SchedulingError, ValidationError};
use common::models::Schedule;
use common::telemetry;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Orchestrates schedule creation: resolves timezones, invokes the
/// distribution strategy, normalizes to UTC, and hands the resulting
/// records to the store.
pub struct ScheduleService {
    store: Arc<dyn ScheduleStore>,
    strategy: Arc<dyn DistributionStrategy>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl ScheduleService {
    /// Create a service with explicit collaborators
    pub fn new(
        store: Arc<dyn ScheduleStore>,
        strategy: Arc<dyn DistributionStrategy>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            store,
            strategy,
            clock,
            ids,
        }
    }

    /// Create a service with the naive distribution strategy, system clock,
    /// and random UUID tokens
    pub fn with_defaults(store: Arc<dyn ScheduleStore>) -> Self {
        Self::new(
            store,
            Arc::new(NaiveDistribution),
            Arc::new(SystemClock),
            Arc::new(UuidIdGenerator),
        )
    }

    /// Schedule a single post at a caller-supplied local wall-clock time.
    ///
    /// `requested` is interpreted in `timezone` when given, otherwise in the
    /// owning brand's default timezone. Replaces any existing schedule for
    /// the post with a fresh pending one.
    #[instrument(skip(self), fields(post_id = %post_id))]
    pub async fn schedule_post(
        &self,
        post_id: Uuid,
        requested: NaiveDateTime,
        timezone: Option<&str>,
    ) -> Result<Schedule, SchedulingError> {
        match self.schedule_post_inner(post_id, requested, timezone).await {
            Ok(schedule) => Ok(schedule),
            Err(err) => {
                telemetry::record_scheduling_failure(error_reason(&err));
                Err(err)
            }
        }
    }

    async fn schedule_post_inner(
        &self,
        post_id: Uuid,
        requested: NaiveDateTime,
        timezone: Option<&str>,
    ) -> Result<Schedule, SchedulingError> {
        let post = self
            .store
            .post(post_id)
            .await?
            .ok_or(NotFoundError::Post(post_id))?;

        let tz = match timezone {
            Some(name) => parse_timezone(name)?,
            None => {
                let brand = self
                    .store
                    .brand(post.brand_id)
                    .await?
                    .ok_or(NotFoundError::Brand(post.brand_id))?;
                brand.timezone()?
            }
        };

        let publish_time = to_utc(requested, tz)?;
        let schedule = Schedule::pending(self.ids.generate(), post.id, publish_time, self.clock.now());
        self.store.replace_schedule(&schedule).await?;

        telemetry::record_schedules_created(1);
        info!(
            schedule_id = %schedule.id,
            publish_time = %schedule.publish_time,
            timezone = %tz.name(),
            "Post scheduled"
        );

        Ok(schedule)
    }

    /// Schedule every post of a campaign across its date window.
    ///
    /// Slots come from the distribution strategy at the fixed publish hour in
    /// the brand's default timezone. The whole batch is persisted atomically;
    /// a failed write leaves existing schedules untouched. Returns schedules
    /// in post placement order.
    #[instrument(skip(self), fields(campaign_id = %campaign_id))]
    pub async fn schedule_campaign(
        &self,
        campaign_id: Uuid,
    ) -> Result<Vec<Schedule>, SchedulingError> {
        match self.schedule_campaign_inner(campaign_id).await {
            Ok(schedules) => Ok(schedules),
            Err(err) => {
                telemetry::record_scheduling_failure(error_reason(&err));
                Err(err)
            }
        }
    }

    async fn schedule_campaign_inner(
        &self,
        campaign_id: Uuid,
    ) -> Result<Vec<Schedule>, SchedulingError> {
        let campaign = self
            .store
            .campaign(campaign_id)
            .await?
            .ok_or(NotFoundError::Campaign(campaign_id))?;

        let brand = self
            .store
            .brand(campaign.brand_id)
            .await?
            .ok_or(NotFoundError::Brand(campaign.brand_id))?;
        let tz = brand.timezone()?;

        let posts = self
            .store
            .posts_for_campaign(campaign.id, TARGET_PLATFORM)
            .await?;
        if posts.is_empty() {
            return Err(ValidationError::EmptyCampaign(campaign.id).into());
        }

        let dates =
            self.strategy
                .distribute(campaign.start_date, campaign.end_date, posts.len())?;

        let now = self.clock.now();
        let mut schedules = Vec::with_capacity(posts.len());
        for (post, date) in posts.iter().zip(dates) {
            let local = distribution::publish_slot(date);
            let publish_time = to_utc(local, tz)?;
            schedules.push(Schedule::pending(self.ids.generate(), post.id, publish_time, now));
        }

        self.store.replace_schedules(&schedules).await?;

        telemetry::record_schedules_created(schedules.len());
        telemetry::record_campaign_batch(&campaign.id, schedules.len());
        info!(
            campaign_id = %campaign.id,
            count = schedules.len(),
            timezone = %tz.name(),
            "Campaign scheduled"
        );

        Ok(schedules)
    }

    /// Fetch the active schedule for a post
    #[instrument(skip(self), fields(post_id = %post_id))]
    pub async fn get_post_schedule(&self, post_id: Uuid) -> Result<Schedule, SchedulingError> {
        let post = self
            .store
            .post(post_id)
            .await?
            .ok_or(NotFoundError::Post(post_id))?;

        match self.store.schedule_for_post(post.id).await? {
            Some(schedule) => Ok(schedule),
            None => Err(NotFoundError::ScheduleForPost(post_id).into()),
        }
    }

    /// Fetch all schedules for a campaign's posts, in stable post order
    #[instrument(skip(self), fields(campaign_id = %campaign_id))]
    pub async fn get_campaign_schedules(
        &self,
        campaign_id: Uuid,
    ) -> Result<Vec<Schedule>, SchedulingError> {
        let campaign = self
            .store
            .campaign(campaign_id)
            .await?
            .ok_or(NotFoundError::Campaign(campaign_id))?;

        let schedules = self.store.schedules_for_campaign(campaign.id).await?;
        if schedules.is_empty() {
            return Err(NotFoundError::SchedulesForCampaign(campaign_id).into());
        }

        Ok(schedules)
    }
}

/// Parse a caller-supplied IANA timezone name
fn parse_timezone(name: &str) -> Result<Tz, ValidationError> {
    Tz::from_str(name).map_err(|_| ValidationError::InvalidTimezone(name.to_string()))
}

/// Convert a local wall-clock time to UTC.
///
/// Ambiguous times during a fall-back overlap resolve to the earlier
/// instant. Times inside a spring-forward gap do not exist on the local
/// clock and are rejected.
fn to_utc(local: NaiveDateTime, tz: Tz) -> Result<DateTime<Utc>, ValidationError> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earlier, _) => Ok(earlier.with_timezone(&Utc)),
        LocalResult::None => Err(ValidationError::NonexistentLocalTime {
            local,
            timezone: tz.name().to_string(),
        }),
    }
}

/// Metric label for a failed scheduling request
fn error_reason(err: &SchedulingError) -> &'static str {
    match err {
        SchedulingError::Validation(_) => "validation",
        SchedulingError::NotFound(_) => "not_found",
        SchedulingError::Storage(_) => "storage",
    }
}
