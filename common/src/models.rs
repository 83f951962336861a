// Domain models for brands, campaigns, posts, and schedules

use crate::errors::ValidationError;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

// ============================================================================
// Brand
// ============================================================================

/// Brand owning campaigns and posts. Read-only input to scheduling.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Brand {
    pub id: Uuid,
    pub name: String,
    /// IANA timezone name used when a request carries no explicit zone
    pub default_timezone: String,
    pub tone_profile: String,
}

impl Brand {
    /// Parse the brand's default timezone into a concrete zone
    pub fn timezone(&self) -> Result<Tz, ValidationError> {
        Tz::from_str(&self.default_timezone)
            .map_err(|_| ValidationError::InvalidTimezone(self.default_timezone.clone()))
    }
}

// ============================================================================
// Campaign
// ============================================================================

/// Campaign with an inclusive calendar window in brand-local time.
/// Invariant: `end_date >= start_date`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Campaign {
    pub id: Uuid,
    pub brand_id: Uuid,
    pub name: String,
    pub goal: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[sqlx(try_from = "String")]
    pub status: CampaignStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// CampaignStatus tracks the campaign's own lifecycle, not scheduling
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Draft,
    Scheduled,
    Active,
    Paused,
    Completed,
    Cancelled,
}

impl std::fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CampaignStatus::Draft => write!(f, "draft"),
            CampaignStatus::Scheduled => write!(f, "scheduled"),
            CampaignStatus::Active => write!(f, "active"),
            CampaignStatus::Paused => write!(f, "paused"),
            CampaignStatus::Completed => write!(f, "completed"),
            CampaignStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl FromStr for CampaignStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(CampaignStatus::Draft),
            "scheduled" => Ok(CampaignStatus::Scheduled),
            "active" => Ok(CampaignStatus::Active),
            "paused" => Ok(CampaignStatus::Paused),
            "completed" => Ok(CampaignStatus::Completed),
            "cancelled" => Ok(CampaignStatus::Cancelled),
            _ => Err(format!("Invalid campaign status: {}", s)),
        }
    }
}

impl TryFrom<String> for CampaignStatus {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_str(&s)
    }
}

// ============================================================================
// Post
// ============================================================================

/// A piece of content awaiting a publish slot
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: Uuid,
    pub brand_id: Uuid,
    pub campaign_id: Uuid,
    pub title: String,
    pub media_url: String,
    #[sqlx(try_from = "String")]
    pub platform: Platform,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Platform the post targets
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Twitter,
    Youtube,
    Instagram,
    Linkedin,
    Reddit,
    Tiktok,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Twitter => write!(f, "twitter"),
            Platform::Youtube => write!(f, "youtube"),
            Platform::Instagram => write!(f, "instagram"),
            Platform::Linkedin => write!(f, "linkedin"),
            Platform::Reddit => write!(f, "reddit"),
            Platform::Tiktok => write!(f, "tiktok"),
        }
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "twitter" => Ok(Platform::Twitter),
            "youtube" => Ok(Platform::Youtube),
            "instagram" => Ok(Platform::Instagram),
            "linkedin" => Ok(Platform::Linkedin),
            "reddit" => Ok(Platform::Reddit),
            "tiktok" => Ok(Platform::Tiktok),
            _ => Err(format!("Invalid platform: {}", s)),
        }
    }
}

impl TryFrom<String> for Platform {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_str(&s)
    }
}

// ============================================================================
// Schedule
// ============================================================================

/// Schedule pairs a post with its UTC publish instant and publish status.
/// At most one active schedule exists per post; re-scheduling replaces it.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Schedule {
    pub id: Uuid,
    pub post_id: Uuid,
    pub publish_time: DateTime<Utc>,
    #[sqlx(try_from = "String")]
    pub status: ScheduleStatus,
    /// Publish attempts made by the publishing collaborator, not scheduling attempts
    pub retry_count: i32,
    pub created_at: DateTime<Utc>,
}

impl Schedule {
    /// Create a fresh pending schedule for a post.
    ///
    /// The identifier and creation time come from the caller so that token
    /// generation and the clock stay injectable.
    pub fn pending(id: Uuid, post_id: Uuid, publish_time: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            post_id,
            publish_time,
            status: ScheduleStatus::Pending,
            retry_count: 0,
            created_at: now,
        }
    }
}

/// Publish lifecycle of a schedule.
///
/// The orchestrator only ever writes `Pending`; the publishing collaborator
/// moves it to `Published` on success or `Failed` once retries are exhausted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    Pending,
    Published,
    Failed,
}

impl std::fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleStatus::Pending => write!(f, "pending"),
            ScheduleStatus::Published => write!(f, "published"),
            ScheduleStatus::Failed => write!(f, "failed"),
        }
    }
}

impl FromStr for ScheduleStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ScheduleStatus::Pending),
            "published" => Ok(ScheduleStatus::Published),
            "failed" => Ok(ScheduleStatus::Failed),
            _ => Err(format!("Invalid schedule status: {}", s)),
        }
    }
}

impl TryFrom<String> for ScheduleStatus {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_str(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brand_timezone_parses_iana_name() {
        let brand = Brand {
            id: Uuid::new_v4(),
            name: "Acme".to_string(),
            default_timezone: "America/New_York".to_string(),
            tone_profile: "playful".to_string(),
        };
        assert_eq!(brand.timezone().unwrap(), chrono_tz::America::New_York);
    }

    #[test]
    fn test_brand_timezone_rejects_unknown_name() {
        let brand = Brand {
            id: Uuid::new_v4(),
            name: "Acme".to_string(),
            default_timezone: "Not/AZone".to_string(),
            tone_profile: "playful".to_string(),
        };
        assert!(matches!(
            brand.timezone(),
            Err(ValidationError::InvalidTimezone(_))
        ));
    }

    #[test]
    fn test_schedule_status_round_trip() {
        for status in [
            ScheduleStatus::Pending,
            ScheduleStatus::Published,
            ScheduleStatus::Failed,
        ] {
            let parsed: ScheduleStatus = status.to_string().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_schedule_status_rejects_unknown() {
        assert!("archived".parse::<ScheduleStatus>().is_err());
    }

    #[test]
    fn test_pending_schedule_starts_clean() {
        let now = Utc::now();
        let schedule = Schedule::pending(Uuid::new_v4(), Uuid::new_v4(), now, now);
        assert_eq!(schedule.status, ScheduleStatus::Pending);
        assert_eq!(schedule.retry_count, 0);
    }

    #[test]
    fn test_platform_round_trip() {
        let parsed: Platform = Platform::Twitter.to_string().parse().unwrap();
        assert_eq!(parsed, Platform::Twitter);
    }
}
