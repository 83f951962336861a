// Distribution engine: deterministic publish-date placement across a campaign window

use chrono::{Duration, NaiveDate, NaiveDateTime};
use common::errors::ValidationError;
use common::models::Platform;

/// Fixed brand-local publish hour for campaign slots (7 PM)
pub const PUBLISH_HOUR: u32 = 19;

/// Fixed brand-local publish minute for campaign slots
pub const PUBLISH_MINUTE: u32 = 0;

/// Platform campaign scheduling currently targets
pub const TARGET_PLATFORM: Platform = Platform::Twitter;

/// DistributionStrategy maps a campaign window and post count to one
/// publish date per post.
///
/// The orchestrator depends on this trait, not a concrete algorithm, so a
/// different placement policy can be swapped in without touching it.
pub trait DistributionStrategy: Send + Sync {
    /// Compute one date per post across the inclusive `[start, end]` window.
    ///
    /// Returns dates in placement order: the caller maps posts to results by
    /// position. The sequence is strictly increasing, starts at `start`, and
    /// ends at `end` (for two or more posts).
    fn distribute(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        post_count: usize,
    ) -> Result<Vec<NaiveDate>, ValidationError>;
}

/// Rule-based distribution: endpoints pinned, the rest spread evenly.
///
/// Deterministic and index-based; at most one post lands on any day.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaiveDistribution;

impl DistributionStrategy for NaiveDistribution {
    fn distribute(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        post_count: usize,
    ) -> Result<Vec<NaiveDate>, ValidationError> {
        if end < start {
            return Err(ValidationError::InvalidDateWindow { start, end });
        }

        let span = (end - start).num_days();
        let total_days = span + 1;

        if post_count as i64 > total_days {
            return Err(ValidationError::PostCountExceedsDays {
                posts: post_count,
                days: total_days,
            });
        }

        match post_count {
            0 => Ok(Vec::new()),
            1 => Ok(vec![start]),
            2 => Ok(vec![start, end]),
            _ => {
                let mut dates = Vec::with_capacity(post_count);
                dates.push(start);

                // Middle posts at round(i * span / (post_count - 1)) days from
                // start. The step between consecutive offsets is at least one
                // whole day whenever post_count <= total_days, so the guards
                // below only fire on degenerate rounding ties: advance to the
                // next unused day, staying strictly inside the window.
                let mut prev = start;
                for i in 1..=(post_count - 2) {
                    let offset =
                        ((i as f64 * span as f64) / (post_count as f64 - 1.0)).round() as i64;
                    let mut day = start + Duration::days(offset);
                    if day <= prev {
                        day = prev + Duration::days(1);
                    }
                    if day >= end {
                        day = end - Duration::days(1);
                    }
                    dates.push(day);
                    prev = day;
                }

                dates.push(end);
                Ok(dates)
            }
        }
    }
}

/// Combine a distributed date with the fixed publish hour into the
/// brand-local wall-clock slot
pub fn publish_slot(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(PUBLISH_HOUR, PUBLISH_MINUTE, 0)
        .expect("fixed publish time is a valid wall-clock time")
}
