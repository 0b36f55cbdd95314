//! SM-2 update rule
//!
//! ## Core Formulas:
//! - Ease: EF' = max(EF_min, EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02)))
//! - Interval: q < 3 → 1; first pass → 1; second pass → 6; later passes → round(I * EF')
//!
//! The ease moves on every review, failed or not. Only the interval resets.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::record::{DEFAULT_EASE, MINIMUM_EASE, MasteryRecord};

/// Highest quality-of-recall grade
pub const MAX_QUALITY: u8 = 5;

/// Lowest grade that counts as a successful recall
pub const PASSING_QUALITY: u8 = 3;

/// Longest interval a scheduler can be configured with (about a century)
pub const MAX_INTERVAL_DAYS: u32 = 36_500;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Tunable constants of the review scheduler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SchedulerConfig {
    /// Ease assigned to a record on creation
    pub initial_ease: f64,
    /// Ease floor
    pub minimum_ease: f64,
    /// Interval after the first passing review
    pub first_interval_days: u32,
    /// Interval after the second passing review
    pub second_interval_days: u32,
    /// Interval after any failed review
    pub failed_interval_days: u32,
    /// Upper bound on any interval, at most [`MAX_INTERVAL_DAYS`]
    pub maximum_interval_days: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            initial_ease: DEFAULT_EASE,
            minimum_ease: MINIMUM_EASE,
            first_interval_days: 1,
            second_interval_days: 6,
            failed_interval_days: 1,
            maximum_interval_days: MAX_INTERVAL_DAYS,
        }
    }
}

// ============================================================================
// PURE FUNCTIONS
// ============================================================================

/// Clamp an arbitrary grade into `0..=5`
pub fn clamp_quality(quality: i32) -> u8 {
    quality.clamp(0, MAX_QUALITY as i32) as u8
}

/// Ease after a review graded `quality`, floored at `minimum_ease`
pub fn next_ease(ease: f64, quality: u8, minimum_ease: f64) -> f64 {
    let miss = (MAX_QUALITY - quality.min(MAX_QUALITY)) as f64;
    let candidate = ease + (0.1 - miss * (0.08 + miss * 0.02));
    candidate.max(minimum_ease)
}

/// Interval after a review.
///
/// `review_count` and `interval_days` are the values *before* the review;
/// `ease` is the already-updated ease.
pub fn next_interval(
    review_count: u32,
    interval_days: u32,
    ease: f64,
    quality: u8,
    config: &SchedulerConfig,
) -> u32 {
    let interval = if quality < PASSING_QUALITY {
        config.failed_interval_days
    } else {
        match review_count {
            0 => config.first_interval_days,
            1 => config.second_interval_days,
            // A passing review never schedules the same day
            _ => ((interval_days as f64 * ease).round() as u32).max(1),
        }
    };
    interval.min(config.maximum_interval_days)
}

/// Apply one review to `record` at `now`.
///
/// This is the whole state transition: ease, interval, counters and both
/// timestamps. Quality is clamped, so no input can fail.
pub fn apply_review(
    record: &mut MasteryRecord,
    quality: i32,
    now: DateTime<Utc>,
    config: &SchedulerConfig,
) {
    let q = clamp_quality(quality);
    if q as i32 != quality {
        tracing::debug!(
            structure_id = %record.structure_id,
            quality,
            clamped = q,
            "Quality of recall out of range, clamped"
        );
    }

    let ease = next_ease(record.ease_factor, q, config.minimum_ease);
    let interval = next_interval(record.review_count, record.interval_days, ease, q, config);

    record.ease_factor = ease;
    record.interval_days = interval;
    record.review_count = record.review_count.saturating_add(1);
    if q >= PASSING_QUALITY {
        record.correct_count = record.correct_count.saturating_add(1);
    } else {
        record.incorrect_count = record.incorrect_count.saturating_add(1);
    }
    record.last_review = Some(now);
    record.next_review = Some(next_review_date(now, interval));
}

/// `now + interval_days`, saturating at the end of the representable range
fn next_review_date(now: DateTime<Utc>, interval_days: u32) -> DateTime<Utc> {
    now.checked_add_signed(Duration::days(interval_days as i64))
        .unwrap_or_else(|| {
            tracing::warn!(%now, interval_days, "Next review date out of range, saturated");
            DateTime::<Utc>::MAX_UTC
        })
}
