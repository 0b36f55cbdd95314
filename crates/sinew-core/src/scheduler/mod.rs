//! Review Scheduler
//!
//! SM-2 family spaced repetition over per-structure mastery records:
//! - Ease factor moves on every review, floored at 1.3
//! - Interval resets to one day on a failed review
//! - Graduating steps of 1 and 6 days, then multiplied by ease
//! - Every time-dependent call takes an explicit timestamp

mod record;
mod review;
mod sm2;

pub use record::{
    DEFAULT_EASE, MASTERED_INTERVAL_DAYS, MINIMUM_EASE, MasteryRecord, MasteryTier, is_due,
};
pub use review::{ReviewScheduler, ReviewStats, quality_from_answer};
pub use sm2::{
    MAX_INTERVAL_DAYS, MAX_QUALITY, PASSING_QUALITY, SchedulerConfig, apply_review, clamp_quality, next_ease,
    next_interval,
};
