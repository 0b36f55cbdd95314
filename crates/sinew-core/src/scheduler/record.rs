//! Mastery Record - per-user, per-structure study progress

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ease factor every new record starts with
pub const DEFAULT_EASE: f64 = 2.5;

/// Floor below which the ease factor never drops
pub const MINIMUM_EASE: f64 = 1.3;

/// Interval (days) at which a record counts as mastered
pub const MASTERED_INTERVAL_DAYS: u32 = 21;

// ============================================================================
// MASTERY TIER
// ============================================================================

/// Coarse progress bucket derived from a record's numeric state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MasteryTier {
    /// Never reviewed
    New,
    /// Reviewed, interval still under the second graduating step
    Learning,
    /// Interval at or beyond six days
    Reviewing,
    /// Interval at or beyond three weeks
    Mastered,
}

impl MasteryTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            MasteryTier::New => "new",
            MasteryTier::Learning => "learning",
            MasteryTier::Reviewing => "reviewing",
            MasteryTier::Mastered => "mastered",
        }
    }
}

impl std::fmt::Display for MasteryTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ============================================================================
// MASTERY RECORD
// ============================================================================

/// Scheduling state for one (user, structure) pair.
///
/// Created lazily on first review, never deleted, only reset. When
/// `next_review` is present it always equals `last_review + interval_days`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasteryRecord {
    /// Structure this record tracks
    pub structure_id: String,
    /// SM-2 ease factor, never below [`MINIMUM_EASE`]
    pub ease_factor: f64,
    /// Current interval in days
    pub interval_days: u32,
    /// Number of reviews, pass or fail
    pub review_count: u32,
    /// When the structure was last reviewed
    pub last_review: Option<DateTime<Utc>>,
    /// When the structure is next due (None = never reviewed, always due)
    pub next_review: Option<DateTime<Utc>>,
    /// Reviews graded as a pass
    #[serde(default)]
    pub correct_count: u32,
    /// Reviews graded as a fail
    #[serde(default)]
    pub incorrect_count: u32,
}

impl MasteryRecord {
    /// A never-reviewed record with the default ease
    pub fn new(structure_id: impl Into<String>) -> Self {
        Self::with_ease(structure_id, DEFAULT_EASE)
    }

    /// A never-reviewed record with a custom starting ease
    pub fn with_ease(structure_id: impl Into<String>, ease_factor: f64) -> Self {
        Self {
            structure_id: structure_id.into(),
            ease_factor,
            interval_days: 0,
            review_count: 0,
            last_review: None,
            next_review: None,
            correct_count: 0,
            incorrect_count: 0,
        }
    }

    /// Whether this record should be studied at `as_of`
    pub fn is_due(&self, as_of: DateTime<Utc>) -> bool {
        is_due(self, as_of)
    }

    /// Fraction of reviews that passed, 0.0 when never reviewed
    pub fn accuracy(&self) -> f64 {
        let total = self.correct_count as u64 + self.incorrect_count as u64;
        if total == 0 {
            0.0
        } else {
            self.correct_count as f64 / total as f64
        }
    }

    pub fn mastery_tier(&self) -> MasteryTier {
        if self.review_count == 0 {
            MasteryTier::New
        } else if self.interval_days >= MASTERED_INTERVAL_DAYS {
            MasteryTier::Mastered
        } else if self.interval_days >= 6 {
            MasteryTier::Reviewing
        } else {
            MasteryTier::Learning
        }
    }
}

/// True when the record was never scheduled or its next review has arrived
pub fn is_due(record: &MasteryRecord, as_of: DateTime<Utc>) -> bool {
    record.next_review.is_none_or(|next| next <= as_of)
}
