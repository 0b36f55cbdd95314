//! Review Scheduler - owns one learner's mastery records

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::record::{MasteryRecord, MasteryTier};
use super::sm2::{SchedulerConfig, apply_review};

/// Response time (fraction of the limit) under which a correct answer grades 5
const FAST_ANSWER_RATIO: f64 = 0.5;

// ============================================================================
// ANSWER GRADING
// ============================================================================

/// Derive a quality-of-recall grade from a right/wrong answer.
///
/// | Answer  | Timing                        | Grade |
/// |---------|-------------------------------|-------|
/// | correct | within half the limit         | 5     |
/// | correct | within the limit, or no limit | 4     |
/// | correct | over the limit                | 3     |
/// | wrong   | within the limit, or no limit | 1     |
/// | wrong   | over the limit                | 0     |
pub fn quality_from_answer(
    correct: bool,
    response_time: Duration,
    time_limit: Option<Duration>,
) -> u8 {
    let ratio = time_limit
        .filter(|limit| *limit > Duration::zero())
        .map(|limit| response_time.as_seconds_f64().max(0.0) / limit.as_seconds_f64());

    match (correct, ratio) {
        (true, Some(r)) if r <= FAST_ANSWER_RATIO => 5,
        (true, Some(r)) if r <= 1.0 => 4,
        (true, Some(_)) => 3,
        (true, None) => 4,
        (false, Some(r)) if r > 1.0 => 0,
        (false, _) => 1,
    }
}

// ============================================================================
// STATISTICS
// ============================================================================

/// Aggregate view over a learner's records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStats {
    /// Records that exist (structures reviewed at least once, or reset)
    pub tracked: usize,
    /// Tracked records due at the reference time
    pub due: usize,
    /// Records per tier
    pub mastered: usize,
    pub reviewing: usize,
    pub learning: usize,
    /// Mean ease factor over tracked records (0.0 when none)
    pub average_ease: f64,
    /// Passed reviews over all reviews (0.0 when none)
    pub accuracy: f64,
}

// ============================================================================
// SCHEDULER
// ============================================================================

/// SM-2 review scheduler for one learner.
///
/// Records are keyed by structure id. Mutations touch exactly one record, and
/// the caller serializes concurrent reviews of the same learner.
#[derive(Debug, Clone, Default)]
pub struct ReviewScheduler {
    config: SchedulerConfig,
    records: HashMap<String, MasteryRecord>,
}

impl ReviewScheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            records: HashMap::new(),
        }
    }

    /// Rehydrate a scheduler from persisted records
    pub fn with_records(
        config: SchedulerConfig,
        records: impl IntoIterator<Item = MasteryRecord>,
    ) -> Self {
        let records = records
            .into_iter()
            .map(|r| (r.structure_id.clone(), r))
            .collect();
        Self { config, records }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Grade a review and advance the structure's schedule.
    ///
    /// Creates the record on first review. Out-of-range quality is clamped.
    pub fn record_review(
        &mut self,
        structure_id: &str,
        quality: i32,
        now: DateTime<Utc>,
    ) -> &MasteryRecord {
        let initial_ease = self.config.initial_ease;
        let record = self
            .records
            .entry(structure_id.to_string())
            .or_insert_with(|| MasteryRecord::with_ease(structure_id, initial_ease));

        apply_review(record, quality, now, &self.config);

        tracing::debug!(
            structure_id,
            quality,
            ease = record.ease_factor,
            interval_days = record.interval_days,
            review_count = record.review_count,
            "Review recorded"
        );
        record
    }

    /// Grade a right/wrong answer by timing (see [`quality_from_answer`]) and
    /// record it as a review
    pub fn record_answer(
        &mut self,
        structure_id: &str,
        correct: bool,
        response_time: Duration,
        time_limit: Option<Duration>,
        now: DateTime<Utc>,
    ) -> &MasteryRecord {
        let quality = quality_from_answer(correct, response_time, time_limit);
        self.record_review(structure_id, quality as i32, now)
    }

    /// Return a record to its never-reviewed state. Unknown ids are a no-op.
    pub fn reset(&mut self, structure_id: &str) -> Option<&MasteryRecord> {
        let initial_ease = self.config.initial_ease;
        let record = self.records.get_mut(structure_id)?;
        *record = MasteryRecord::with_ease(structure_id, initial_ease);
        tracing::info!(structure_id, "Mastery record reset");
        Some(&*record)
    }

    pub fn get(&self, structure_id: &str) -> Option<&MasteryRecord> {
        self.records.get(structure_id)
    }

    /// Whether a structure is due; structures with no record always are
    pub fn is_due(&self, structure_id: &str, as_of: DateTime<Utc>) -> bool {
        self.records
            .get(structure_id)
            .is_none_or(|record| record.is_due(as_of))
    }

    /// All records, keyed by structure id
    pub fn records(&self) -> &HashMap<String, MasteryRecord> {
        &self.records
    }

    /// Hand every record to the persistence layer
    pub fn into_records(self) -> HashMap<String, MasteryRecord> {
        self.records
    }

    pub fn stats(&self, as_of: DateTime<Utc>) -> ReviewStats {
        let mut stats = ReviewStats {
            tracked: self.records.len(),
            ..Default::default()
        };
        if self.records.is_empty() {
            return stats;
        }

        let mut ease_sum = 0.0;
        let (mut correct, mut total) = (0u64, 0u64);
        for record in self.records.values() {
            ease_sum += record.ease_factor;
            correct += record.correct_count as u64;
            total += record.correct_count as u64 + record.incorrect_count as u64;
            if record.is_due(as_of) {
                stats.due += 1;
            }
            match record.mastery_tier() {
                MasteryTier::Mastered => stats.mastered += 1,
                MasteryTier::Reviewing => stats.reviewing += 1,
                MasteryTier::Learning => stats.learning += 1,
                MasteryTier::New => {}
            }
        }

        stats.average_ease = ease_sum / self.records.len() as f64;
        if total > 0 {
            stats.accuracy = correct as f64 / total as f64;
        }
        stats
    }
}

// ============================================================================
// TESTS
// ============================================================================
