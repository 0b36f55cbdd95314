//! Test Learner
//!
//! Drives the full engine the way an application would:
//! - Session selection from the catalog and the learner's records
//! - Per-answer scheduling and difficulty adaptation
//! - Session scoring and XP accumulation
//! - A virtual clock, advanced explicitly
//! - Record snapshots, serialized the way a persistence layer would store them

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use sinew_core::{
    ActivityKind, Catalog, DifficultyAdapter, DifficultyLevel, DifficultyState, DueSetSelector,
    EngineConfig, LevelProgress, MasteryRecord, ReviewScheduler, ScoreEngine, SessionOutcome,
    SessionScore, Structure,
};

/// One answer given during a simulated session
#[derive(Debug, Clone, Copy)]
pub struct AnsweredItem {
    pub correct: bool,
    pub response_time: Duration,
}

impl AnsweredItem {
    pub fn right(seconds: i64) -> Self {
        Self {
            correct: true,
            response_time: Duration::seconds(seconds),
        }
    }

    pub fn wrong(seconds: i64) -> Self {
        Self {
            correct: false,
            response_time: Duration::seconds(seconds),
        }
    }
}

/// A simulated learner with its own records and difficulty states
///
/// # Example
///
/// ```rust,ignore
/// let mut learner = TestLearner::new(TestDataFactory::upper_limb_catalog());
/// let pool = learner.session_ids();
/// learner.review(&pool[0], 5);
/// learner.advance_days(1);
/// ```
pub struct TestLearner {
    pub catalog: Catalog,
    pub scheduler: ReviewScheduler,
    pub difficulty: DifficultyAdapter,
    selector: DueSetSelector,
    scoring: ScoreEngine,
    now: DateTime<Utc>,
    total_xp: u64,
    /// Serialized records for restore operations
    snapshot: Option<String>,
}

impl TestLearner {
    /// Learner with default configuration, starting at the factory epoch
    pub fn new(catalog: Catalog) -> Self {
        Self::with_config(catalog, EngineConfig::default())
    }

    pub fn with_config(catalog: Catalog, config: EngineConfig) -> Self {
        Self {
            catalog,
            scheduler: ReviewScheduler::new(config.scheduler),
            difficulty: DifficultyAdapter::new(config.difficulty),
            selector: DueSetSelector::new(config.selector),
            scoring: ScoreEngine::new(config.scoring),
            now: crate::mocks::TestDataFactory::epoch(),
            total_xp: 0,
            snapshot: None,
        }
    }

    /// Replace the learner's records
    pub fn with_records(mut self, records: HashMap<String, MasteryRecord>) -> Self {
        self.scheduler =
            ReviewScheduler::with_records(self.scheduler.config().clone(), records.into_values());
        self
    }

    // ========================================================================
    // CLOCK
    // ========================================================================

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn advance(&mut self, by: Duration) {
        self.now += by;
    }

    pub fn advance_days(&mut self, days: i64) {
        self.advance(Duration::days(days));
    }

    // ========================================================================
    // SELECTION AND REVIEW
    // ========================================================================

    /// Today's session pool
    pub fn session(&self) -> Vec<&Structure> {
        self.selector
            .select(&self.catalog, self.scheduler.records(), self.now)
    }

    pub fn session_ids(&self) -> Vec<String> {
        self.session().iter().map(|s| s.id.clone()).collect()
    }

    pub fn review(&mut self, structure_id: &str, quality: i32) -> MasteryRecord {
        self.scheduler
            .record_review(structure_id, quality, self.now)
            .clone()
    }

    pub fn record(&self, structure_id: &str) -> Option<&MasteryRecord> {
        self.scheduler.get(structure_id)
    }

    /// Review every structure in today's pool with the same grade
    pub fn review_session(&mut self, quality: i32) -> Vec<String> {
        let ids = self.session_ids();
        for id in &ids {
            self.review(id, quality);
        }
        ids
    }

    // ========================================================================
    // ACTIVITIES
    // ========================================================================

    /// Play one activity over `items`, answering in order.
    ///
    /// Every answer schedules its structure and feeds the activity's difficulty.
    /// The session is scored at the difficulty it started on.
    pub fn play(
        &mut self,
        activity: ActivityKind,
        items: &[&str],
        answers: &[AnsweredItem],
        time_limit: Option<Duration>,
    ) -> SessionScore {
        let difficulty = self.difficulty.level(activity);
        let per_item_limit = time_limit.map(|limit| limit / items.len().max(1) as i32);

        let mut correct = 0;
        let mut incorrect = 0;
        let mut streak = 0u32;
        let mut best_streak = 0u32;
        let mut elapsed = Duration::zero();

        for (id, answer) in items.iter().zip(answers) {
            self.scheduler.record_answer(
                id,
                answer.correct,
                answer.response_time,
                per_item_limit,
                self.now,
            );
            self.difficulty.record_outcome(activity, answer.correct);

            elapsed += answer.response_time;
            if answer.correct {
                correct += 1;
                streak += 1;
                best_streak = best_streak.max(streak);
            } else {
                incorrect += 1;
                streak = 0;
            }
        }

        let outcome = SessionOutcome {
            correct,
            incorrect,
            elapsed,
            time_limit,
            streak: best_streak,
            activity,
            difficulty,
        };
        let scored = self.scoring.score_outcome(&outcome);
        self.total_xp += scored.xp;
        self.advance(elapsed);
        scored
    }

    pub fn level(&self, activity: ActivityKind) -> DifficultyLevel {
        self.difficulty.level(activity)
    }

    pub fn difficulty_state(&self, activity: ActivityKind) -> DifficultyState {
        self.difficulty.state(activity)
    }

    pub fn total_xp(&self) -> u64 {
        self.total_xp
    }

    pub fn progress(&self) -> LevelProgress {
        self.scoring.level_for_xp(self.total_xp)
    }

    // ========================================================================
    // SNAPSHOTS
    // ========================================================================

    /// Serialize every record as a persistence layer would
    pub fn take_snapshot(&mut self) {
        let records: Vec<&MasteryRecord> = self.scheduler.records().values().collect();
        self.snapshot = Some(serde_json::to_string(&records).expect("records serialize"));
    }

    pub fn has_snapshot(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Forget every record
    pub fn clear(&mut self) {
        self.scheduler = ReviewScheduler::new(self.scheduler.config().clone());
    }

    /// Rehydrate records from the last snapshot
    pub fn restore_snapshot(&mut self) -> bool {
        let Some(json) = &self.snapshot else {
            return false;
        };
        let records: Vec<MasteryRecord> =
            serde_json::from_str(json).expect("snapshot deserializes");
        self.scheduler = ReviewScheduler::with_records(self.scheduler.config().clone(), records);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::TestDataFactory;

    #[test]
    fn test_fresh_learner_sees_whole_small_catalog() {
        let learner = TestLearner::new(TestDataFactory::upper_limb_catalog());
        assert_eq!(learner.session().len(), 12);
        assert_eq!(learner.total_xp(), 0);
    }

    #[test]
    fn test_clock_advances() {
        let mut learner = TestLearner::new(TestDataFactory::create_batch(3));
        let start = learner.now();
        learner.advance_days(2);
        assert_eq!(learner.now() - start, Duration::days(2));
    }

    #[test]
    fn test_snapshot_restore() {
        let mut learner = TestLearner::new(TestDataFactory::upper_limb_catalog());
        learner.review("radius", 5);
        learner.review("ulna", 2);

        learner.take_snapshot();
        assert!(learner.has_snapshot());

        learner.clear();
        assert!(learner.scheduler.records().is_empty());

        assert!(learner.restore_snapshot());
        assert_eq!(learner.scheduler.records().len(), 2);
        assert_eq!(learner.record("ulna").map(|r| r.interval_days), Some(1));
    }
}
