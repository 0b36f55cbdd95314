//! Score Engine
//!
//! Stateless conversion of session performance into score and experience points.
//!
//! ## Core Formulas:
//! - Base: (correct / total) * max_base_score
//! - Time multiplier: 1 + min(0.5, 1 - elapsed / limit) * time_bonus_factor(level), when finished early
//! - Score: round(base * score_multiplier(level) * time multiplier)
//! - XP to next level: round(base_xp * growth^(level - 1))

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::activity::ActivityKind;
use crate::difficulty::DifficultyLevel;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Score-to-XP conversion factor per activity kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct XpConversion {
    pub flashcard: f64,
    pub multiple_choice: f64,
    pub labeling: f64,
    pub matching: f64,
    pub timed_challenge: f64,
}

impl Default for XpConversion {
    fn default() -> Self {
        Self {
            flashcard: 0.05,
            multiple_choice: 0.08,
            labeling: 0.12,
            matching: 0.10,
            timed_challenge: 0.15,
        }
    }
}

impl XpConversion {
    pub fn factor(&self, activity: ActivityKind) -> f64 {
        match activity {
            ActivityKind::Flashcard => self.flashcard,
            ActivityKind::MultipleChoice => self.multiple_choice,
            ActivityKind::Labeling => self.labeling,
            ActivityKind::Matching => self.matching,
            ActivityKind::TimedChallenge => self.timed_challenge,
        }
    }
}

/// Scoring constants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoringConfig {
    /// Score for a perfect session before multipliers
    pub max_base_score: u32,
    /// Cap on the early-finish fraction fed into the time bonus
    pub time_bonus_cap: f64,
    /// XP needed to leave level 1
    pub base_xp: f64,
    /// Growth of the XP requirement per level, above 1.0
    pub xp_growth: f64,
    pub xp_conversion: XpConversion,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            max_base_score: 1000,
            time_bonus_cap: 0.5,
            base_xp: 100.0,
            xp_growth: 1.5,
            xp_conversion: XpConversion::default(),
        }
    }
}

// ============================================================================
// INPUT / OUTPUT
// ============================================================================

/// Raw result of one session, as reported by an activity
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOutcome {
    pub correct: u32,
    pub incorrect: u32,
    pub elapsed: Duration,
    /// Time limit of the session; None for untimed activities
    pub time_limit: Option<Duration>,
    /// Longest (or closing) run of consecutive correct answers
    pub streak: u32,
    pub activity: ActivityKind,
    /// Difficulty level the session was played at
    pub difficulty: DifficultyLevel,
}

impl SessionOutcome {
    pub fn total(&self) -> u32 {
        self.correct.saturating_add(self.incorrect)
    }
}

/// Score breakdown handed to persistence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionScore {
    pub score: u32,
    pub streak_bonus: u32,
    pub xp: u64,
}

/// Where a running XP total sits on the level curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelProgress {
    /// Current level, starting at 1
    pub level: u32,
    /// XP earned since reaching `level`
    pub xp_into_level: u64,
    /// XP `level` requires in total before the next
    pub xp_for_next_level: u64,
}

// ============================================================================
// SCORE ENGINE
// ============================================================================

/// Pure scoring functions over a [`ScoringConfig`]
#[derive(Debug, Clone, Default)]
pub struct ScoreEngine {
    config: ScoringConfig,
}

impl ScoreEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Session score. An empty session scores 0; so does a zero time limit's bonus.
    pub fn session_score(
        &self,
        correct: u32,
        total: u32,
        elapsed: Duration,
        time_limit: Duration,
        difficulty: DifficultyLevel,
    ) -> u32 {
        if total == 0 {
            return 0;
        }
        let accuracy = correct.min(total) as f64 / total as f64;
        let base = accuracy * self.config.max_base_score as f64;

        let time_multiplier = if time_limit > Duration::zero() && elapsed < time_limit {
            let elapsed = elapsed.as_seconds_f64().max(0.0);
            let remaining = 1.0 - elapsed / time_limit.as_seconds_f64();
            1.0 + remaining.min(self.config.time_bonus_cap) * difficulty.time_bonus_factor()
        } else {
            1.0
        };

        (base * difficulty.score_multiplier() * time_multiplier).round() as u32
    }

    /// Tiered, super-linear reward for a run of correct answers
    pub fn streak_bonus(&self, streak: u32) -> u32 {
        streak_bonus(streak)
    }

    /// XP required to advance from `level` to the next
    pub fn xp_for_next_level(&self, level: u32) -> u64 {
        let exponent = (level.max(1) - 1) as f64;
        // Casting saturates: a curve past u64 range pins at u64::MAX
        let xp = self.config.base_xp * self.config.xp_growth.powf(exponent);
        xp.round() as u64
    }

    pub fn xp_from_score(&self, score: u32, activity: ActivityKind) -> u64 {
        (score as f64 * self.config.xp_conversion.factor(activity)).round() as u64
    }

    /// Score a whole outcome: session score, streak bonus, and XP from both
    pub fn score_outcome(&self, outcome: &SessionOutcome) -> SessionScore {
        let score = self.session_score(
            outcome.correct,
            outcome.total(),
            outcome.elapsed,
            outcome.time_limit.unwrap_or_else(Duration::zero),
            outcome.difficulty,
        );
        let streak_bonus = self.streak_bonus(outcome.streak);
        let xp = self.xp_from_score(score.saturating_add(streak_bonus), outcome.activity);

        tracing::debug!(
            activity = %outcome.activity,
            difficulty = %outcome.difficulty,
            score,
            streak_bonus,
            xp,
            "Session scored"
        );
        SessionScore {
            score,
            streak_bonus,
            xp,
        }
    }

    /// Walk the level curve for a lifetime XP total.
    ///
    /// A growth of 1.0 or less is a flat curve and is solved directly; a growing
    /// curve overtakes any u64 total within a bounded number of levels.
    pub fn level_for_xp(&self, total_xp: u64) -> LevelProgress {
        if self.config.xp_growth.is_nan() || self.config.xp_growth <= 1.0 {
            return self.flat_level_for_xp(total_xp);
        }

        let mut level = 1u32;
        let mut remaining = total_xp;
        loop {
            // A zero requirement would never advance; treat it as one point
            let needed = self.xp_for_next_level(level).max(1);
            if remaining < needed || needed == u64::MAX || level == u32::MAX {
                return LevelProgress {
                    level,
                    xp_into_level: remaining,
                    xp_for_next_level: needed,
                };
            }
            remaining -= needed;
            level += 1;
        }
    }

    fn flat_level_for_xp(&self, total_xp: u64) -> LevelProgress {
        let needed = self.xp_for_next_level(1).max(1);
        let steps = (total_xp / needed).min(u64::from(u32::MAX - 1));
        LevelProgress {
            level: 1 + steps as u32,
            xp_into_level: total_xp - steps * needed,
            xp_for_next_level: needed,
        }
    }
}

/// Streak bonus with the default tiers: 0 up to 1, then 10×, 20× and 30× per answer
pub fn streak_bonus(streak: u32) -> u32 {
    let per_answer = match streak {
        0..=1 => 0,
        2..=3 => 10,
        4..=7 => 20,
        _ => 30,
    };
    streak.saturating_mul(per_answer)
}

// ============================================================================
// TESTS
// ============================================================================
