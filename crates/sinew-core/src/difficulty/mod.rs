//! # Difficulty Adapter
//!
//! Coarse, per-activity difficulty level for one learner, independent of the
//! per-structure ease factor. The level moves one step whenever a run of
//! consecutive successes (or failures) reaches its threshold.
//!
//! | Level  | Time limit | Options | Score ×| Time bonus |
//! |--------|------------|---------|--------|------------|
//! | Easy   | 1.5        | -1      | 1.0    | 0.2        |
//! | Medium | 1.0        | 0       | 1.25   | 0.3        |
//! | Hard   | 0.75       | +1      | 1.5    | 0.4        |
//! | Expert | 0.5        | +2      | 2.0    | 0.5        |

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::activity::ActivityKind;

/// Default consecutive successes needed to move up a level
pub const DEFAULT_INCREASE_THRESHOLD: u32 = 3;

/// Default consecutive failures needed to move down a level
pub const DEFAULT_DECREASE_THRESHOLD: u32 = 2;

// ============================================================================
// DIFFICULTY LEVEL
// ============================================================================

/// Ordered difficulty level
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyLevel {
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}

impl DifficultyLevel {
    /// All levels, easiest first
    pub const ALL: [DifficultyLevel; 4] = [
        DifficultyLevel::Easy,
        DifficultyLevel::Medium,
        DifficultyLevel::Hard,
        DifficultyLevel::Expert,
    ];

    pub const MIN: DifficultyLevel = DifficultyLevel::Easy;
    pub const MAX: DifficultyLevel = DifficultyLevel::Expert;

    /// One step harder, or None at the top
    pub fn harder(&self) -> Option<Self> {
        match self {
            DifficultyLevel::Easy => Some(DifficultyLevel::Medium),
            DifficultyLevel::Medium => Some(DifficultyLevel::Hard),
            DifficultyLevel::Hard => Some(DifficultyLevel::Expert),
            DifficultyLevel::Expert => None,
        }
    }

    /// One step easier, or None at the bottom
    pub fn easier(&self) -> Option<Self> {
        match self {
            DifficultyLevel::Easy => None,
            DifficultyLevel::Medium => Some(DifficultyLevel::Easy),
            DifficultyLevel::Hard => Some(DifficultyLevel::Medium),
            DifficultyLevel::Expert => Some(DifficultyLevel::Hard),
        }
    }

    /// Scale applied to an activity's base time limit
    #[inline]
    pub fn time_limit_multiplier(&self) -> f64 {
        match self {
            DifficultyLevel::Easy => 1.5,
            DifficultyLevel::Medium => 1.0,
            DifficultyLevel::Hard => 0.75,
            DifficultyLevel::Expert => 0.5,
        }
    }

    /// Options added to (or removed from) a multiple-choice prompt
    #[inline]
    pub fn option_count_adjustment(&self) -> i32 {
        match self {
            DifficultyLevel::Easy => -1,
            DifficultyLevel::Medium => 0,
            DifficultyLevel::Hard => 1,
            DifficultyLevel::Expert => 2,
        }
    }

    /// Multiplier on a session's score
    #[inline]
    pub fn score_multiplier(&self) -> f64 {
        match self {
            DifficultyLevel::Easy => 1.0,
            DifficultyLevel::Medium => 1.25,
            DifficultyLevel::Hard => 1.5,
            DifficultyLevel::Expert => 2.0,
        }
    }

    /// Weight of the early-finish bonus
    #[inline]
    pub fn time_bonus_factor(&self) -> f64 {
        match self {
            DifficultyLevel::Easy => 0.2,
            DifficultyLevel::Medium => 0.3,
            DifficultyLevel::Hard => 0.4,
            DifficultyLevel::Expert => 0.5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DifficultyLevel::Easy => "easy",
            DifficultyLevel::Medium => "medium",
            DifficultyLevel::Hard => "hard",
            DifficultyLevel::Expert => "expert",
        }
    }
}

impl std::fmt::Display for DifficultyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DifficultyLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(DifficultyLevel::Easy),
            "medium" | "normal" => Ok(DifficultyLevel::Medium),
            "hard" => Ok(DifficultyLevel::Hard),
            "expert" => Ok(DifficultyLevel::Expert),
            _ => Err(format!("Unknown difficulty level: {}", s)),
        }
    }
}

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Thresholds for level transitions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DifficultyConfig {
    /// Consecutive successes that move the level up one step
    pub increase_threshold: u32,
    /// Consecutive failures that move the level down one step
    pub decrease_threshold: u32,
    /// Level for an activity the learner has never played
    pub starting_level: DifficultyLevel,
}

impl Default for DifficultyConfig {
    fn default() -> Self {
        Self {
            increase_threshold: DEFAULT_INCREASE_THRESHOLD,
            decrease_threshold: DEFAULT_DECREASE_THRESHOLD,
            starting_level: DifficultyLevel::Medium,
        }
    }
}

// ============================================================================
// DIFFICULTY STATE
// ============================================================================

/// A level change produced by an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelTransition {
    pub from: DifficultyLevel,
    pub to: DifficultyLevel,
}

/// Difficulty state for one (learner, activity) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultyState {
    pub level: DifficultyLevel,
    pub consecutive_successes: u32,
    pub consecutive_failures: u32,
}

impl DifficultyState {
    pub fn new(level: DifficultyLevel) -> Self {
        Self {
            level,
            consecutive_successes: 0,
            consecutive_failures: 0,
        }
    }

    /// Record one outcome. Returns the transition when the level moved.
    ///
    /// Counters reset to zero on a transition. At the top (or bottom) level
    /// the streak keeps counting but the level stays put.
    pub fn record_outcome(
        &mut self,
        success: bool,
        config: &DifficultyConfig,
    ) -> Option<LevelTransition> {
        let from = self.level;
        let next = if success {
            self.consecutive_successes = self.consecutive_successes.saturating_add(1);
            self.consecutive_failures = 0;
            if self.consecutive_successes >= config.increase_threshold.max(1) {
                self.level.harder()
            } else {
                None
            }
        } else {
            self.consecutive_failures = self.consecutive_failures.saturating_add(1);
            self.consecutive_successes = 0;
            if self.consecutive_failures >= config.decrease_threshold.max(1) {
                self.level.easier()
            } else {
                None
            }
        };

        let to = next?;
        self.level = to;
        self.consecutive_successes = 0;
        self.consecutive_failures = 0;
        Some(LevelTransition { from, to })
    }
}

/// Pure form of [`DifficultyState::record_outcome`]
pub fn record_outcome(
    state: DifficultyState,
    success: bool,
    config: &DifficultyConfig,
) -> DifficultyState {
    let mut next = state;
    next.record_outcome(success, config);
    next
}

// ============================================================================
// ADAPTER
// ============================================================================

/// Per-activity difficulty for one learner
#[derive(Debug, Clone, Default)]
pub struct DifficultyAdapter {
    config: DifficultyConfig,
    states: HashMap<ActivityKind, DifficultyState>,
}

impl DifficultyAdapter {
    pub fn new(config: DifficultyConfig) -> Self {
        Self {
            config,
            states: HashMap::new(),
        }
    }

    /// Rehydrate from persisted states
    pub fn with_states(
        config: DifficultyConfig,
        states: impl IntoIterator<Item = (ActivityKind, DifficultyState)>,
    ) -> Self {
        Self {
            config,
            states: states.into_iter().collect(),
        }
    }

    pub fn config(&self) -> &DifficultyConfig {
        &self.config
    }

    /// Current state; unplayed activities start at the configured level
    pub fn state(&self, activity: ActivityKind) -> DifficultyState {
        self.states
            .get(&activity)
            .copied()
            .unwrap_or_else(|| DifficultyState::new(self.config.starting_level))
    }

    pub fn level(&self, activity: ActivityKind) -> DifficultyLevel {
        self.state(activity).level
    }

    /// Feed one success or failure into an activity's state
    pub fn record_outcome(&mut self, activity: ActivityKind, success: bool) -> DifficultyState {
        let starting_level = self.config.starting_level;
        let state = self
            .states
            .entry(activity)
            .or_insert_with(|| DifficultyState::new(starting_level));

        if let Some(transition) = state.record_outcome(success, &self.config) {
            tracing::info!(
                activity = %activity,
                from = %transition.from,
                to = %transition.to,
                "Difficulty level changed"
            );
        }
        *state
    }

    /// Explicit user reset back to the starting level
    pub fn reset(&mut self, activity: ActivityKind) -> DifficultyState {
        let state = DifficultyState::new(self.config.starting_level);
        self.states.insert(activity, state);
        tracing::info!(activity = %activity, "Difficulty reset");
        state
    }

    /// All states the learner has, for persistence
    pub fn states(&self) -> &HashMap<ActivityKind, DifficultyState> {
        &self.states
    }
}

// ============================================================================
// TESTS
// ============================================================================
