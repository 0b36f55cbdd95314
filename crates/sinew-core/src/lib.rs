//! # Sinew Core
//!
//! Mastery tracking engine for anatomy study:
//!
//! - **Structure Catalog**: validated knowledge graph of anatomical structures with
//!   system/category/level indexes, diacritic-insensitive search and one-hop
//!   relationship traversal
//! - **Review Scheduler**: SM-2 spaced repetition over per-structure mastery records
//! - **Due Set Selector**: deterministic session pools with soonest-due padding
//! - **Difficulty Adapter**: per-activity coarse difficulty driven by success streaks
//! - **Score Engine**: session score, streak bonus and an exponential XP curve
//!
//! The core is synchronous and never reads a clock: every time-dependent call
//! takes `now` / `as_of` explicitly. It holds no storage; records and difficulty
//! states are plain serde values handed to the caller's persistence layer.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::Utc;
//! use sinew_core::{Catalog, ReviewScheduler, Relationship, RelationshipKind, Structure, select_session};
//!
//! let catalog = Catalog::load(
//!     vec![
//!         Structure::new("radius", "Radius", "skeletal", "long bone", 2),
//!         Structure::new("ulna", "Ulna", "skeletal", "long bone", 2),
//!     ],
//!     vec![Relationship::new("radius", "ulna", RelationshipKind::Connects)],
//! )?;
//!
//! let mut scheduler = ReviewScheduler::default();
//! let now = Utc::now();
//!
//! let pool = select_session(&catalog, scheduler.records(), now, 10);
//! assert_eq!(pool.len(), 2);
//!
//! let record = scheduler.record_review(&pool[0].id, 5, now);
//! assert_eq!(record.interval_days, 1);
//! # Ok::<(), sinew_core::LoadError>(())
//! ```

// ============================================================================
// MODULES
// ============================================================================

pub mod activity;
pub mod catalog;
pub mod config;
pub mod difficulty;
pub mod scheduler;
pub mod scoring;
pub mod session;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use activity::ActivityKind;

// Knowledge graph
pub use catalog::{
    Catalog, CatalogDocument, LoadError, Relationship, RelationshipKind, Structure, fold,
};

// SM-2 scheduling
pub use scheduler::{
    DEFAULT_EASE, MINIMUM_EASE, MasteryRecord, MasteryTier, ReviewScheduler, ReviewStats,
    SchedulerConfig, is_due, quality_from_answer,
};

// Session selection
pub use session::{DueSetSelector, SelectorConfig, SessionScope, select_session};

// Difficulty
pub use difficulty::{
    DifficultyAdapter, DifficultyConfig, DifficultyLevel, DifficultyState, LevelTransition,
};

// Scoring
pub use scoring::{
    LevelProgress, ScoreEngine, ScoringConfig, SessionOutcome, SessionScore, XpConversion,
    streak_bonus,
};

pub use config::{ConfigError, EngineConfig};

// ============================================================================
// VERSION INFO
// ============================================================================

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// PRELUDE
// ============================================================================

/// Convenient imports for common usage
pub mod prelude {
    pub use crate::{
        ActivityKind, Catalog, DifficultyAdapter, DifficultyLevel, DueSetSelector, EngineConfig,
        LoadError, MasteryRecord, RelationshipKind, ReviewScheduler, ScoreEngine,
        SessionOutcome, SessionScope, Structure,
    };
}
