//! Due Set Selector
//!
//! Builds the item pool for a study session from the catalog and a learner's
//! mastery records. Selection is fully deterministic: due structures sort by
//! next review (never-reviewed first), ties broken by identifier. When too few
//! are due, the soonest-due remaining structures pad the pool.
//!
//! Shuffling for presentation happens after this call.

use std::cmp::Ordering;
use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Structure};
use crate::scheduler::MasteryRecord;

/// Default minimum number of structures in a session
pub const DEFAULT_MINIMUM_POOL_SIZE: usize = 10;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// Pool sizing for session selection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectorConfig {
    /// Pad with not-yet-due structures up to this many
    pub minimum_pool_size: usize,
    /// Optional hard cap applied after ordering
    pub maximum_pool_size: Option<usize>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            minimum_pool_size: DEFAULT_MINIMUM_POOL_SIZE,
            maximum_pool_size: None,
        }
    }
}

// ============================================================================
// SCOPE
// ============================================================================

/// Which part of the catalog a session draws from
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum SessionScope {
    #[default]
    All,
    System(String),
    Category(String),
    Level(u8),
}

impl SessionScope {
    fn candidates<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Structure> {
        match self {
            SessionScope::All => catalog.iter().collect(),
            SessionScope::System(system) => catalog.by_system(system),
            SessionScope::Category(category) => catalog.by_category(category),
            SessionScope::Level(level) => catalog.by_level(*level),
        }
    }
}

// ============================================================================
// SELECTOR
// ============================================================================

/// Deterministic session pool builder. Reads records, never mutates them.
#[derive(Debug, Clone, Default)]
pub struct DueSetSelector {
    config: SelectorConfig,
}

impl DueSetSelector {
    pub fn new(config: SelectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Select from the whole catalog
    pub fn select<'a>(
        &self,
        catalog: &'a Catalog,
        records: &HashMap<String, MasteryRecord>,
        as_of: DateTime<Utc>,
    ) -> Vec<&'a Structure> {
        self.select_scoped(catalog, records, as_of, &SessionScope::All)
    }

    /// Select from part of the catalog; padding stays within the scope
    pub fn select_scoped<'a>(
        &self,
        catalog: &'a Catalog,
        records: &HashMap<String, MasteryRecord>,
        as_of: DateTime<Utc>,
        scope: &SessionScope,
    ) -> Vec<&'a Structure> {
        let mut pool = build_pool(
            scope.candidates(catalog),
            records,
            as_of,
            self.config.minimum_pool_size,
        );
        if let Some(cap) = self.config.maximum_pool_size {
            pool.truncate(cap.max(1));
        }
        pool
    }
}

/// Select a session pool from the whole catalog.
///
/// Returns every due structure when at least `minimum_pool_size` are due,
/// otherwise pads with the soonest-due others. Never empty unless the catalog is.
pub fn select_session<'a>(
    catalog: &'a Catalog,
    records: &HashMap<String, MasteryRecord>,
    as_of: DateTime<Utc>,
    minimum_pool_size: usize,
) -> Vec<&'a Structure> {
    build_pool(catalog.iter().collect(), records, as_of, minimum_pool_size)
}

fn build_pool<'a>(
    candidates: Vec<&'a Structure>,
    records: &HashMap<String, MasteryRecord>,
    as_of: DateTime<Utc>,
    minimum_pool_size: usize,
) -> Vec<&'a Structure> {
    let next_review = |s: &Structure| records.get(&s.id).and_then(|r| r.next_review);

    let (mut due, mut not_due): (Vec<_>, Vec<_>) = candidates
        .into_iter()
        .partition(|s| next_review(*s).is_none_or(|next| next <= as_of));

    let by_schedule = |a: &&Structure, b: &&Structure| -> Ordering {
        // None sorts before Some: never-reviewed structures come first
        next_review(*a)
            .cmp(&next_review(*b))
            .then_with(|| a.id.cmp(&b.id))
    };
    due.sort_by(by_schedule);

    let due_count = due.len();
    let minimum = minimum_pool_size.max(1);
    if due.len() < minimum {
        not_due.sort_by(by_schedule);
        let needed = minimum - due.len();
        due.extend(not_due.into_iter().take(needed));
    }

    tracing::debug!(
        due = due_count,
        padded = due.len() - due_count,
        minimum,
        "Session pool selected"
    );
    due
}

// ============================================================================
// TESTS
// ============================================================================
