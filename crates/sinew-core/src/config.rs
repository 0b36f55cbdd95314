//! Engine configuration
//!
//! One document gathers every tunable constant. Missing sections fall back to
//! their defaults, so `{}` is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::difficulty::DifficultyConfig;
use crate::scheduler::{MAX_INTERVAL_DAYS, SchedulerConfig};
use crate::scoring::ScoringConfig;
use crate::session::SelectorConfig;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    pub scheduler: SchedulerConfig,
    pub selector: SelectorConfig,
    pub difficulty: DifficultyConfig,
    pub scoring: ScoringConfig,
}

impl EngineConfig {
    /// Parse and validate a JSON configuration document
    pub fn from_json(document: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(document)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        let s = &self.scheduler;
        if !(s.minimum_ease.is_finite() && s.minimum_ease > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "scheduler.minimumEase must be positive, got {}",
                s.minimum_ease
            )));
        }
        if !s.initial_ease.is_finite() || s.initial_ease < s.minimum_ease {
            return Err(ConfigError::Invalid(format!(
                "scheduler.initialEase ({}) is below minimumEase ({})",
                s.initial_ease, s.minimum_ease
            )));
        }
        if s.failed_interval_days == 0
            || s.first_interval_days == 0
            || s.maximum_interval_days == 0
        {
            return Err(ConfigError::Invalid(
                "scheduler intervals must be at least one day".to_string(),
            ));
        }
        if s.maximum_interval_days > MAX_INTERVAL_DAYS {
            return Err(ConfigError::Invalid(format!(
                "scheduler.maximumIntervalDays ({}) exceeds {}",
                s.maximum_interval_days, MAX_INTERVAL_DAYS
            )));
        }

        if let Some(max) = self.selector.maximum_pool_size {
            if max < self.selector.minimum_pool_size {
                return Err(ConfigError::Invalid(format!(
                    "selector.maximumPoolSize ({}) is below minimumPoolSize ({})",
                    max, self.selector.minimum_pool_size
                )));
            }
        }

        if self.difficulty.increase_threshold == 0 || self.difficulty.decrease_threshold == 0 {
            return Err(ConfigError::Invalid(
                "difficulty thresholds must be at least 1".to_string(),
            ));
        }

        let scoring = &self.scoring;
        if !(scoring.xp_growth.is_finite() && scoring.xp_growth > 1.0) {
            return Err(ConfigError::Invalid(format!(
                "scoring.xpGrowth must be greater than 1.0, got {}",
                scoring.xp_growth
            )));
        }
        if !(scoring.base_xp.is_finite() && scoring.base_xp >= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "scoring.baseXp must be at least 1.0, got {}",
                scoring.base_xp
            )));
        }
        Ok(())
    }
}
