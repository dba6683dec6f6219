//! Cardinality limits configuration

use serde::Deserialize;

use crate::domain::workout::QuotaLimits;

use super::error::ValidationError;

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct LimitsConfig {
    #[serde(default = "default_max_workouts")]
    pub max_workouts: usize,

    #[serde(default = "default_max_days")]
    pub max_days: usize,

    #[serde(default = "default_max_exercises")]
    pub max_exercises: usize,
}

impl LimitsConfig {
    pub fn quota_limits(&self) -> QuotaLimits {
        QuotaLimits {
            max_workouts: self.max_workouts,
            max_days: self.max_days,
            max_exercises: self.max_exercises,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_workouts == 0 {
            return Err(ValidationError::ZeroLimit("max_workouts"));
        }
        if self.max_days == 0 {
            return Err(ValidationError::ZeroLimit("max_days"));
        }
        if self.max_exercises == 0 {
            return Err(ValidationError::ZeroLimit("max_exercises"));
        }
        Ok(())
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_workouts: default_max_workouts(),
            max_days: default_max_days(),
            max_exercises: default_max_exercises(),
        }
    }
}

fn default_max_workouts() -> usize {
    QuotaLimits::DEFAULT_MAX_WORKOUTS
}

fn default_max_days() -> usize {
    QuotaLimits::DEFAULT_MAX_DAYS
}

fn default_max_exercises() -> usize {
    QuotaLimits::DEFAULT_MAX_EXERCISES
}
