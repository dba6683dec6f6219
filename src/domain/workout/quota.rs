//! Cardinality ceilings for workouts, days, and exercises.
//!
//! Checks are pure. Callers reject the whole operation with
//! `QuotaExceeded` before mutating anything, using the state loaded in the
//! same read-modify-write cycle.

use std::fmt;

use super::{Workout, WorkoutError};

/// Which ceiling was hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quota {
    /// Workouts per owner.
    Workouts,
    /// Days per workout.
    Days,
    /// Exercises per day.
    Exercises,
}

impl fmt::Display for Quota {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Quota::Workouts => "workouts",
            Quota::Days => "days",
            Quota::Exercises => "exercises",
        };
        write!(f, "{}", s)
    }
}

/// Configured ceilings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaLimits {
    pub max_workouts: usize,
    pub max_days: usize,
    pub max_exercises: usize,
}

impl QuotaLimits {
    pub const DEFAULT_MAX_WORKOUTS: usize = 10;
    pub const DEFAULT_MAX_DAYS: usize = 10;
    pub const DEFAULT_MAX_EXERCISES: usize = 20;

    /// True while the owner holds fewer workouts than allowed.
    pub fn can_create_workout(&self, existing_workouts: usize) -> bool {
        existing_workouts < self.max_workouts
    }

    /// True while the workout has room for another day.
    pub fn can_add_day(&self, workout: &Workout) -> bool {
        workout.days().len() < self.max_days
    }

    /// True while a day holding `current` exercises has room for another.
    ///
    /// Takes a count so a batch merge can check its running total.
    pub fn can_add_exercise(&self, current: usize) -> bool {
        current < self.max_exercises
    }

    /// Fails with `QuotaExceeded` unless `allowed`.
    pub(crate) fn ensure(&self, allowed: bool, quota: Quota) -> Result<(), WorkoutError> {
        if allowed {
            Ok(())
        } else {
            Err(WorkoutError::quota_exceeded(quota, self.limit_of(quota)))
        }
    }

    /// Fails with `QuotaExceeded` if a new day would carry too many exercises.
    pub(crate) fn ensure_exercise_count(&self, count: usize) -> Result<(), WorkoutError> {
        self.ensure(count <= self.max_exercises, Quota::Exercises)
    }

    /// Fails with `QuotaExceeded` if a new workout would carry too many days.
    pub(crate) fn ensure_day_count(&self, count: usize) -> Result<(), WorkoutError> {
        self.ensure(count <= self.max_days, Quota::Days)
    }

    pub fn limit_of(&self, quota: Quota) -> usize {
        match quota {
            Quota::Workouts => self.max_workouts,
            Quota::Days => self.max_days,
            Quota::Exercises => self.max_exercises,
        }
    }
}

impl Default for QuotaLimits {
    fn default() -> Self {
        Self {
            max_workouts: Self::DEFAULT_MAX_WORKOUTS,
            max_days: Self::DEFAULT_MAX_DAYS,
            max_exercises: Self::DEFAULT_MAX_EXERCISES,
        }
    }
}
