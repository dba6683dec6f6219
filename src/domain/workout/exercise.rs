//! Exercise entity and its session history.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ExerciseId, ValidationError};

use super::WorkoutError;

/// The user-editable fields of an exercise.
///
/// Incoming payloads only ever carry these fields; history is owned by the
/// engine and cannot be seeded or overwritten by a caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseSpec {
    pub title: String,
    /// Free-form rep scheme, e.g. "8-12".
    pub reps: String,
    pub sets: u32,
    /// Rest between sets, in seconds.
    pub rest: u32,
    pub note: String,
}

/// An exercise within a training day.
///
/// # Invariants
///
/// - `record.len() == weights.len()`; entry `i` of both is one logged session
/// - `weights[i].len()` equalled `sets` when session `i` was logged
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    id: ExerciseId,
    #[serde(flatten)]
    spec: ExerciseSpec,
    record: Vec<String>,
    weights: Vec<Vec<f64>>,
}

impl Exercise {
    /// Creates an exercise with a fresh id and empty history.
    pub fn new(spec: ExerciseSpec) -> Self {
        Self {
            id: ExerciseId::new(),
            spec,
            record: Vec::new(),
            weights: Vec::new(),
        }
    }

    pub fn id(&self) -> ExerciseId {
        self.id
    }

    pub fn spec(&self) -> &ExerciseSpec {
        &self.spec
    }

    pub fn title(&self) -> &str {
        &self.spec.title
    }

    pub fn sets(&self) -> u32 {
        self.spec.sets
    }

    /// Free-text notes of every logged session, oldest first.
    pub fn record(&self) -> &[String] {
        &self.record
    }

    /// Per-set weights of every logged session, oldest first.
    pub fn weights(&self) -> &[Vec<f64>] {
        &self.weights
    }

    /// Number of logged sessions.
    pub fn session_count(&self) -> usize {
        self.record.len()
    }

    /// Replaces the editable fields, leaving history untouched.
    pub fn apply_spec(&mut self, spec: ExerciseSpec) {
        self.spec = spec;
    }

    /// Checks that a session with these weights could be logged.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if there is not exactly one weight per set
    pub fn check_session(&self, weights: &[f64]) -> Result<(), WorkoutError> {
        if weights.len() != self.spec.sets as usize {
            return Err(WorkoutError::validation(vec![ValidationError::invalid_format(
                "weights",
                format!(
                    "expected {} weights (one per set), got {}",
                    self.spec.sets,
                    weights.len()
                ),
            )]));
        }
        Ok(())
    }

    /// Appends one session to the history.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if there is not exactly one weight per set
    pub fn append_session(&mut self, weights: Vec<f64>, record: String) -> Result<(), WorkoutError> {
        self.check_session(&weights)?;
        self.weights.push(weights);
        self.record.push(record);
        Ok(())
    }
}
