//! Training day entity.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DayId, ExerciseId};

use super::merge::{self, ExerciseUpdate, MergeSummary};
use super::rotation::{Advance, ExerciseIndex, Rotation};
use super::{Exercise, ExerciseSpec, QuotaLimits, WorkoutError};

/// Input for a new day. Ids and history are always minted here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayDraft {
    pub title: String,
    pub exercises: Vec<ExerciseSpec>,
}

/// A training day: an ordered exercise list walked in rotation.
///
/// # Invariants
///
/// - the rotation pointer is `Idle` or addresses an existing exercise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Day {
    id: DayId,
    title: String,
    #[serde(flatten)]
    rotation: Rotation,
    exercises: Vec<Exercise>,
}

impl Day {
    /// Builds a fresh day: idle rotation, no completed cycles, empty histories.
    pub fn new(draft: DayDraft) -> Self {
        Self {
            id: DayId::new(),
            title: draft.title,
            rotation: Rotation::new(),
            exercises: draft.exercises.into_iter().map(Exercise::new).collect(),
        }
    }

    pub fn id(&self) -> DayId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn exercises(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn workout_count(&self) -> u32 {
        self.rotation.workout_count()
    }

    pub fn exercise_index(&self) -> ExerciseIndex {
        self.rotation.exercise_index()
    }

    /// The exercise the rotation currently points at.
    pub fn current_exercise(&self) -> Option<&Exercise> {
        self.exercise_index()
            .position()
            .and_then(|p| self.exercises.get(p))
    }

    pub fn exercise(&self, id: ExerciseId) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id() == id)
    }

    fn position_of(&self, id: ExerciseId) -> Result<usize, WorkoutError> {
        self.exercises
            .iter()
            .position(|e| e.id() == id)
            .ok_or_else(|| WorkoutError::exercise_not_found(id))
    }

    /// Steps the rotation once.
    pub fn advance(&mut self) -> Advance {
        self.rotation.advance(self.exercises.len())
    }

    /// Replaces the title and merges the incoming exercise list.
    ///
    /// Nothing changes if the merge is rejected.
    pub fn revise(
        &mut self,
        title: String,
        incoming: Vec<ExerciseUpdate>,
        limits: &QuotaLimits,
    ) -> Result<MergeSummary, WorkoutError> {
        let plan = merge::plan(&self.exercises, incoming, limits)?;
        self.title = title;
        Ok(plan.apply(&mut self.exercises))
    }

    /// Appends one session to an exercise and advances the rotation.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the exercise is not part of this day
    /// - `ValidationFailed` if the weights do not match the set count
    pub fn log_session(
        &mut self,
        exercise_id: ExerciseId,
        weights: Vec<f64>,
        record: String,
    ) -> Result<Advance, WorkoutError> {
        let position = self.position_of(exercise_id)?;
        self.exercises[position].append_session(weights, record)?;
        Ok(self.advance())
    }

    /// Removes an exercise, keeping the rotation pointer valid.
    pub fn remove_exercise(&mut self, exercise_id: ExerciseId) -> Result<Exercise, WorkoutError> {
        let position = self.position_of(exercise_id)?;
        let removed = self.exercises.remove(position);
        self.rotation.exercise_removed(position);
        Ok(removed)
    }
}
