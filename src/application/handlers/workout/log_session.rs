//! LogSessionHandler - Command handler for recording a completed exercise.
//!
//! Appends the weights and the note to the exercise history and advances
//! the day's rotation. Both land in the same write.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, DayId, ExerciseId, WorkoutId};
use crate::domain::workout::{Advance, Workout, WorkoutError};
use crate::ports::WorkoutRepository;

use super::WorkoutMutator;

/// Command to log one session of an exercise.
#[derive(Debug, Clone)]
pub struct LogSessionCommand {
    pub workout_id: WorkoutId,
    pub day_id: DayId,
    pub exercise_id: ExerciseId,
    /// One weight per set.
    pub weights: Vec<f64>,
    pub record: String,
}

#[derive(Debug, Clone)]
pub struct LogSessionResult {
    pub workout: Workout,
    pub step: Advance,
}

pub struct LogSessionHandler {
    mutator: WorkoutMutator,
}

impl LogSessionHandler {
    pub fn new(repository: Arc<dyn WorkoutRepository>) -> Self {
        Self {
            mutator: WorkoutMutator::new(repository),
        }
    }

    pub async fn handle(
        &self,
        cmd: LogSessionCommand,
        metadata: CommandMetadata,
    ) -> Result<LogSessionResult, WorkoutError> {
        let LogSessionCommand {
            workout_id,
            day_id,
            exercise_id,
            weights,
            record,
        } = cmd;

        let (workout, step) = self
            .mutator
            .mutate(workout_id, &metadata, "log_session", move |w| {
                w.log_session(day_id, exercise_id, weights, record)
            })
            .await?;

        Ok(LogSessionResult { workout, step })
    }
}
