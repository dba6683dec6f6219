//! AdvanceRotationHandler - Command handler for the explicit "next" step.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, DayId, WorkoutId};
use crate::domain::workout::{Advance, Workout, WorkoutError};
use crate::ports::WorkoutRepository;

use super::WorkoutMutator;

/// Command to move a day's rotation one step.
#[derive(Debug, Clone)]
pub struct AdvanceRotationCommand {
    pub workout_id: WorkoutId,
    pub day_id: DayId,
}

#[derive(Debug, Clone)]
pub struct AdvanceRotationResult {
    pub workout: Workout,
    pub step: Advance,
}

pub struct AdvanceRotationHandler {
    mutator: WorkoutMutator,
}

impl AdvanceRotationHandler {
    pub fn new(repository: Arc<dyn WorkoutRepository>) -> Self {
        Self {
            mutator: WorkoutMutator::new(repository),
        }
    }

    pub async fn handle(
        &self,
        cmd: AdvanceRotationCommand,
        metadata: CommandMetadata,
    ) -> Result<AdvanceRotationResult, WorkoutError> {
        let day_id = cmd.day_id;
        let (workout, step) = self
            .mutator
            .mutate(cmd.workout_id, &metadata, "advance_rotation", move |w| {
                w.advance_rotation(day_id)
            })
            .await?;

        if let Advance::Wrapped { workout_count } = step {
            tracing::info!(day_id = %day_id, workout_count, "Rotation cycle completed");
        }

        Ok(AdvanceRotationResult { workout, step })
    }
}
