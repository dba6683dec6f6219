//! AddDayHandler - Command handler for appending a day to a workout.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, DayId, WorkoutId};
use crate::domain::workout::{DayDraft, QuotaLimits, Workout, WorkoutError};
use crate::ports::WorkoutRepository;

use super::WorkoutMutator;

/// Command to append a day.
#[derive(Debug, Clone)]
pub struct AddDayCommand {
    pub workout_id: WorkoutId,
    pub day: DayDraft,
}

/// Result of a successful append.
#[derive(Debug, Clone)]
pub struct AddDayResult {
    pub workout: Workout,
    pub day_id: DayId,
}

/// Handler for appending days.
pub struct AddDayHandler {
    mutator: WorkoutMutator,
    limits: QuotaLimits,
}

impl AddDayHandler {
    pub fn new(repository: Arc<dyn WorkoutRepository>, limits: QuotaLimits) -> Self {
        Self {
            mutator: WorkoutMutator::new(repository),
            limits,
        }
    }

    pub async fn handle(
        &self,
        cmd: AddDayCommand,
        metadata: CommandMetadata,
    ) -> Result<AddDayResult, WorkoutError> {
        let limits = self.limits;
        let (workout, day_id) = self
            .mutator
            .mutate(cmd.workout_id, &metadata, "add_day", move |w| {
                w.add_day(cmd.day, &limits)
            })
            .await?;

        Ok(AddDayResult { workout, day_id })
    }
}
