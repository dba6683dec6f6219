//! DeleteDayHandler - Command handler for removing a day.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, DayId, WorkoutId};
use crate::domain::workout::{Workout, WorkoutError};
use crate::ports::WorkoutRepository;

use super::WorkoutMutator;

#[derive(Debug, Clone)]
pub struct DeleteDayCommand {
    pub workout_id: WorkoutId,
    pub day_id: DayId,
}

pub struct DeleteDayHandler {
    mutator: WorkoutMutator,
}

impl DeleteDayHandler {
    pub fn new(repository: Arc<dyn WorkoutRepository>) -> Self {
        Self {
            mutator: WorkoutMutator::new(repository),
        }
    }

    /// Returns the workout without the day.
    pub async fn handle(
        &self,
        cmd: DeleteDayCommand,
        metadata: CommandMetadata,
    ) -> Result<Workout, WorkoutError> {
        let day_id = cmd.day_id;
        let (workout, ()) = self
            .mutator
            .mutate(cmd.workout_id, &metadata, "delete_day", move |w| {
                w.remove_day(day_id)
            })
            .await?;
        Ok(workout)
    }
}
