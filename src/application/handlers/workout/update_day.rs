//! UpdateDayHandler - Command handler for editing a day.
//!
//! Renames the day and merges the incoming exercise list: matched exercises
//! are edited in place and keep their history, unmatched ones are appended
//! fresh, omitted ones are left alone.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, DayId, WorkoutId};
use crate::domain::workout::{ExerciseUpdate, MergeSummary, QuotaLimits, Workout, WorkoutError};
use crate::ports::WorkoutRepository;

use super::WorkoutMutator;

/// Command to edit a day.
#[derive(Debug, Clone)]
pub struct UpdateDayCommand {
    pub workout_id: WorkoutId,
    pub day_id: DayId,
    pub title: String,
    pub exercises: Vec<ExerciseUpdate>,
}

/// Result of a successful edit.
#[derive(Debug, Clone)]
pub struct UpdateDayResult {
    pub workout: Workout,
    pub summary: MergeSummary,
}

pub struct UpdateDayHandler {
    mutator: WorkoutMutator,
    limits: QuotaLimits,
}

impl UpdateDayHandler {
    pub fn new(repository: Arc<dyn WorkoutRepository>, limits: QuotaLimits) -> Self {
        Self {
            mutator: WorkoutMutator::new(repository),
            limits,
        }
    }

    pub async fn handle(
        &self,
        cmd: UpdateDayCommand,
        metadata: CommandMetadata,
    ) -> Result<UpdateDayResult, WorkoutError> {
        let limits = self.limits;
        let UpdateDayCommand {
            workout_id,
            day_id,
            title,
            exercises,
        } = cmd;

        let (workout, summary) = self
            .mutator
            .mutate(workout_id, &metadata, "update_day", move |w| {
                w.update_day(day_id, title, exercises, &limits)
            })
            .await?;

        tracing::debug!(
            workout_id = %workout_id,
            day_id = %day_id,
            updated = summary.updated,
            inserted = summary.inserted,
            "Day exercises merged"
        );

        Ok(UpdateDayResult { workout, summary })
    }
}
