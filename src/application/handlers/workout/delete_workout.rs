//! DeleteWorkoutHandler - Command handler for removing a whole workout.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, WorkoutId};
use crate::domain::workout::WorkoutError;
use crate::ports::WorkoutRepository;

use super::WorkoutMutator;

#[derive(Debug, Clone)]
pub struct DeleteWorkoutCommand {
    pub workout_id: WorkoutId,
}

pub struct DeleteWorkoutHandler {
    repository: Arc<dyn WorkoutRepository>,
    mutator: WorkoutMutator,
}

impl DeleteWorkoutHandler {
    pub fn new(repository: Arc<dyn WorkoutRepository>) -> Self {
        Self {
            mutator: WorkoutMutator::new(repository.clone()),
            repository,
        }
    }

    pub async fn handle(
        &self,
        cmd: DeleteWorkoutCommand,
        metadata: CommandMetadata,
    ) -> Result<(), WorkoutError> {
        // 1. Load and guard
        self.mutator
            .load_owned(cmd.workout_id, &metadata.user_id)
            .await?;

        // 2. Remove
        self.repository.delete(&cmd.workout_id).await.map_err(|e| {
            let err = WorkoutError::from(e);
            if matches!(err, WorkoutError::Infrastructure(_)) {
                tracing::error!(workout_id = %cmd.workout_id, error = %err, "Failed to delete workout");
            }
            err
        })?;

        tracing::info!(
            workout_id = %cmd.workout_id,
            user_id = %metadata.user_id,
            correlation_id = %metadata.correlation_id(),
            source = metadata.source().unwrap_or("unknown"),
            "Workout deleted"
        );

        Ok(())
    }
}
