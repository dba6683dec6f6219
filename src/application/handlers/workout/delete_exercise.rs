//! DeleteExerciseHandler - Command handler for removing an exercise.
//!
//! The day's rotation pointer is shifted back when the removed exercise sat
//! at or before it, so it keeps addressing the same exercise.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, DayId, ExerciseId, WorkoutId};
use crate::domain::workout::{Workout, WorkoutError};
use crate::ports::WorkoutRepository;

use super::WorkoutMutator;

#[derive(Debug, Clone)]
pub struct DeleteExerciseCommand {
    pub workout_id: WorkoutId,
    pub day_id: DayId,
    pub exercise_id: ExerciseId,
}

pub struct DeleteExerciseHandler {
    mutator: WorkoutMutator,
}

impl DeleteExerciseHandler {
    pub fn new(repository: Arc<dyn WorkoutRepository>) -> Self {
        Self {
            mutator: WorkoutMutator::new(repository),
        }
    }

    pub async fn handle(
        &self,
        cmd: DeleteExerciseCommand,
        metadata: CommandMetadata,
    ) -> Result<Workout, WorkoutError> {
        let DeleteExerciseCommand {
            workout_id,
            day_id,
            exercise_id,
        } = cmd;

        let (workout, ()) = self
            .mutator
            .mutate(workout_id, &metadata, "delete_exercise", move |w| {
                w.remove_exercise(day_id, exercise_id)
            })
            .await?;
        Ok(workout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::workout::test_support::{metadata, seeded};
    use crate::domain::workout::test_support::owner;
    use crate::domain::workout::ExerciseIndex;

    #[tokio::test]
    async fn removing_exercise_before_pointer_decrements_it() {
        let (repo, mut workout) = seeded(1, 3);
        let day_id = workout.days()[0].id();
        let version = workout.version();
        for _ in 0..3 {
            workout.advance_rotation(day_id).unwrap();
        }
        repo.update(&workout, version).await.unwrap();
        let first = workout.days()[0].exercises()[0].id();
        let handler = DeleteExerciseHandler::new(repo);

        let updated = handler
            .handle(
                DeleteExerciseCommand {
                    workout_id: workout.id(),
                    day_id,
                    exercise_id: first,
                },
                metadata(&owner()),
            )
            .await
            .unwrap();

        let day = updated.day(day_id).unwrap();
        assert_eq!(day.exercises().len(), 2);
        assert_eq!(day.exercise_index(), ExerciseIndex::Active(1));
    }

    #[tokio::test]
    async fn missing_exercise_is_not_found() {
        let (repo, workout) = seeded(1, 1);
        let handler = DeleteExerciseHandler::new(repo);
        let missing = ExerciseId::new();

        let result = handler
            .handle(
                DeleteExerciseCommand {
                    workout_id: workout.id(),
                    day_id: workout.days()[0].id(),
                    exercise_id: missing,
                },
                metadata(&owner()),
            )
            .await;

        assert_eq!(result.unwrap_err(), WorkoutError::exercise_not_found(missing));
    }
}
