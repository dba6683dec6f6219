//! GetWorkoutHandler - Query handler for a single workout.

use std::sync::Arc;

use crate::domain::foundation::{UserId, WorkoutId};
use crate::domain::workout::{Workout, WorkoutError};
use crate::ports::WorkoutRepository;

use super::WorkoutMutator;

/// Query for one workout; only its owner may read it.
#[derive(Debug, Clone)]
pub struct GetWorkoutQuery {
    pub workout_id: WorkoutId,
    pub user_id: UserId,
}

pub struct GetWorkoutHandler {
    mutator: WorkoutMutator,
}

impl GetWorkoutHandler {
    pub fn new(repository: Arc<dyn WorkoutRepository>) -> Self {
        Self {
            mutator: WorkoutMutator::new(repository),
        }
    }

    pub async fn handle(&self, query: GetWorkoutQuery) -> Result<Workout, WorkoutError> {
        self.mutator
            .load_owned(query.workout_id, &query.user_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::workout::test_support::{seeded, stranger};
    use crate::domain::workout::test_support::owner;

    #[tokio::test]
    async fn owner_can_read() {
        let (repo, workout) = seeded(2, 1);
        let handler = GetWorkoutHandler::new(repo);

        let read = handler
            .handle(GetWorkoutQuery {
                workout_id: workout.id(),
                user_id: owner(),
            })
            .await
            .unwrap();

        assert_eq!(read, workout);
    }

    #[tokio::test]
    async fn stranger_is_forbidden() {
        let (repo, workout) = seeded(1, 1);
        let handler = GetWorkoutHandler::new(repo);

        let result = handler
            .handle(GetWorkoutQuery {
                workout_id: workout.id(),
                user_id: stranger(),
            })
            .await;

        assert_eq!(result.unwrap_err(), WorkoutError::Forbidden);
    }
}
