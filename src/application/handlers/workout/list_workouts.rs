//! ListWorkoutsHandler - Query handler for a user's workouts.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::workout::{Workout, WorkoutError};
use crate::ports::WorkoutRepository;

/// Query for every workout owned by a user.
#[derive(Debug, Clone)]
pub struct ListWorkoutsQuery {
    pub user_id: UserId,
}

/// Handler for listing workouts, oldest first.
pub struct ListWorkoutsHandler {
    repository: Arc<dyn WorkoutRepository>,
}

impl ListWorkoutsHandler {
    pub fn new(repository: Arc<dyn WorkoutRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: ListWorkoutsQuery) -> Result<Vec<Workout>, WorkoutError> {
        let workouts = self.repository.find_by_owner(&query.user_id).await?;
        tracing::debug!(user_id = %query.user_id, count = workouts.len(), "Listed workouts");
        Ok(workouts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::workout::test_support::{seeded, stranger};
    use crate::domain::workout::test_support::owner;

    #[tokio::test]
    async fn lists_only_own_workouts() {
        let (repo, workout) = seeded(1, 1);
        let handler = ListWorkoutsHandler::new(repo);

        let mine = handler
            .handle(ListWorkoutsQuery { user_id: owner() })
            .await
            .unwrap();
        let theirs = handler
            .handle(ListWorkoutsQuery {
                user_id: stranger(),
            })
            .await
            .unwrap();

        assert_eq!(mine, vec![workout]);
        assert!(theirs.is_empty());
    }
}
