//! WorkoutMutator - the read-modify-write cycle shared by every mutation.
//!
//! ```text
//! load ──► ownership guard ──► domain operation ──► update(expected_version)
//! ```
//!
//! The domain operation runs on a private copy of the aggregate. If it fails,
//! nothing is written. If the store rejects the write because the version
//! moved, the caller gets `Conflict` and the stored aggregate is untouched.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, OwnedByUser, UserId, WorkoutId};
use crate::domain::workout::{Workout, WorkoutError};
use crate::ports::WorkoutRepository;

/// Loads, guards, changes and stores one workout aggregate.
#[derive(Clone)]
pub struct WorkoutMutator {
    repository: Arc<dyn WorkoutRepository>,
}

impl WorkoutMutator {
    pub fn new(repository: Arc<dyn WorkoutRepository>) -> Self {
        Self { repository }
    }

    /// Loads a workout and checks that `user_id` owns it.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the workout does not exist
    /// - `Forbidden` if another user owns it
    pub async fn load_owned(
        &self,
        workout_id: WorkoutId,
        user_id: &UserId,
    ) -> Result<Workout, WorkoutError> {
        let workout = self
            .repository
            .find_by_id(&workout_id)
            .await
            .map_err(|e| {
                tracing::error!(workout_id = %workout_id, error = %e, "Failed to load workout");
                WorkoutError::from(e)
            })?
            .ok_or_else(|| WorkoutError::workout_not_found(workout_id))?;

        workout.check_ownership(user_id).map_err(|e| {
            tracing::warn!(
                workout_id = %workout_id,
                user_id = %user_id,
                "Rejected access to workout owned by another user"
            );
            WorkoutError::from(e)
        })?;

        Ok(workout)
    }

    /// Applies `change` to the workout and persists the whole aggregate.
    pub async fn mutate<T, F>(
        &self,
        workout_id: WorkoutId,
        metadata: &CommandMetadata,
        operation: &'static str,
        change: F,
    ) -> Result<(Workout, T), WorkoutError>
    where
        F: FnOnce(&mut Workout) -> Result<T, WorkoutError> + Send,
        T: Send,
    {
        let mut workout = self.load_owned(workout_id, &metadata.user_id).await?;
        let expected_version = workout.version();

        let outcome = change(&mut workout).map_err(|e| {
            if matches!(e, WorkoutError::QuotaExceeded { .. }) {
                tracing::warn!(
                    workout_id = %workout_id,
                    user_id = %metadata.user_id,
                    operation,
                    error = %e,
                    "Quota rejected workout change"
                );
            }
            e
        })?;

        self.repository
            .update(&workout, expected_version)
            .await
            .map_err(|e| {
                let err = WorkoutError::from(e);
                match &err {
                    WorkoutError::Conflict(_) => tracing::warn!(
                        workout_id = %workout_id,
                        operation,
                        expected_version,
                        "Workout changed concurrently"
                    ),
                    _ => tracing::error!(
                        workout_id = %workout_id,
                        operation,
                        error = %err,
                        "Failed to store workout"
                    ),
                }
                err
            })?;

        tracing::info!(
            workout_id = %workout_id,
            user_id = %metadata.user_id,
            correlation_id = %metadata.correlation_id(),
            source = metadata.source().unwrap_or("unknown"),
            operation,
            version = workout.version(),
            "Workout updated"
        );

        Ok((workout, outcome))
    }
}
