//! Workout command and query handlers.
//!
//! Every mutating handler goes through `WorkoutMutator`, so the ownership
//! guard and the versioned write are applied the same way everywhere.

mod add_day;
mod advance_rotation;
mod create_workout;
mod delete_day;
mod delete_exercise;
mod delete_workout;
mod get_workout;
mod list_workouts;
mod log_session;
mod mutator;
mod update_day;

pub use add_day::{AddDayCommand, AddDayHandler, AddDayResult};
pub use advance_rotation::{AdvanceRotationCommand, AdvanceRotationHandler, AdvanceRotationResult};
pub use create_workout::{CreateWorkoutCommand, CreateWorkoutHandler, CreateWorkoutResult};
pub use delete_day::{DeleteDayCommand, DeleteDayHandler};
pub use delete_exercise::{DeleteExerciseCommand, DeleteExerciseHandler};
pub use delete_workout::{DeleteWorkoutCommand, DeleteWorkoutHandler};
pub use get_workout::{GetWorkoutHandler, GetWorkoutQuery};
pub use list_workouts::{ListWorkoutsHandler, ListWorkoutsQuery};
pub use log_session::{LogSessionCommand, LogSessionHandler, LogSessionResult};
pub use mutator::WorkoutMutator;
pub use update_day::{UpdateDayCommand, UpdateDayHandler, UpdateDayResult};

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use crate::domain::foundation::{
        CommandMetadata, DomainError, ErrorCode, OwnedByUser, UserId, WorkoutId,
    };
    use crate::domain::workout::test_support::{owner, workout_with_days};
    use crate::domain::workout::Workout;
    use crate::ports::WorkoutRepository;

    /// Hand-rolled repository with failure switches.
    #[derive(Default)]
    pub struct MockWorkoutRepository {
        workouts: Mutex<Vec<Workout>>,
        update_calls: AtomicUsize,
        conflict: AtomicBool,
        fail_writes: AtomicBool,
    }

    impl MockWorkoutRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with(workout: Workout) -> Self {
            let repo = Self::new();
            repo.workouts.lock().unwrap().push(workout);
            repo
        }

        pub fn stored(&self, id: WorkoutId) -> Option<Workout> {
            self.workouts
                .lock()
                .unwrap()
                .iter()
                .find(|w| w.id() == id)
                .cloned()
        }

        pub fn len(&self) -> usize {
            self.workouts.lock().unwrap().len()
        }

        pub fn update_calls(&self) -> usize {
            self.update_calls.load(Ordering::SeqCst)
        }

        /// Every following `update` fails as if another writer won the race.
        pub fn simulate_conflict(&self) {
            self.conflict.store(true, Ordering::SeqCst);
        }

        /// Every following write fails with a database error.
        pub fn fail_writes(&self) {
            self.fail_writes.store(true, Ordering::SeqCst);
        }

        fn check_writable(&self) -> Result<(), DomainError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(DomainError::database("Simulated write", "failure"));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl WorkoutRepository for MockWorkoutRepository {
        async fn save(&self, workout: &Workout) -> Result<(), DomainError> {
            self.check_writable()?;
            self.workouts.lock().unwrap().push(workout.clone());
            Ok(())
        }

        async fn update(&self, workout: &Workout, expected_version: u64) -> Result<(), DomainError> {
            self.update_calls.fetch_add(1, Ordering::SeqCst);
            self.check_writable()?;
            if self.conflict.load(Ordering::SeqCst) {
                return Err(DomainError::new(
                    ErrorCode::ConcurrentModification,
                    "Simulated concurrent write",
                ));
            }

            let mut workouts = self.workouts.lock().unwrap();
            let stored = workouts
                .iter_mut()
                .find(|w| w.id() == workout.id())
                .ok_or_else(|| DomainError::new(ErrorCode::WorkoutNotFound, "missing"))?;
            if stored.version() != expected_version {
                return Err(DomainError::new(
                    ErrorCode::ConcurrentModification,
                    "version mismatch",
                ));
            }
            *stored = workout.clone();
            Ok(())
        }

        async fn find_by_id(&self, id: &WorkoutId) -> Result<Option<Workout>, DomainError> {
            Ok(self.stored(*id))
        }

        async fn find_by_owner(&self, owner_id: &UserId) -> Result<Vec<Workout>, DomainError> {
            Ok(self
                .workouts
                .lock()
                .unwrap()
                .iter()
                .filter(|w| w.is_owner(owner_id))
                .cloned()
                .collect())
        }

        async fn count_by_owner(&self, owner_id: &UserId) -> Result<usize, DomainError> {
            Ok(self
                .workouts
                .lock()
                .unwrap()
                .iter()
                .filter(|w| w.is_owner(owner_id))
                .count())
        }

        async fn delete(&self, id: &WorkoutId) -> Result<(), DomainError> {
            self.check_writable()?;
            let mut workouts = self.workouts.lock().unwrap();
            let before = workouts.len();
            workouts.retain(|w| w.id() != *id);
            if workouts.len() == before {
                return Err(DomainError::new(ErrorCode::WorkoutNotFound, "missing")
                    .with_detail("workout_id", id.to_string()));
            }
            Ok(())
        }
    }

    /// A repository holding one workout of `owner()`.
    pub fn seeded(days: usize, exercises_per_day: usize) -> (Arc<MockWorkoutRepository>, Workout) {
        let workout = workout_with_days(&owner(), days, exercises_per_day);
        (
            Arc::new(MockWorkoutRepository::with(workout.clone())),
            workout,
        )
    }

    pub fn metadata(user_id: &UserId) -> CommandMetadata {
        CommandMetadata::new(user_id.clone()).with_correlation_id("test-correlation")
    }

    pub fn stranger() -> UserId {
        UserId::new("intruder").unwrap()
    }
}
