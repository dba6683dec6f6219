//! Workout repository port.
//!
//! Defines the contract for persisting and retrieving Workout aggregates.
//! The aggregate is always read and written whole; there is no way to load
//! or save a single day or exercise.
//!
//! # Design
//!
//! - **Whole-document**: every mutation rewrites the full aggregate
//! - **Optimistic**: `update` is a compare-and-swap on the aggregate version
//! - **User-scoped**: listing and counting are by owner

use crate::domain::foundation::{DomainError, UserId, WorkoutId};
use crate::domain::workout::Workout;
use async_trait::async_trait;

/// Repository port for Workout aggregate persistence.
#[async_trait]
pub trait WorkoutRepository: Send + Sync {
    /// Save a new workout.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, workout: &Workout) -> Result<(), DomainError>;

    /// Replace a stored workout if its stored version is `expected_version`.
    ///
    /// # Errors
    ///
    /// - `WorkoutNotFound` if the workout doesn't exist
    /// - `ConcurrentModification` if the stored version differs
    /// - `DatabaseError` on persistence failure
    async fn update(&self, workout: &Workout, expected_version: u64) -> Result<(), DomainError>;

    /// Find a workout by its ID.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &WorkoutId) -> Result<Option<Workout>, DomainError>;

    /// Find all workouts owned by a user, oldest first.
    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Vec<Workout>, DomainError>;

    /// Count workouts owned by a user (for quota checks).
    async fn count_by_owner(&self, owner_id: &UserId) -> Result<usize, DomainError>;

    /// Delete a workout.
    ///
    /// # Errors
    ///
    /// - `WorkoutNotFound` if the workout doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn delete(&self, id: &WorkoutId) -> Result<(), DomainError>;
}
