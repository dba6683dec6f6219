//! In-Memory Workout Repository Adapter
//!
//! Stores workout aggregates in memory.
//! Used for tests and when no database is configured.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, OwnedByUser, UserId, WorkoutId};
use crate::domain::workout::Workout;
use crate::ports::WorkoutRepository;

/// In-memory storage for workouts
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkoutRepository {
    workouts: Arc<RwLock<HashMap<WorkoutId, Workout>>>,
}

impl InMemoryWorkoutRepository {
    /// Create a new, empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored workouts
    pub async fn len(&self) -> usize {
        self.workouts.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.workouts.read().await.is_empty()
    }
}

fn not_found(id: &WorkoutId) -> DomainError {
    DomainError::new(ErrorCode::WorkoutNotFound, "Workout not found")
        .with_detail("workout_id", id.to_string())
}

#[async_trait]
impl WorkoutRepository for InMemoryWorkoutRepository {
    async fn save(&self, workout: &Workout) -> Result<(), DomainError> {
        let mut workouts = self.workouts.write().await;
        workouts.insert(workout.id(), workout.clone());
        Ok(())
    }

    async fn update(&self, workout: &Workout, expected_version: u64) -> Result<(), DomainError> {
        let mut workouts = self.workouts.write().await;
        let stored = workouts
            .get_mut(&workout.id())
            .ok_or_else(|| not_found(&workout.id()))?;

        if stored.version() != expected_version {
            return Err(DomainError::new(
                ErrorCode::ConcurrentModification,
                format!(
                    "expected version {}, found {}",
                    expected_version,
                    stored.version()
                ),
            )
            .with_detail("workout_id", workout.id().to_string()));
        }

        *stored = workout.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: &WorkoutId) -> Result<Option<Workout>, DomainError> {
        let workouts = self.workouts.read().await;
        Ok(workouts.get(id).cloned())
    }

    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Vec<Workout>, DomainError> {
        let workouts = self.workouts.read().await;
        let mut owned: Vec<Workout> = workouts
            .values()
            .filter(|w| w.is_owner(owner_id))
            .cloned()
            .collect();
        owned.sort_by_key(|w| (w.created_at(), w.id()));
        Ok(owned)
    }

    async fn count_by_owner(&self, owner_id: &UserId) -> Result<usize, DomainError> {
        let workouts = self.workouts.read().await;
        Ok(workouts.values().filter(|w| w.is_owner(owner_id)).count())
    }

    async fn delete(&self, id: &WorkoutId) -> Result<(), DomainError> {
        let mut workouts = self.workouts.write().await;
        workouts.remove(id).map(|_| ()).ok_or_else(|| not_found(id))
    }
}
