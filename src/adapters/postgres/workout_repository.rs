//! PostgreSQL implementation of WorkoutRepository.
//!
//! Each aggregate is one JSONB document in the `workouts` table. The owner,
//! version and timestamps are also kept as columns for indexing and for the
//! compare-and-swap in `update`.

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use crate::domain::foundation::{DomainError, ErrorCode, OwnedByUser, UserId, WorkoutId};
use crate::domain::workout::Workout;
use crate::ports::WorkoutRepository;

/// PostgreSQL implementation of WorkoutRepository.
#[derive(Clone)]
pub struct PostgresWorkoutRepository {
    pool: PgPool,
}

impl PostgresWorkoutRepository {
    /// Creates a new PostgresWorkoutRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn not_found(id: &WorkoutId) -> DomainError {
    DomainError::new(ErrorCode::WorkoutNotFound, format!("Workout not found: {}", id))
        .with_detail("workout_id", id.to_string())
}

fn version_column(workout: &Workout) -> Result<i64, DomainError> {
    i64::try_from(workout.version())
        .map_err(|e| DomainError::database("Workout version out of range", e))
}

#[async_trait]
impl WorkoutRepository for PostgresWorkoutRepository {
    async fn save(&self, workout: &Workout) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO workouts (
                id, owner_id, version, document, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(workout.id().as_uuid())
        .bind(workout.owner_id().as_str())
        .bind(version_column(workout)?)
        .bind(Json(workout))
        .bind(workout.created_at().as_datetime())
        .bind(workout.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to insert workout", e))?;

        Ok(())
    }

    async fn update(&self, workout: &Workout, expected_version: u64) -> Result<(), DomainError> {
        let expected = i64::try_from(expected_version)
            .map_err(|e| DomainError::database("Workout version out of range", e))?;

        let result = sqlx::query(
            r#"
            UPDATE workouts SET
                version = $3,
                document = $4,
                updated_at = $5
            WHERE id = $1 AND version = $2
            "#,
        )
        .bind(workout.id().as_uuid())
        .bind(expected)
        .bind(version_column(workout)?)
        .bind(Json(workout))
        .bind(workout.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to update workout", e))?;

        if result.rows_affected() == 1 {
            return Ok(());
        }

        // Nothing matched: either the row is gone or someone else won the race.
        let current: Option<(i64,)> = sqlx::query_as("SELECT version FROM workouts WHERE id = $1")
            .bind(workout.id().as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to read workout version", e))?;

        match current {
            None => Err(not_found(&workout.id())),
            Some((found,)) => Err(DomainError::new(
                ErrorCode::ConcurrentModification,
                format!("expected version {}, found {}", expected_version, found),
            )
            .with_detail("workout_id", workout.id().to_string())),
        }
    }

    async fn find_by_id(&self, id: &WorkoutId) -> Result<Option<Workout>, DomainError> {
        let row = sqlx::query("SELECT document FROM workouts WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to fetch workout", e))?;

        row.map(row_to_workout).transpose()
    }

    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Vec<Workout>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT document FROM workouts
            WHERE owner_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(owner_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database("Failed to fetch workouts by owner", e))?;

        rows.into_iter().map(row_to_workout).collect()
    }

    async fn count_by_owner(&self, owner_id: &UserId) -> Result<usize, DomainError> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM workouts WHERE owner_id = $1")
            .bind(owner_id.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to count workouts", e))?;

        Ok(result.0 as usize)
    }

    async fn delete(&self, id: &WorkoutId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM workouts WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database("Failed to delete workout", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found(id));
        }

        Ok(())
    }
}

fn row_to_workout(row: sqlx::postgres::PgRow) -> Result<Workout, DomainError> {
    let Json(workout): Json<Workout> = row
        .try_get("document")
        .map_err(|e| DomainError::database("Failed to decode workout document", e))?;
    Ok(workout)
}
