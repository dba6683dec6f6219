//! CreateWorkoutHandler - Command handler for creating workouts.

use std::sync::Arc;

use crate::domain::foundation::{CommandMetadata, Timestamp};
use crate::domain::workout::{DayDraft, Quota, QuotaLimits, Workout, WorkoutDraft, WorkoutError};
use crate::ports::WorkoutRepository;

/// Command to create a new workout for the principal in the metadata.
#[derive(Debug, Clone)]
pub struct CreateWorkoutCommand {
    pub title: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub days: Vec<DayDraft>,
}

/// Result of successful workout creation.
#[derive(Debug, Clone)]
pub struct CreateWorkoutResult {
    pub workout: Workout,
}

/// Handler for creating workouts.
pub struct CreateWorkoutHandler {
    repository: Arc<dyn WorkoutRepository>,
    limits: QuotaLimits,
}

impl CreateWorkoutHandler {
    pub fn new(repository: Arc<dyn WorkoutRepository>, limits: QuotaLimits) -> Self {
        Self { repository, limits }
    }

    pub async fn handle(
        &self,
        cmd: CreateWorkoutCommand,
        metadata: CommandMetadata,
    ) -> Result<CreateWorkoutResult, WorkoutError> {
        let owner = metadata.user_id.clone();

        // 1. Check the per-owner quota
        let existing = self.repository.count_by_owner(&owner).await?;
        if !self.limits.can_create_workout(existing) {
            tracing::warn!(user_id = %owner, existing, "Workout quota reached");
            return Err(WorkoutError::quota_exceeded(
                Quota::Workouts,
                self.limits.max_workouts,
            ));
        }

        // 2. Build the aggregate (checks day and exercise quotas)
        let draft = WorkoutDraft {
            title: cmd.title,
            start_date: cmd.start_date,
            end_date: cmd.end_date,
            days: cmd.days,
        };
        let workout = Workout::create(owner, draft, &self.limits)?;

        // 3. Persist
        self.repository.save(&workout).await.map_err(|e| {
            tracing::error!(error = %e, "Failed to save workout");
            WorkoutError::from(e)
        })?;

        tracing::info!(
            workout_id = %workout.id(),
            user_id = %metadata.user_id,
            correlation_id = %metadata.correlation_id(),
            source = metadata.source().unwrap_or("unknown"),
            days = workout.days().len(),
            "Workout created"
        );

        Ok(CreateWorkoutResult { workout })
    }
}
