//! Workout-specific error types.

use std::fmt;

use crate::domain::foundation::{
    DayId, DomainError, ErrorCode, ExerciseId, ValidationError, WorkoutId,
};

use super::Quota;

/// The kind of entity a lookup failed to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Workout,
    Day,
    Exercise,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Resource::Workout => "Workout",
            Resource::Day => "Day",
            Resource::Exercise => "Exercise",
        };
        write!(f, "{}", s)
    }
}

/// Errors surfaced by workout operations.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkoutError {
    /// Input violated the shape contract or the weights/sets arity.
    ValidationFailed(Vec<ValidationError>),
    /// A workout, day, or exercise id did not resolve.
    NotFound { resource: Resource, id: String },
    /// The principal does not own the workout.
    Forbidden,
    /// A cardinality ceiling was hit.
    QuotaExceeded { quota: Quota, limit: usize },
    /// The workout changed between load and save.
    Conflict(String),
    /// Storage or other unexpected failure.
    Infrastructure(String),
}

impl WorkoutError {
    pub fn validation(errors: Vec<ValidationError>) -> Self {
        WorkoutError::ValidationFailed(errors)
    }
    pub fn workout_not_found(id: WorkoutId) -> Self {
        WorkoutError::NotFound {
            resource: Resource::Workout,
            id: id.to_string(),
        }
    }
    pub fn day_not_found(id: DayId) -> Self {
        WorkoutError::NotFound {
            resource: Resource::Day,
            id: id.to_string(),
        }
    }
    pub fn exercise_not_found(id: ExerciseId) -> Self {
        WorkoutError::NotFound {
            resource: Resource::Exercise,
            id: id.to_string(),
        }
    }
    pub fn forbidden() -> Self {
        WorkoutError::Forbidden
    }
    pub fn quota_exceeded(quota: Quota, limit: usize) -> Self {
        WorkoutError::QuotaExceeded { quota, limit }
    }
    pub fn conflict(message: impl Into<String>) -> Self {
        WorkoutError::Conflict(message.into())
    }
    pub fn infrastructure(message: impl Into<String>) -> Self {
        WorkoutError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            WorkoutError::ValidationFailed(_) => ErrorCode::ValidationFailed,
            WorkoutError::NotFound { resource, .. } => match resource {
                Resource::Workout => ErrorCode::WorkoutNotFound,
                Resource::Day => ErrorCode::DayNotFound,
                Resource::Exercise => ErrorCode::ExerciseNotFound,
            },
            WorkoutError::Forbidden => ErrorCode::Forbidden,
            WorkoutError::QuotaExceeded { .. } => ErrorCode::QuotaExceeded,
            WorkoutError::Conflict(_) => ErrorCode::ConcurrentModification,
            WorkoutError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            WorkoutError::ValidationFailed(errors) => match errors.len() {
                1 => format!("Validation failed: {}", errors[0]),
                n => format!("Validation failed: {} invalid fields", n),
            },
            WorkoutError::NotFound { resource, id } => format!("{} not found: {}", resource, id),
            WorkoutError::Forbidden => "Not authorized".to_string(),
            WorkoutError::QuotaExceeded { quota, limit } => {
                format!("You cannot add more than {} {}", limit, quota)
            }
            WorkoutError::Conflict(msg) => format!("Concurrent modification: {}", msg),
            WorkoutError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl fmt::Display for WorkoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for WorkoutError {}

impl From<DomainError> for WorkoutError {
    fn from(err: DomainError) -> Self {
        let detail = |key: &str| err.details.get(key).cloned().unwrap_or_default();
        match err.code {
            ErrorCode::Forbidden | ErrorCode::Unauthorized => WorkoutError::Forbidden,
            ErrorCode::WorkoutNotFound => WorkoutError::NotFound {
                resource: Resource::Workout,
                id: detail("workout_id"),
            },
            ErrorCode::DayNotFound => WorkoutError::NotFound {
                resource: Resource::Day,
                id: detail("day_id"),
            },
            ErrorCode::ExerciseNotFound => WorkoutError::NotFound {
                resource: Resource::Exercise,
                id: detail("exercise_id"),
            },
            ErrorCode::ConcurrentModification => WorkoutError::Conflict(err.message),
            ErrorCode::ValidationFailed => {
                WorkoutError::ValidationFailed(vec![ValidationError::invalid_format(
                    detail("field"),
                    err.message,
                )])
            }
            _ => WorkoutError::Infrastructure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable_per_kind() {
        assert_eq!(
            WorkoutError::day_not_found(DayId::new()).code(),
            ErrorCode::DayNotFound
        );
        assert_eq!(
            WorkoutError::quota_exceeded(Quota::Exercises, 20).code(),
            ErrorCode::QuotaExceeded
        );
        assert_eq!(
            WorkoutError::conflict("stale").code(),
            ErrorCode::ConcurrentModification
        );
    }

    #[test]
    fn quota_message_names_the_ceiling() {
        let err = WorkoutError::quota_exceeded(Quota::Days, 10);
        assert_eq!(err.message(), "You cannot add more than 10 days");
    }

    #[test]
    fn validation_message_summarises_many_fields() {
        let err = WorkoutError::validation(vec![
            ValidationError::empty_field("title"),
            ValidationError::empty_field("reps"),
        ]);
        assert_eq!(err.message(), "Validation failed: 2 invalid fields");
    }

    #[test]
    fn forbidden_domain_error_maps_to_forbidden() {
        let err = DomainError::new(ErrorCode::Forbidden, "nope");
        assert_eq!(WorkoutError::from(err), WorkoutError::Forbidden);
    }

    #[test]
    fn not_found_domain_error_keeps_id_detail() {
        let id = WorkoutId::new();
        let err = DomainError::new(ErrorCode::WorkoutNotFound, "gone")
            .with_detail("workout_id", id.to_string());

        assert_eq!(WorkoutError::from(err), WorkoutError::workout_not_found(id));
    }

    #[test]
    fn database_error_maps_to_infrastructure() {
        let err = DomainError::database("Failed to save workout", "disk full");
        assert!(matches!(
            WorkoutError::from(err),
            WorkoutError::Infrastructure(_)
        ));
    }
}
