//! HTTP DTOs for workout endpoints.
//!
//! Request bodies are deserialized loosely and then checked field by field,
//! so a single response can name every offending field. Only checked values
//! reach the application layer.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::{ExerciseId, Timestamp, ValidationError};
use crate::domain::workout::{
    DayDraft, ExerciseSpec, ExerciseUpdate, Workout, WorkoutError,
};

/// Bounds on user-supplied text after trimming.
pub const MIN_TEXT_LEN: usize = 1;
pub const MAX_TEXT_LEN: usize = 20;

// ════════════════════════════════════════════════════════════════════════════
// Field checks
// ════════════════════════════════════════════════════════════════════════════

/// Accumulates field errors across a whole payload.
#[derive(Debug, Default)]
struct FieldChecker {
    errors: Vec<ValidationError>,
}

impl FieldChecker {
    /// Trimmed text of 1 to 20 characters.
    fn text(&mut self, field: &str, value: Option<&str>) -> String {
        let Some(raw) = value else {
            self.errors.push(ValidationError::empty_field(field));
            return String::new();
        };
        let trimmed = raw.trim();
        let len = trimmed.chars().count();
        if len < MIN_TEXT_LEN {
            self.errors.push(ValidationError::empty_field(field));
        } else if len > MAX_TEXT_LEN {
            self.errors
                .push(ValidationError::too_long(field, MAX_TEXT_LEN, len));
        }
        trimmed.to_string()
    }

    /// Non-negative integer, given as a JSON number or a numeric string.
    fn count(&mut self, field: &str, value: Option<&Value>) -> u32 {
        let parsed = match value {
            Some(Value::Number(n)) => n.as_i64(),
            Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        match parsed {
            Some(n) if (0..=u32::MAX as i64).contains(&n) => n as u32,
            Some(n) => {
                self.errors
                    .push(ValidationError::out_of_range(field, 0, u32::MAX as i64, n));
                0
            }
            None => {
                self.errors
                    .push(ValidationError::invalid_format(field, "expected an integer"));
                0
            }
        }
    }

    /// ISO-8601 instant or calendar date.
    fn date(&mut self, field: &str, value: Option<&str>) -> Timestamp {
        match value.and_then(Timestamp::parse_iso8601) {
            Some(ts) => ts,
            None => {
                self.errors
                    .push(ValidationError::invalid_format(field, "expected an ISO-8601 date"));
                Timestamp::now()
            }
        }
    }

    /// A number, given as a JSON number or a numeric string.
    fn weight(&mut self, field: &str, value: &Value) -> f64 {
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|w| w.is_finite()),
            _ => None,
        };
        parsed.unwrap_or_else(|| {
            self.errors
                .push(ValidationError::invalid_format(field, "expected a number"));
            0.0
        })
    }

    fn fail(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    fn finish<T>(self, value: T) -> Result<T, WorkoutError> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(WorkoutError::validation(self.errors))
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// One exercise as sent by a client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExerciseRequest {
    /// Id of a stored exercise; only meaningful when editing a day.
    #[serde(default, alias = "_id")]
    pub id: Option<String>,
    pub title: Option<String>,
    pub reps: Option<String>,
    pub sets: Option<Value>,
    pub rest: Option<Value>,
    pub note: Option<String>,
}

impl ExerciseRequest {
    fn check(&self, path: &str, checker: &mut FieldChecker) -> ExerciseSpec {
        ExerciseSpec {
            title: checker.text(&format!("{}.title", path), self.title.as_deref()),
            reps: checker.text(&format!("{}.reps", path), self.reps.as_deref()),
            sets: checker.count(&format!("{}.sets", path), self.sets.as_ref()),
            rest: checker.count(&format!("{}.rest", path), self.rest.as_ref()),
            note: checker.text(&format!("{}.note", path), self.note.as_deref()),
        }
    }
}

/// One day as sent by a client.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DayRequest {
    pub title: Option<String>,
    #[serde(default)]
    pub exercises: Vec<ExerciseRequest>,
}

impl DayRequest {
    fn check(&self, path: &str, checker: &mut FieldChecker) -> DayDraft {
        let title = checker.text(&format!("{}title", path), self.title.as_deref());
        let exercises = self
            .exercises
            .iter()
            .enumerate()
            .map(|(i, ex)| ex.check(&format!("{}exercises[{}]", path, i), checker))
            .collect();
        DayDraft { title, exercises }
    }

    /// Checks the payload of a new day.
    pub fn validate(&self) -> Result<DayDraft, WorkoutError> {
        let mut checker = FieldChecker::default();
        let draft = self.check("", &mut checker);
        checker.finish(draft)
    }
}

/// Request to add a day, either wrapped as `{ "day": {...} }` or bare.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AddDayRequest {
    Wrapped { day: DayRequest },
    Bare(DayRequest),
}

impl AddDayRequest {
    pub fn validate(&self) -> Result<DayDraft, WorkoutError> {
        match self {
            AddDayRequest::Wrapped { day } | AddDayRequest::Bare(day) => day.validate(),
        }
    }
}

/// Checked content of a create-workout request.
#[derive(Debug, Clone)]
pub struct ValidWorkout {
    pub title: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub days: Vec<DayDraft>,
}

/// Request to create a workout.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkoutRequest {
    pub title: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(default)]
    pub days: Vec<DayRequest>,
}

impl CreateWorkoutRequest {
    pub fn validate(&self) -> Result<ValidWorkout, WorkoutError> {
        let mut checker = FieldChecker::default();
        let title = checker.text("title", self.title.as_deref());
        let start_date = checker.date("startDate", self.start_date.as_deref());
        let end_date = checker.date("endDate", self.end_date.as_deref());
        let days = self
            .days
            .iter()
            .enumerate()
            .map(|(i, day)| day.check(&format!("days[{}].", i), &mut checker))
            .collect();

        checker.finish(ValidWorkout {
            title,
            start_date,
            end_date,
            days,
        })
    }
}

/// Checked content of an update-day request.
#[derive(Debug, Clone)]
pub struct ValidDayUpdate {
    pub title: String,
    pub exercises: Vec<ExerciseUpdate>,
}

/// Request to edit a day.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDayRequest {
    pub title: Option<String>,
    #[serde(default)]
    pub exercises: Vec<ExerciseRequest>,
}

impl UpdateDayRequest {
    pub fn validate(&self) -> Result<ValidDayUpdate, WorkoutError> {
        let mut checker = FieldChecker::default();
        let title = checker.text("title", self.title.as_deref());
        let exercises = self
            .exercises
            .iter()
            .enumerate()
            .map(|(i, ex)| ExerciseUpdate {
                // Ids that do not parse cannot match a stored exercise.
                id: ex.id.as_deref().and_then(|s| s.parse::<ExerciseId>().ok()),
                spec: ex.check(&format!("exercises[{}]", i), &mut checker),
            })
            .collect();

        checker.finish(ValidDayUpdate { title, exercises })
    }
}

/// Checked content of a log-session request.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidSession {
    pub weights: Vec<f64>,
    pub record: String,
}

/// Request to log one session of an exercise.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogSessionRequest {
    pub weights: Option<Value>,
    pub record: Option<Value>,
}

impl LogSessionRequest {
    pub fn validate(&self) -> Result<ValidSession, WorkoutError> {
        let mut checker = FieldChecker::default();

        let weights = match &self.weights {
            Some(Value::Array(items)) => items
                .iter()
                .enumerate()
                .map(|(i, w)| checker.weight(&format!("weights[{}]", i), w))
                .collect(),
            _ => {
                checker.fail(ValidationError::invalid_format(
                    "weights",
                    "expected a list of numbers",
                ));
                Vec::new()
            }
        };

        let record = match &self.record {
            Some(Value::String(s)) => s.trim().to_string(),
            _ => {
                checker.fail(ValidationError::invalid_format("record", "expected a string"));
                String::new()
            }
        };

        checker.finish(ValidSession { weights, record })
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// A workout plus a human-readable message.
#[derive(Debug, Clone, Serialize)]
pub struct WorkoutResponse {
    pub workout: Workout,
    pub message: String,
}

impl WorkoutResponse {
    pub fn new(workout: Workout, message: impl Into<String>) -> Self {
        Self {
            workout,
            message: message.into(),
        }
    }
}

/// All workouts of the caller.
#[derive(Debug, Clone, Serialize)]
pub struct WorkoutListResponse {
    pub workouts: Vec<Workout>,
    pub message: String,
}

/// Confirmation without a body.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Offending field as reported to clients.
#[derive(Debug, Clone, Serialize)]
pub struct FieldErrorResponse {
    pub field: String,
    pub message: String,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn from_workout_error(error: &WorkoutError) -> Self {
        let details = match error {
            WorkoutError::ValidationFailed(errors) => {
                let fields: Vec<FieldErrorResponse> = errors
                    .iter()
                    .map(|e| FieldErrorResponse {
                        field: e.field().to_string(),
                        message: e.to_string(),
                    })
                    .collect();
                serde_json::to_value(fields).ok()
            }
            WorkoutError::QuotaExceeded { quota, limit } => Some(serde_json::json!({
                "quota": quota.to_string(),
                "limit": limit,
            })),
            _ => None,
        };

        let message = match error {
            // Storage details stay in the logs.
            WorkoutError::Infrastructure(_) => "Internal server error".to_string(),
            other => other.message(),
        };

        Self {
            code: error.code().to_string(),
            message,
            details,
        }
    }
}
