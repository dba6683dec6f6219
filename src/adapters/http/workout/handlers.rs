//! HTTP handlers for workout endpoints.

use std::str::FromStr;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::workout::{
    AddDayCommand, AddDayHandler, AdvanceRotationCommand, AdvanceRotationHandler,
    CreateWorkoutCommand, CreateWorkoutHandler, DeleteDayCommand, DeleteDayHandler,
    DeleteExerciseCommand, DeleteExerciseHandler, DeleteWorkoutCommand, DeleteWorkoutHandler,
    GetWorkoutHandler, GetWorkoutQuery, ListWorkoutsHandler, ListWorkoutsQuery,
    LogSessionCommand, LogSessionHandler, UpdateDayCommand, UpdateDayHandler,
};
use crate::domain::foundation::{
    AuthenticatedUser, CommandMetadata, DayId, ExerciseId, WorkoutId,
};
use crate::domain::workout::{QuotaLimits, WorkoutError};
use crate::ports::WorkoutRepository;

use super::dto::{
    AddDayRequest, CreateWorkoutRequest, ErrorResponse, LogSessionRequest, MessageResponse,
    UpdateDayRequest, WorkoutListResponse, WorkoutResponse,
};

const REQUEST_ID_HEADER: &str = "x-request-id";

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct WorkoutHandlers {
    create_handler: Arc<CreateWorkoutHandler>,
    list_handler: Arc<ListWorkoutsHandler>,
    get_handler: Arc<GetWorkoutHandler>,
    delete_handler: Arc<DeleteWorkoutHandler>,
    add_day_handler: Arc<AddDayHandler>,
    update_day_handler: Arc<UpdateDayHandler>,
    delete_day_handler: Arc<DeleteDayHandler>,
    advance_handler: Arc<AdvanceRotationHandler>,
    log_session_handler: Arc<LogSessionHandler>,
    delete_exercise_handler: Arc<DeleteExerciseHandler>,
}

impl WorkoutHandlers {
    /// Wires every workout handler to one repository.
    pub fn new(repository: Arc<dyn WorkoutRepository>, limits: QuotaLimits) -> Self {
        Self {
            create_handler: Arc::new(CreateWorkoutHandler::new(repository.clone(), limits)),
            list_handler: Arc::new(ListWorkoutsHandler::new(repository.clone())),
            get_handler: Arc::new(GetWorkoutHandler::new(repository.clone())),
            delete_handler: Arc::new(DeleteWorkoutHandler::new(repository.clone())),
            add_day_handler: Arc::new(AddDayHandler::new(repository.clone(), limits)),
            update_day_handler: Arc::new(UpdateDayHandler::new(repository.clone(), limits)),
            delete_day_handler: Arc::new(DeleteDayHandler::new(repository.clone())),
            advance_handler: Arc::new(AdvanceRotationHandler::new(repository.clone())),
            log_session_handler: Arc::new(LogSessionHandler::new(repository.clone())),
            delete_exercise_handler: Arc::new(DeleteExerciseHandler::new(repository)),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Workouts
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/workouts - Create a workout
pub async fn create_workout(
    State(handlers): State<WorkoutHandlers>,
    RequireAuth(user): RequireAuth,
    headers: HeaderMap,
    body: Result<Json<CreateWorkoutRequest>, JsonRejection>,
) -> Response {
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => return handle_json_rejection(rejection),
    };
    let valid = match req.validate() {
        Ok(valid) => valid,
        Err(e) => return handle_workout_error(e),
    };

    let cmd = CreateWorkoutCommand {
        title: valid.title,
        start_date: valid.start_date,
        end_date: valid.end_date,
        days: valid.days,
    };

    match handlers
        .create_handler
        .handle(cmd, command_metadata(user, &headers))
        .await
    {
        Ok(result) => (
            StatusCode::CREATED,
            Json(WorkoutResponse::new(result.workout, "Workout created")),
        )
            .into_response(),
        Err(e) => handle_workout_error(e),
    }
}

/// GET /api/workouts - List the caller's workouts
pub async fn list_workouts(
    State(handlers): State<WorkoutHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    let query = ListWorkoutsQuery { user_id: user.id };

    match handlers.list_handler.handle(query).await {
        Ok(workouts) => {
            let response = WorkoutListResponse {
                workouts,
                message: "Fetched workouts".to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_workout_error(e),
    }
}

/// GET /api/workouts/:workout_id - Get one workout
pub async fn get_workout(
    State(handlers): State<WorkoutHandlers>,
    RequireAuth(user): RequireAuth,
    Path(workout_id): Path<String>,
) -> Response {
    let workout_id = match parse_id::<WorkoutId>(&workout_id, "workout") {
        Ok(id) => id,
        Err(response) => return response,
    };

    let query = GetWorkoutQuery {
        workout_id,
        user_id: user.id,
    };

    match handlers.get_handler.handle(query).await {
        Ok(workout) => (
            StatusCode::OK,
            Json(WorkoutResponse::new(workout, "Fetched workout")),
        )
            .into_response(),
        Err(e) => handle_workout_error(e),
    }
}

/// DELETE /api/workouts/:workout_id - Delete a workout
pub async fn delete_workout(
    State(handlers): State<WorkoutHandlers>,
    RequireAuth(user): RequireAuth,
    headers: HeaderMap,
    Path(workout_id): Path<String>,
) -> Response {
    let workout_id = match parse_id::<WorkoutId>(&workout_id, "workout") {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = DeleteWorkoutCommand { workout_id };

    match handlers
        .delete_handler
        .handle(cmd, command_metadata(user, &headers))
        .await
    {
        Ok(()) => (
            StatusCode::OK,
            Json(MessageResponse {
                message: "Workout deleted".to_string(),
            }),
        )
            .into_response(),
        Err(e) => handle_workout_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Days
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/workouts/:workout_id/days - Append a day
pub async fn add_day(
    State(handlers): State<WorkoutHandlers>,
    RequireAuth(user): RequireAuth,
    headers: HeaderMap,
    Path(workout_id): Path<String>,
    body: Result<Json<AddDayRequest>, JsonRejection>,
) -> Response {
    let workout_id = match parse_id::<WorkoutId>(&workout_id, "workout") {
        Ok(id) => id,
        Err(response) => return response,
    };
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => return handle_json_rejection(rejection),
    };
    let day = match req.validate() {
        Ok(day) => day,
        Err(e) => return handle_workout_error(e),
    };

    let cmd = AddDayCommand { workout_id, day };

    match handlers
        .add_day_handler
        .handle(cmd, command_metadata(user, &headers))
        .await
    {
        Ok(result) => (
            StatusCode::CREATED,
            Json(WorkoutResponse::new(result.workout, "Day added")),
        )
            .into_response(),
        Err(e) => handle_workout_error(e),
    }
}

/// PUT /api/workouts/:workout_id/days/:day_id - Edit a day and merge its exercises
pub async fn update_day(
    State(handlers): State<WorkoutHandlers>,
    RequireAuth(user): RequireAuth,
    headers: HeaderMap,
    Path((workout_id, day_id)): Path<(String, String)>,
    body: Result<Json<UpdateDayRequest>, JsonRejection>,
) -> Response {
    let (workout_id, day_id) = match parse_day_path(&workout_id, &day_id) {
        Ok(ids) => ids,
        Err(response) => return response,
    };
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => return handle_json_rejection(rejection),
    };
    let valid = match req.validate() {
        Ok(valid) => valid,
        Err(e) => return handle_workout_error(e),
    };

    let cmd = UpdateDayCommand {
        workout_id,
        day_id,
        title: valid.title,
        exercises: valid.exercises,
    };

    match handlers
        .update_day_handler
        .handle(cmd, command_metadata(user, &headers))
        .await
    {
        Ok(result) => (
            StatusCode::OK,
            Json(WorkoutResponse::new(result.workout, "Day updated")),
        )
            .into_response(),
        Err(e) => handle_workout_error(e),
    }
}

/// DELETE /api/workouts/:workout_id/days/:day_id - Remove a day
pub async fn delete_day(
    State(handlers): State<WorkoutHandlers>,
    RequireAuth(user): RequireAuth,
    headers: HeaderMap,
    Path((workout_id, day_id)): Path<(String, String)>,
) -> Response {
    let (workout_id, day_id) = match parse_day_path(&workout_id, &day_id) {
        Ok(ids) => ids,
        Err(response) => return response,
    };

    let cmd = DeleteDayCommand { workout_id, day_id };

    match handlers
        .delete_day_handler
        .handle(cmd, command_metadata(user, &headers))
        .await
    {
        Ok(workout) => (
            StatusCode::OK,
            Json(WorkoutResponse::new(workout, "Day deleted")),
        )
            .into_response(),
        Err(e) => handle_workout_error(e),
    }
}

/// POST /api/workouts/:workout_id/days/:day_id/advance - Skip to the next exercise
pub async fn advance_rotation(
    State(handlers): State<WorkoutHandlers>,
    RequireAuth(user): RequireAuth,
    headers: HeaderMap,
    Path((workout_id, day_id)): Path<(String, String)>,
) -> Response {
    let (workout_id, day_id) = match parse_day_path(&workout_id, &day_id) {
        Ok(ids) => ids,
        Err(response) => return response,
    };

    let cmd = AdvanceRotationCommand { workout_id, day_id };

    match handlers
        .advance_handler
        .handle(cmd, command_metadata(user, &headers))
        .await
    {
        Ok(result) => (
            StatusCode::OK,
            Json(WorkoutResponse::new(result.workout, "Moved to next exercise")),
        )
            .into_response(),
        Err(e) => handle_workout_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Exercises
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/workouts/:workout_id/days/:day_id/exercises/:exercise_id/sessions - Log a session
pub async fn log_session(
    State(handlers): State<WorkoutHandlers>,
    RequireAuth(user): RequireAuth,
    headers: HeaderMap,
    Path((workout_id, day_id, exercise_id)): Path<(String, String, String)>,
    body: Result<Json<LogSessionRequest>, JsonRejection>,
) -> Response {
    let (workout_id, day_id) = match parse_day_path(&workout_id, &day_id) {
        Ok(ids) => ids,
        Err(response) => return response,
    };
    let exercise_id = match parse_id::<ExerciseId>(&exercise_id, "exercise") {
        Ok(id) => id,
        Err(response) => return response,
    };
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => return handle_json_rejection(rejection),
    };
    let session = match req.validate() {
        Ok(session) => session,
        Err(e) => return handle_workout_error(e),
    };

    let cmd = LogSessionCommand {
        workout_id,
        day_id,
        exercise_id,
        weights: session.weights,
        record: session.record,
    };

    match handlers
        .log_session_handler
        .handle(cmd, command_metadata(user, &headers))
        .await
    {
        Ok(result) => (
            StatusCode::OK,
            Json(WorkoutResponse::new(result.workout, "Session logged")),
        )
            .into_response(),
        Err(e) => handle_workout_error(e),
    }
}

/// DELETE /api/workouts/:workout_id/days/:day_id/exercises/:exercise_id - Remove an exercise
pub async fn delete_exercise(
    State(handlers): State<WorkoutHandlers>,
    RequireAuth(user): RequireAuth,
    headers: HeaderMap,
    Path((workout_id, day_id, exercise_id)): Path<(String, String, String)>,
) -> Response {
    let (workout_id, day_id) = match parse_day_path(&workout_id, &day_id) {
        Ok(ids) => ids,
        Err(response) => return response,
    };
    let exercise_id = match parse_id::<ExerciseId>(&exercise_id, "exercise") {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = DeleteExerciseCommand {
        workout_id,
        day_id,
        exercise_id,
    };

    match handlers
        .delete_exercise_handler
        .handle(cmd, command_metadata(user, &headers))
        .await
    {
        Ok(workout) => (
            StatusCode::OK,
            Json(WorkoutResponse::new(workout, "Exercise deleted")),
        )
            .into_response(),
        Err(e) => handle_workout_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Helpers
// ════════════════════════════════════════════════════════════════════════════

fn command_metadata(user: AuthenticatedUser, headers: &HeaderMap) -> CommandMetadata {
    let metadata = CommandMetadata::new(user.id).with_source("http");
    match headers
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
    {
        Some(request_id) => metadata.with_correlation_id(request_id),
        None => metadata,
    }
}

fn parse_id<T: FromStr>(raw: &str, resource: &str) -> Result<T, Response> {
    raw.parse::<T>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(format!("Invalid {} ID", resource))),
        )
            .into_response()
    })
}

fn parse_day_path(workout_id: &str, day_id: &str) -> Result<(WorkoutId, DayId), Response> {
    Ok((parse_id(workout_id, "workout")?, parse_id(day_id, "day")?))
}

fn handle_json_rejection(rejection: JsonRejection) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse::bad_request(rejection.body_text())),
    )
        .into_response()
}

pub(crate) fn status_for(error: &WorkoutError) -> StatusCode {
    match error {
        WorkoutError::ValidationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
        WorkoutError::NotFound { .. } => StatusCode::NOT_FOUND,
        WorkoutError::Forbidden => StatusCode::FORBIDDEN,
        WorkoutError::QuotaExceeded { .. } | WorkoutError::Conflict(_) => StatusCode::CONFLICT,
        WorkoutError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn handle_workout_error(error: WorkoutError) -> Response {
    (
        status_for(&error),
        Json(ErrorResponse::from_workout_error(&error)),
    )
        .into_response()
}
