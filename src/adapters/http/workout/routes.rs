//! HTTP routes for workout endpoints.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use super::handlers::{
    add_day, advance_rotation, create_workout, delete_day, delete_exercise, delete_workout,
    get_workout, list_workouts, log_session, update_day, WorkoutHandlers,
};

/// Creates the workout router; nest it under `/api/workouts`.
pub fn workout_routes(handlers: WorkoutHandlers) -> Router {
    Router::new()
        .route("/", get(list_workouts).post(create_workout))
        .route("/:workout_id", get(get_workout).delete(delete_workout))
        .route("/:workout_id/days", post(add_day))
        .route(
            "/:workout_id/days/:day_id",
            put(update_day).delete(delete_day),
        )
        .route("/:workout_id/days/:day_id/advance", post(advance_rotation))
        .route(
            "/:workout_id/days/:day_id/exercises/:exercise_id",
            delete(delete_exercise),
        )
        .route(
            "/:workout_id/days/:day_id/exercises/:exercise_id/sessions",
            post(log_session),
        )
        .with_state(handlers)
}
