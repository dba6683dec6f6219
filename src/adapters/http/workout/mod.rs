//! HTTP adapter for workout endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AddDayRequest, CreateWorkoutRequest, DayRequest, ErrorResponse, ExerciseRequest,
    LogSessionRequest, MessageResponse, UpdateDayRequest, WorkoutListResponse, WorkoutResponse,
};
pub use handlers::WorkoutHandlers;
pub use routes::workout_routes;
