//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers load, guard, change and store one workout aggregate;
//! query handlers only read.

pub mod handlers;

pub use handlers::workout::{
    AddDayCommand, AddDayHandler, AddDayResult, AdvanceRotationCommand, AdvanceRotationHandler,
    AdvanceRotationResult, CreateWorkoutCommand, CreateWorkoutHandler, CreateWorkoutResult,
    DeleteDayCommand, DeleteDayHandler, DeleteExerciseCommand, DeleteExerciseHandler,
    DeleteWorkoutCommand, DeleteWorkoutHandler, GetWorkoutHandler, GetWorkoutQuery,
    ListWorkoutsHandler, ListWorkoutsQuery, LogSessionCommand, LogSessionHandler,
    LogSessionResult, UpdateDayCommand, UpdateDayHandler, UpdateDayResult, WorkoutMutator,
};
