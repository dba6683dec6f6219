//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `WorkoutRepository` - Whole-aggregate persistence of workouts
//! - `SessionValidator` - Bearer token verification

mod session_validator;
mod workout_repository;

pub use session_validator::SessionValidator;
pub use workout_repository::WorkoutRepository;
