//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresWorkoutRepository` - Workout aggregates as JSONB documents

mod workout_repository;

pub use workout_repository::PostgresWorkoutRepository;
