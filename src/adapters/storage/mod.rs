//! Storage Adapters
//!
//! In-process implementation of the WorkoutRepository port.
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::InMemoryWorkoutRepository;
//!
//! let repo = Arc::new(InMemoryWorkoutRepository::new());
//! ```

mod in_memory_workout_repository;

pub use in_memory_workout_repository::InMemoryWorkoutRepository;
