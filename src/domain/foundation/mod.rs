//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, errors, and the ownership guard
//! that form the vocabulary of the workout domain.

mod auth;
mod command;
mod errors;
mod ids;
mod ownership;
mod timestamp;

pub use auth::{AuthError, AuthenticatedUser};
pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{DayId, ExerciseId, UserId, WorkoutId};
pub use ownership::OwnedByUser;
pub use timestamp::Timestamp;
