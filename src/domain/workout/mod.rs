//! Workout domain module.
//!
//! The Workout → Day → Exercise tree, its cardinality quotas, the merge
//! applied when a day is edited, and the per-day exercise rotation.

mod aggregate;
mod day;
mod errors;
mod exercise;
pub mod merge;
mod quota;
pub mod rotation;

pub use aggregate::{Workout, WorkoutDraft};
pub use day::{Day, DayDraft};
pub use errors::{Resource, WorkoutError};
pub use exercise::{Exercise, ExerciseSpec};
pub use merge::{ExerciseUpdate, MergeSummary};
pub use quota::{Quota, QuotaLimits};
pub use rotation::{Advance, ExerciseIndex, Rotation};
