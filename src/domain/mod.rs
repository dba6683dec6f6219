//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, ownership)
//! - `workout` - Workout aggregate, quotas, merge and rotation rules

pub mod foundation;
pub mod workout;
