//! Exercise rotation state machine.
//!
//! Each training day walks its exercise list in a loop. `exercise_index`
//! points at the exercise currently in progress, or is `Idle` (persisted as
//! `-1`) before the first exercise and after each completed cycle.
//! `workout_count` counts completed cycles.
//!
//! ```text
//!   Idle ──advance──► Active(0) ──► Active(1) ──► … ──► Active(n-1)
//!    ▲                                                      │
//!    └──────────── advance (workout_count += 1) ────────────┘
//! ```
//!
//! A day without exercises wraps on every advance.

use serde::{Deserialize, Serialize};

/// Pointer into a day's exercise list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "i64", try_from = "i64")]
pub enum ExerciseIndex {
    /// Not started, or between cycles.
    #[default]
    Idle,
    /// Zero-based position of the exercise in progress.
    Active(usize),
}

impl ExerciseIndex {
    /// Returns the raw integer form used in persisted documents.
    pub fn as_i64(self) -> i64 {
        match self {
            ExerciseIndex::Idle => -1,
            ExerciseIndex::Active(position) => position as i64,
        }
    }

    /// Returns the active position, if any.
    pub fn position(self) -> Option<usize> {
        match self {
            ExerciseIndex::Idle => None,
            ExerciseIndex::Active(position) => Some(position),
        }
    }
}

impl From<ExerciseIndex> for i64 {
    fn from(index: ExerciseIndex) -> Self {
        index.as_i64()
    }
}

impl TryFrom<i64> for ExerciseIndex {
    type Error = String;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        match raw {
            -1 => Ok(ExerciseIndex::Idle),
            n if n >= 0 => Ok(ExerciseIndex::Active(n as usize)),
            n => Err(format!("exercise index must be >= -1, got {}", n)),
        }
    }
}

/// Outcome of one `advance` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The pointer moved to the given position.
    Moved(usize),
    /// The pointer passed the last exercise; a cycle was completed.
    Wrapped { workout_count: u32 },
}

/// Rotation progress of a single day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rotation {
    workout_count: u32,
    exercise_index: ExerciseIndex,
}

impl Rotation {
    /// Fresh rotation: idle, no completed cycles.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconstitute a rotation from stored values.
    pub fn reconstitute(workout_count: u32, exercise_index: ExerciseIndex) -> Self {
        Self {
            workout_count,
            exercise_index,
        }
    }

    pub fn workout_count(&self) -> u32 {
        self.workout_count
    }

    pub fn exercise_index(&self) -> ExerciseIndex {
        self.exercise_index
    }

    /// Moves the pointer one step through a list of `exercise_count` exercises.
    ///
    /// When the pointer is at or beyond the last exercise it returns to
    /// `Idle` and the cycle counter is incremented.
    pub fn advance(&mut self, exercise_count: usize) -> Advance {
        let last = exercise_count as i64 - 1;
        let current = self.exercise_index.as_i64();

        if current >= last {
            self.exercise_index = ExerciseIndex::Idle;
            self.workout_count = self.workout_count.saturating_add(1);
            Advance::Wrapped {
                workout_count: self.workout_count,
            }
        } else {
            let next = (current + 1) as usize;
            self.exercise_index = ExerciseIndex::Active(next);
            Advance::Moved(next)
        }
    }

    /// Keeps the pointer valid after the exercise at `removed` was deleted.
    ///
    /// Removing an exercise at or before the pointer shifts the pointer back
    /// by one; removing the first exercise while it is in progress returns
    /// the pointer to `Idle`.
    pub fn exercise_removed(&mut self, removed: usize) {
        if let ExerciseIndex::Active(position) = self.exercise_index {
            if removed <= position {
                self.exercise_index = match position {
                    0 => ExerciseIndex::Idle,
                    p => ExerciseIndex::Active(p - 1),
                };
            }
        }
    }

    /// Returns true if the pointer addresses a slot of a list of the given size.
    pub fn is_within(&self, exercise_count: usize) -> bool {
        match self.exercise_index {
            ExerciseIndex::Idle => true,
            ExerciseIndex::Active(position) => position < exercise_count,
        }
    }
}
