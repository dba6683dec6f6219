//! Merge of an incoming exercise list into a stored day.
//!
//! Merging runs in two phases. `plan` inspects the stored exercises and the
//! incoming list without touching either and fails on the first quota
//! violation; `MergePlan::apply` then performs the edits, which cannot fail.
//! A rejected batch therefore leaves the day exactly as it was.
//!
//! Incoming entries whose id matches a stored exercise replace its editable
//! fields and keep its history. All other entries are appended with a fresh
//! id and empty history. Stored exercises missing from the input are kept.

use crate::domain::foundation::ExerciseId;

use super::{Exercise, ExerciseSpec, Quota, QuotaLimits, WorkoutError};

/// One entry of an incoming exercise list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExerciseUpdate {
    /// Id of the stored exercise to update, if the caller sent one.
    pub id: Option<ExerciseId>,
    pub spec: ExerciseSpec,
}

impl ExerciseUpdate {
    /// An entry that always inserts a new exercise.
    pub fn insert(spec: ExerciseSpec) -> Self {
        Self { id: None, spec }
    }

    /// An entry targeting an existing exercise.
    pub fn update(id: ExerciseId, spec: ExerciseSpec) -> Self {
        Self { id: Some(id), spec }
    }
}

/// What a merge did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSummary {
    pub updated: usize,
    pub inserted: usize,
}

#[derive(Debug)]
enum Step {
    Update { position: usize, spec: ExerciseSpec },
    Insert(ExerciseSpec),
}

/// A validated sequence of edits.
#[derive(Debug)]
pub(crate) struct MergePlan {
    steps: Vec<Step>,
}

/// Matches incoming entries against `existing` and checks the exercise quota
/// against the running count at each insertion.
pub(crate) fn plan(
    existing: &[Exercise],
    incoming: Vec<ExerciseUpdate>,
    limits: &QuotaLimits,
) -> Result<MergePlan, WorkoutError> {
    let mut count = existing.len();
    let mut steps = Vec::with_capacity(incoming.len());

    for update in incoming {
        let position = update
            .id
            .and_then(|id| existing.iter().position(|e| e.id() == id));

        match position {
            Some(position) => steps.push(Step::Update {
                position,
                spec: update.spec,
            }),
            None => {
                limits.ensure(limits.can_add_exercise(count), Quota::Exercises)?;
                count += 1;
                steps.push(Step::Insert(update.spec));
            }
        }
    }

    Ok(MergePlan { steps })
}

impl MergePlan {
    pub(crate) fn apply(self, exercises: &mut Vec<Exercise>) -> MergeSummary {
        let mut summary = MergeSummary::default();
        for step in self.steps {
            match step {
                Step::Update { position, spec } => {
                    exercises[position].apply_spec(spec);
                    summary.updated += 1;
                }
                Step::Insert(spec) => {
                    exercises.push(Exercise::new(spec));
                    summary.inserted += 1;
                }
            }
        }
        summary
    }
}
