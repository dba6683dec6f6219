//! Workout aggregate entity.
//!
//! The workout is the consistency boundary: days and exercises are only
//! reachable through it and are always loaded and saved together. Every
//! successful mutation bumps `version` so stores can detect lost updates.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DayId, ExerciseId, OwnedByUser, Timestamp, UserId, WorkoutId};

use super::merge::{ExerciseUpdate, MergeSummary};
use super::rotation::Advance;
use super::{Day, DayDraft, Quota, QuotaLimits, WorkoutError};

/// Input for a new workout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutDraft {
    pub title: String,
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub days: Vec<DayDraft>,
}

/// A multi-day training program owned by one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workout {
    id: WorkoutId,
    owner_id: UserId,
    title: String,
    start_date: Timestamp,
    end_date: Timestamp,
    days: Vec<Day>,
    created_at: Timestamp,
    updated_at: Timestamp,
    version: u64,
}

impl Workout {
    /// Builds a new workout from a draft.
    ///
    /// # Errors
    ///
    /// - `QuotaExceeded` if the draft carries too many days, or a day too
    ///   many exercises
    pub fn create(
        owner_id: UserId,
        draft: WorkoutDraft,
        limits: &QuotaLimits,
    ) -> Result<Self, WorkoutError> {
        limits.ensure_day_count(draft.days.len())?;
        for day in &draft.days {
            limits.ensure_exercise_count(day.exercises.len())?;
        }

        let now = Timestamp::now();
        Ok(Self {
            id: WorkoutId::new(),
            owner_id,
            title: draft.title,
            start_date: draft.start_date,
            end_date: draft.end_date,
            days: draft.days.into_iter().map(Day::new).collect(),
            created_at: now,
            updated_at: now,
            version: 1,
        })
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn id(&self) -> WorkoutId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn start_date(&self) -> Timestamp {
        self.start_date
    }

    pub fn end_date(&self) -> Timestamp {
        self.end_date
    }

    pub fn days(&self) -> &[Day] {
        &self.days
    }

    pub fn day(&self, id: DayId) -> Option<&Day> {
        self.days.iter().find(|d| d.id() == id)
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    /// Monotonic revision, starting at 1.
    pub fn version(&self) -> u64 {
        self.version
    }

    // ───────────────────────────────────────────────────────────────
    // Mutations
    // ───────────────────────────────────────────────────────────────

    /// Appends a new day.
    ///
    /// # Errors
    ///
    /// - `QuotaExceeded` if the workout is full or the day carries too many
    ///   exercises
    pub fn add_day(&mut self, draft: DayDraft, limits: &QuotaLimits) -> Result<DayId, WorkoutError> {
        limits.ensure(limits.can_add_day(self), Quota::Days)?;
        limits.ensure_exercise_count(draft.exercises.len())?;

        let day = Day::new(draft);
        let id = day.id();
        self.days.push(day);
        self.record_change();
        Ok(id)
    }

    /// Renames a day and merges an incoming exercise list into it.
    pub fn update_day(
        &mut self,
        day_id: DayId,
        title: String,
        exercises: Vec<ExerciseUpdate>,
        limits: &QuotaLimits,
    ) -> Result<MergeSummary, WorkoutError> {
        let summary = self.day_mut(day_id)?.revise(title, exercises, limits)?;
        self.record_change();
        Ok(summary)
    }

    /// Moves a day's rotation one step.
    pub fn advance_rotation(&mut self, day_id: DayId) -> Result<Advance, WorkoutError> {
        let step = self.day_mut(day_id)?.advance();
        self.record_change();
        Ok(step)
    }

    /// Logs one session of an exercise and advances the day's rotation.
    pub fn log_session(
        &mut self,
        day_id: DayId,
        exercise_id: ExerciseId,
        weights: Vec<f64>,
        record: String,
    ) -> Result<Advance, WorkoutError> {
        let step = self
            .day_mut(day_id)?
            .log_session(exercise_id, weights, record)?;
        self.record_change();
        Ok(step)
    }

    pub fn remove_day(&mut self, day_id: DayId) -> Result<(), WorkoutError> {
        let position = self
            .days
            .iter()
            .position(|d| d.id() == day_id)
            .ok_or_else(|| WorkoutError::day_not_found(day_id))?;
        self.days.remove(position);
        self.record_change();
        Ok(())
    }

    pub fn remove_exercise(
        &mut self,
        day_id: DayId,
        exercise_id: ExerciseId,
    ) -> Result<(), WorkoutError> {
        self.day_mut(day_id)?.remove_exercise(exercise_id)?;
        self.record_change();
        Ok(())
    }

    fn day_mut(&mut self, id: DayId) -> Result<&mut Day, WorkoutError> {
        self.days
            .iter_mut()
            .find(|d| d.id() == id)
            .ok_or_else(|| WorkoutError::day_not_found(id))
    }

    fn record_change(&mut self) {
        self.version += 1;
        self.updated_at = Timestamp::now();
    }
}

impl OwnedByUser for Workout {
    fn owner_id(&self) -> &UserId {
        &self.owner_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::workout::rotation::ExerciseIndex;
    use crate::domain::workout::test_support::{day_draft, draft, owner, spec, workout_with_days};

    #[test]
    fn create_mints_ids_and_starts_at_version_one() {
        let workout =
            Workout::create(owner(), draft("Cut", vec![day_draft(2)]), &QuotaLimits::default())
                .unwrap();

        assert_eq!(workout.version(), 1);
        assert_eq!(workout.days().len(), 1);
        assert_eq!(workout.days()[0].exercise_index(), ExerciseIndex::Idle);
        assert_eq!(workout.created_at(), workout.updated_at());
    }

    #[test]
    fn create_rejects_too_many_days() {
        let days = (0..11).map(|_| day_draft(1)).collect();

        let result = Workout::create(owner(), draft("Bulk", days), &QuotaLimits::default());

        assert_eq!(result.unwrap_err(), WorkoutError::quota_exceeded(Quota::Days, 10));
    }

    #[test]
    fn create_rejects_overfull_day() {
        let result = Workout::create(
            owner(),
            draft("Bulk", vec![day_draft(21)]),
            &QuotaLimits::default(),
        );

        assert_eq!(
            result.unwrap_err(),
            WorkoutError::quota_exceeded(Quota::Exercises, 20)
        );
    }

    #[test]
    fn eleventh_day_is_rejected_and_workout_unchanged() {
        let mut workout = workout_with_days(&owner(), 10, 1);
        let before = workout.clone();

        let result = workout.add_day(day_draft(1), &QuotaLimits::default());

        assert_eq!(result.unwrap_err(), WorkoutError::quota_exceeded(Quota::Days, 10));
        assert_eq!(workout, before);
    }

    #[test]
    fn add_day_bumps_version() {
        let mut workout = workout_with_days(&owner(), 1, 1);
        let version = workout.version();

        let id = workout.add_day(day_draft(3), &QuotaLimits::default()).unwrap();

        assert_eq!(workout.version(), version + 1);
        assert_eq!(workout.day(id).unwrap().exercises().len(), 3);
    }

    #[test]
    fn add_day_with_twenty_one_exercises_is_rejected() {
        let mut workout = workout_with_days(&owner(), 1, 1);

        let result = workout.add_day(day_draft(21), &QuotaLimits::default());

        assert!(matches!(
            result,
            Err(WorkoutError::QuotaExceeded {
                quota: Quota::Exercises,
                ..
            })
        ));
        assert_eq!(workout.days().len(), 1);
    }

    #[test]
    fn mutating_unknown_day_is_not_found_and_keeps_version() {
        let mut workout = workout_with_days(&owner(), 1, 1);
        let version = workout.version();
        let missing = DayId::new();

        assert_eq!(
            workout.advance_rotation(missing),
            Err(WorkoutError::day_not_found(missing))
        );
        assert_eq!(workout.remove_day(missing), Err(WorkoutError::day_not_found(missing)));
        assert_eq!(workout.version(), version);
    }

    #[test]
    fn update_day_keeps_history_of_matched_exercises() {
        let mut workout = workout_with_days(&owner(), 1, 1);
        let day_id = workout.days()[0].id();
        let ex_id = workout.days()[0].exercises()[0].id();
        workout
            .log_session(day_id, ex_id, vec![10.0, 10.0, 10.0], "first".to_string())
            .unwrap();

        workout
            .update_day(
                day_id,
                "Upper".to_string(),
                vec![
                    ExerciseUpdate::update(ex_id, spec("Press", 3)),
                    ExerciseUpdate::insert(spec("Curl", 2)),
                ],
                &QuotaLimits::default(),
            )
            .unwrap();

        let day = workout.day(day_id).unwrap();
        assert_eq!(day.title(), "Upper");
        assert_eq!(day.exercise(ex_id).unwrap().title(), "Press");
        assert_eq!(day.exercise(ex_id).unwrap().record(), &["first"]);
        assert!(day.exercises()[1].record().is_empty());
    }

    #[test]
    fn log_session_wrong_arity_leaves_workout_unchanged() {
        let mut workout = workout_with_days(&owner(), 1, 2);
        let before = workout.clone();
        let day_id = workout.days()[0].id();
        let ex_id = workout.days()[0].exercises()[0].id();

        let result = workout.log_session(day_id, ex_id, vec![1.0], "".to_string());

        assert!(matches!(result, Err(WorkoutError::ValidationFailed(_))));
        assert_eq!(workout, before);
    }

    #[test]
    fn remove_exercise_in_unknown_day_is_not_found() {
        let mut workout = workout_with_days(&owner(), 1, 1);
        let missing = DayId::new();

        let result = workout.remove_exercise(missing, ExerciseId::new());

        assert_eq!(result, Err(WorkoutError::day_not_found(missing)));
    }

    #[test]
    fn owner_check_is_exposed() {
        let workout = workout_with_days(&owner(), 0, 0);
        let stranger = UserId::new("someone-else").unwrap();

        assert!(workout.check_ownership(&owner()).is_ok());
        assert!(workout.check_ownership(&stranger).is_err());
    }

    #[test]
    fn document_uses_camel_case_fields() {
        let workout = workout_with_days(&owner(), 1, 1);
        let json = serde_json::to_value(&workout).unwrap();

        assert_eq!(json["ownerId"], owner().as_str());
        assert!(json["startDate"].is_string());
        assert_eq!(json["days"][0]["exerciseIndex"], -1);

        let back: Workout = serde_json::from_value(json).unwrap();
        assert_eq!(back, workout);
    }
}
