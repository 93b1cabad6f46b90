//! The active user's session.
//!
//! A `Session` owns the loaded logs for one user. Every mutation follows the
//! same cycle: validate, change the in-memory log, persist the whole log.
//! Views (rows, progress, totals) are recomputed from the current log on each
//! call.
//!
//! When persisting fails the in-memory change is kept so that
//! [`Session::persist`] can retry it.

use chrono::NaiveDate;

use crate::diet;
use crate::error::{Result, TrackerError};
use crate::export;
use crate::models::{ExerciseEntry, MealEntry, NutritionTotals, SetRecord};
use crate::storage::{TrackerStore, UserRepository};
use crate::username::Username;
use crate::workout::{self, PersonalRecord, Progress, SetRow};

#[derive(Debug)]
pub struct Session {
    repo: UserRepository,
    exercises: Vec<ExerciseEntry>,
    diet: Vec<MealEntry>,
}

impl Session {
    /// Loads the user's logs and records them as the last active user. Failing
    /// to record the last user only logs a warning.
    pub fn open(store: &TrackerStore, username: Username) -> Result<Self> {
        let repo = store.user(&username);
        let (exercises, diet) = repo.load()?;
        if let Err(e) = store.save_last_user(&username) {
            tracing::warn!("Could not record last user: {}", e);
        }
        tracing::debug!("Opened session for {}", username);

        Ok(Self {
            repo,
            exercises,
            diet,
        })
    }

    pub fn username(&self) -> &Username {
        self.repo.username()
    }

    pub fn exercises(&self) -> &[ExerciseEntry] {
        &self.exercises
    }

    pub fn diet(&self) -> &[MealEntry] {
        &self.diet
    }

    /// Writes both logs to storage.
    pub fn persist(&self) -> Result<()> {
        self.repo.save(&self.exercises, &self.diet)?;
        Ok(())
    }

    /// Appends an exercise entry. The name must be non-blank and at least one
    /// set must be present.
    pub fn add_exercise(&mut self, entry: ExerciseEntry) -> Result<()> {
        if entry.name.trim().is_empty() {
            return Err(TrackerError::Validation("Exercise name is required".into()));
        }
        if entry.sets.is_empty() {
            return Err(TrackerError::Validation(
                "At least one set is required".into(),
            ));
        }

        tracing::info!(
            "Logging {} ({} set(s)) on {} for {}",
            entry.name,
            entry.sets.len(),
            entry.date,
            self.username()
        );
        self.exercises.push(entry);
        self.persist()
    }

    /// Appends a meal. The food description must be non-blank.
    pub fn add_meal(&mut self, meal: MealEntry) -> Result<()> {
        if meal.food.trim().is_empty() {
            return Err(TrackerError::Validation(
                "Please enter what you ate".into(),
            ));
        }

        tracing::info!("Logging meal on {} for {}", meal.date, self.username());
        self.diet.push(meal);
        self.persist()
    }

    /// Deletes one set. See [`workout::delete_set`] for matching rules.
    pub fn delete_set(
        &mut self,
        exercise: &str,
        date: NaiveDate,
        set_number: usize,
    ) -> Result<SetRecord> {
        let removed = workout::delete_set(&mut self.exercises, exercise, date, set_number)?;
        tracing::info!("Deleted set {} of {} on {}", set_number, exercise, date);
        self.persist()?;
        Ok(removed)
    }

    /// Deletes the meal at `index` (0-based).
    pub fn delete_meal(&mut self, index: usize) -> Result<MealEntry> {
        let removed = diet::delete_meal(&mut self.diet, index)?;
        tracing::info!("Deleted meal '{}' from {}", removed.food, removed.date);
        self.persist()?;
        Ok(removed)
    }

    pub fn goal(&self) -> Result<String> {
        Ok(self.repo.load_goal()?)
    }

    pub fn set_goal(&self, goal: &str) -> Result<()> {
        self.repo.save_goal(goal.trim())?;
        Ok(())
    }

    pub fn rows(&self) -> Vec<SetRow> {
        workout::flatten(&self.exercises)
    }

    pub fn exercise_names(&self) -> Vec<String> {
        workout::exercise_names(&self.rows())
    }

    pub fn progress(&self, exercise: &str) -> Progress {
        workout::progress_for(&self.rows(), exercise)
    }

    pub fn personal_record(&self, exercise: &str) -> Option<PersonalRecord> {
        workout::personal_record(&self.rows(), exercise)
    }

    pub fn day_totals(&self, date: NaiveDate) -> NutritionTotals {
        diet::totals_for_day(&self.diet, date)
    }

    pub fn meal_dates(&self) -> Vec<NaiveDate> {
        diet::distinct_dates(&self.diet)
    }

    pub fn workout_csv(&self) -> Result<String> {
        export::workout_csv(&self.rows())
    }

    pub fn diet_csv(&self) -> Result<String> {
        export::diet_csv(&self.diet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExerciseType;
    use std::fs;
    use tempfile::TempDir;

    fn test_store() -> (TrackerStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = TrackerStore::new(temp_dir.path().to_path_buf());
        (store, temp_dir)
    }

    fn alice() -> Username {
        Username::parse("alice").unwrap()
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn squat() -> ExerciseEntry {
        ExerciseEntry::new("Squat", ExerciseType::Strength, date(1))
            .with_sets(vec![SetRecord::new(5, 100.0), SetRecord::new(5, 105.0)])
    }

    #[test]
    fn test_open_new_user_is_empty_and_sets_last_user() {
        let (store, _temp) = test_store();
        let session = Session::open(&store, alice()).unwrap();

        assert!(session.exercises().is_empty());
        assert!(session.diet().is_empty());
        assert_eq!(store.load_last_user().unwrap(), "alice");
    }

    #[test]
    fn test_open_when_last_user_cannot_be_recorded() {
        let (store, temp) = test_store();
        store.user(&alice()).save(&[squat()], &[]).unwrap();

        // A directory in place of the last-user file makes that write fail
        fs::create_dir_all(temp.path().join("last_user")).unwrap();

        let session = Session::open(&store, alice()).unwrap();
        assert_eq!(session.exercises().len(), 1);
        assert_eq!(session.rows().len(), 2);
    }

    #[test]
    fn test_add_exercise_persists() {
        let (store, _temp) = test_store();
        let mut session = Session::open(&store, alice()).unwrap();
        session.add_exercise(squat()).unwrap();

        let reopened = Session::open(&store, alice()).unwrap();
        assert_eq!(reopened.exercises(), &[squat()]);
        assert_eq!(reopened.rows().len(), 2);
        assert!(store.list_users().unwrap().contains(&alice()));
    }

    #[test]
    fn test_add_exercise_validation() {
        let (store, _temp) = test_store();
        let mut session = Session::open(&store, alice()).unwrap();

        let unnamed = ExerciseEntry::new("  ", ExerciseType::Cardio, date(1))
            .with_sets(vec![SetRecord::new(1, 0.0)]);
        assert!(matches!(
            session.add_exercise(unnamed),
            Err(TrackerError::Validation(_))
        ));

        let no_sets = ExerciseEntry::new("Plank", ExerciseType::Mobility, date(1));
        assert!(matches!(
            session.add_exercise(no_sets),
            Err(TrackerError::Validation(_))
        ));

        assert!(session.exercises().is_empty());
        assert!(!store.user(&alice()).exists());
    }

    #[test]
    fn test_add_meal_validation_and_totals() {
        let (store, _temp) = test_store();
        let mut session = Session::open(&store, alice()).unwrap();

        assert!(matches!(
            session.add_meal(MealEntry::new("", date(1)).with_calories(100)),
            Err(TrackerError::Validation(_))
        ));

        session
            .add_meal(
                MealEntry::new("Oats", date(1))
                    .with_calories(500)
                    .with_macros(30, 50, 10),
            )
            .unwrap();
        session
            .add_meal(
                MealEntry::new("Pasta", date(1))
                    .with_calories(300)
                    .with_macros(20, 30, 5),
            )
            .unwrap();

        let totals = session.day_totals(date(1));
        assert_eq!(totals.calories, 800);
        assert_eq!(totals.protein, 50);
        assert_eq!(totals.carbs, 80);
        assert_eq!(totals.fats, 15);
        assert_eq!(session.meal_dates(), vec![date(1)]);
    }

    #[test]
    fn test_delete_last_set_removes_entry_from_storage() {
        let (store, _temp) = test_store();
        let mut session = Session::open(&store, alice()).unwrap();
        session
            .add_exercise(
                ExerciseEntry::new("Bench", ExerciseType::Strength, date(2))
                    .with_sets(vec![SetRecord::new(8, 60.0)]),
            )
            .unwrap();

        session.delete_set("Bench", date(2), 1).unwrap();

        let (exercises, _) = store.user(&alice()).load().unwrap();
        assert!(exercises.is_empty());
    }

    #[test]
    fn test_delete_meal_out_of_range_keeps_state() {
        let (store, _temp) = test_store();
        let mut session = Session::open(&store, alice()).unwrap();
        session.add_meal(MealEntry::new("Apple", date(1))).unwrap();

        assert!(matches!(
            session.delete_meal(5),
            Err(TrackerError::OutOfRange(_))
        ));
        assert_eq!(session.diet().len(), 1);

        let removed = session.delete_meal(0).unwrap();
        assert_eq!(removed.food, "Apple");
        assert!(store.user(&alice()).load_diet().unwrap().is_empty());
    }

    #[test]
    fn test_failed_persist_keeps_in_memory_state() {
        let (store, temp) = test_store();
        let mut session = Session::open(&store, alice()).unwrap();

        // Replace the user's directory with a file so writes fail
        let user_dir = temp.path().join("users").join("alice");
        fs::create_dir_all(user_dir.parent().unwrap()).unwrap();
        fs::write(&user_dir, "blocked").unwrap();

        let err = session.add_exercise(squat()).unwrap_err();
        assert!(matches!(err, TrackerError::Storage(_)));
        assert_eq!(session.exercises().len(), 1);

        fs::remove_file(&user_dir).unwrap();
        session.persist().unwrap();
        assert_eq!(store.user(&alice()).load_exercises().unwrap().len(), 1);
    }

    #[test]
    fn test_goal() {
        let (store, _temp) = test_store();
        let session = Session::open(&store, alice()).unwrap();

        assert_eq!(session.goal().unwrap(), "");
        session.set_goal("  Squat 150kg ").unwrap();
        assert_eq!(session.goal().unwrap(), "Squat 150kg");
    }

    #[test]
    fn test_views() {
        let (store, _temp) = test_store();
        let mut session = Session::open(&store, alice()).unwrap();
        session.add_exercise(squat()).unwrap();

        assert_eq!(session.exercise_names(), vec!["Squat"]);
        let pr = session.personal_record("Squat").unwrap();
        assert_eq!((pr.max_weight, pr.max_reps), (105.0, 5));
        assert_eq!(session.progress("Squat").weight, vec![(date(1), 105.0)]);
        assert!(session
            .workout_csv()
            .unwrap()
            .starts_with("Date,Exercise,Type,Muscles,Set,Reps,Weight (kg)"));
        assert!(session.diet_csv().unwrap().starts_with("Date,Food"));
    }
}
