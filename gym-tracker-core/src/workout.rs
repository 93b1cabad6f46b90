//! Workout aggregation: the row-per-set table, progress series and personal
//! records.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::{Result, TrackerError};
use crate::models::exercise::join_muscles;
use crate::models::{ExerciseEntry, ExerciseType, SetRecord};

/// One set of one exercise entry, flattened for tabular display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SetRow {
    pub date: NaiveDate,
    pub exercise: String,
    #[serde(rename = "type")]
    pub exercise_type: ExerciseType,
    pub muscles: String,
    /// 1-based position within the entry
    pub set: usize,
    pub reps: u32,
    pub weight: f64,
}

/// Best weight and reps per day for one exercise, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Progress {
    pub weight: Vec<(NaiveDate, f64)>,
    pub reps: Vec<(NaiveDate, u32)>,
}

impl Progress {
    pub fn is_empty(&self) -> bool {
        self.weight.is_empty()
    }
}

/// All-time best weight and reps for one exercise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PersonalRecord {
    pub max_weight: f64,
    pub max_reps: u32,
}

/// Flattens entries into one row per set, keeping entry order then set order.
pub fn flatten(exercises: &[ExerciseEntry]) -> Vec<SetRow> {
    exercises
        .iter()
        .flat_map(|entry| {
            let muscles = join_muscles(&entry.muscles);
            entry.sets.iter().enumerate().map(move |(i, set)| SetRow {
                date: entry.date,
                exercise: entry.name.clone(),
                exercise_type: entry.exercise_type,
                muscles: muscles.clone(),
                set: i + 1,
                reps: set.reps,
                weight: set.weight,
            })
        })
        .collect()
}

/// Distinct exercise names in order of first appearance.
pub fn exercise_names(rows: &[SetRow]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for row in rows {
        if !names.contains(&row.exercise) {
            names.push(row.exercise.clone());
        }
    }
    names
}

/// Per-date maximum weight and maximum reps for `exercise`.
pub fn progress_for(rows: &[SetRow], exercise: &str) -> Progress {
    let mut by_date: BTreeMap<NaiveDate, (f64, u32)> = BTreeMap::new();
    for row in rows.iter().filter(|r| r.exercise == exercise) {
        by_date
            .entry(row.date)
            .and_modify(|(weight, reps)| {
                *weight = weight.max(row.weight);
                *reps = (*reps).max(row.reps);
            })
            .or_insert((row.weight, row.reps));
    }

    Progress {
        weight: by_date.iter().map(|(d, (w, _))| (*d, *w)).collect(),
        reps: by_date.iter().map(|(d, (_, r))| (*d, *r)).collect(),
    }
}

/// All-time maximum weight and reps for `exercise`, independent of date.
///
/// Returns `None` if the exercise has never been logged.
pub fn personal_record(rows: &[SetRow], exercise: &str) -> Option<PersonalRecord> {
    rows.iter()
        .filter(|r| r.exercise == exercise)
        .fold(None, |best, row| {
            Some(match best {
                None => PersonalRecord {
                    max_weight: row.weight,
                    max_reps: row.reps,
                },
                Some(pr) => PersonalRecord {
                    max_weight: pr.max_weight.max(row.weight),
                    max_reps: pr.max_reps.max(row.reps),
                },
            })
        })
}

/// Removes set `set_number` (1-based) from the first entry matching
/// `exercise` on `date`, dropping the entry once it has no sets left.
///
/// Only the first matching entry in log order is considered, even when
/// several entries share the same exercise and date. On error the log is
/// left untouched.
pub fn delete_set(
    exercises: &mut Vec<ExerciseEntry>,
    exercise: &str,
    date: NaiveDate,
    set_number: usize,
) -> Result<SetRecord> {
    let entry_index = exercises
        .iter()
        .position(|e| e.name == exercise && e.date == date)
        .ok_or_else(|| {
            TrackerError::OutOfRange(format!("No '{}' entry logged on {}", exercise, date))
        })?;

    let entry = &mut exercises[entry_index];
    if set_number == 0 || set_number > entry.sets.len() {
        return Err(TrackerError::OutOfRange(format!(
            "Set {} does not exist for '{}' on {} ({} set(s) logged)",
            set_number,
            exercise,
            date,
            entry.sets.len()
        )));
    }

    let removed = entry.sets.remove(set_number - 1);
    if entry.sets.is_empty() {
        exercises.remove(entry_index);
    }

    Ok(removed)
}
