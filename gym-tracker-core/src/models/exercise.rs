use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::exercise_type::ExerciseType;

/// Muscle groups offered as choices when logging an exercise.
pub const MUSCLE_GROUPS: [&str; 7] = [
    "Chest",
    "Back",
    "Legs",
    "Arms",
    "Shoulders",
    "Core",
    "Full Body",
];

/// One set within an exercise entry. Weight is in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SetRecord {
    pub reps: u32,
    pub weight: f64,
}

impl SetRecord {
    pub fn new(reps: u32, weight: f64) -> Self {
        Self { reps, weight }
    }
}

impl fmt::Display for SetRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {} kg", self.reps, self.weight)
    }
}

/// A logged exercise session and its sets.
///
/// An entry without sets is never persisted: removing the last set removes
/// the entry (see [`crate::workout::delete_set`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub exercise_type: ExerciseType,
    #[serde(default)]
    pub muscles: BTreeSet<String>,
    pub date: NaiveDate,
    pub sets: Vec<SetRecord>,
}

impl ExerciseEntry {
    pub fn new(name: impl Into<String>, exercise_type: ExerciseType, date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            exercise_type,
            muscles: BTreeSet::new(),
            date,
            sets: Vec::new(),
        }
    }

    pub fn with_muscles<I, S>(mut self, muscles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.muscles = muscles.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_sets(mut self, sets: Vec<SetRecord>) -> Self {
        self.sets = sets;
        self
    }

    /// Muscles joined for display and export, e.g. `"Back, Legs"`.
    pub fn muscles_label(&self) -> String {
        join_muscles(&self.muscles)
    }
}

pub(crate) fn join_muscles(muscles: &BTreeSet<String>) -> String {
    muscles
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for ExerciseEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({}) - {}", self.name, self.exercise_type, self.date)?;
        if !self.muscles.is_empty() {
            writeln!(f, "Muscles: {}", self.muscles_label())?;
        }
        for (i, set) in self.sets.iter().enumerate() {
            writeln!(f, "  Set {}: {}", i + 1, set)?;
        }
        Ok(())
    }
}
