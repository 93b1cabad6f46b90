//! CSV export of the workout table and the diet log.

use std::io;

use crate::error::Result;
use crate::models::MealEntry;
use crate::workout::SetRow;

pub const WORKOUT_HEADER: [&str; 7] = [
    "Date",
    "Exercise",
    "Type",
    "Muscles",
    "Set",
    "Reps",
    "Weight (kg)",
];

pub const DIET_HEADER: [&str; 6] = [
    "Date",
    "Food",
    "Calories",
    "Protein (g)",
    "Carbs (g)",
    "Fats (g)",
];

/// Formats a weight in kg. Whole weights keep one decimal (`100.0`), anything
/// else is written at full precision so no logged value is rounded away.
pub fn format_weight(weight: f64) -> String {
    if weight.fract() == 0.0 {
        format!("{:.1}", weight)
    } else {
        weight.to_string()
    }
}

pub fn write_workout_csv<W: io::Write>(rows: &[SetRow], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(WORKOUT_HEADER)?;
    for row in rows {
        wtr.write_record([
            row.date.to_string(),
            row.exercise.clone(),
            row.exercise_type.to_string(),
            row.muscles.clone(),
            row.set.to_string(),
            row.reps.to_string(),
            format_weight(row.weight),
        ])?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn write_diet_csv<W: io::Write>(meals: &[MealEntry], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(DIET_HEADER)?;
    for meal in meals {
        wtr.write_record([
            meal.date.to_string(),
            meal.food.clone(),
            meal.calories.to_string(),
            meal.protein.to_string(),
            meal.carbs.to_string(),
            meal.fats.to_string(),
        ])?;
    }
    wtr.flush().map_err(csv::Error::from)?;
    Ok(())
}

pub fn workout_csv(rows: &[SetRow]) -> Result<String> {
    let mut buf = Vec::new();
    write_workout_csv(rows, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

pub fn diet_csv(meals: &[MealEntry]) -> Result<String> {
    let mut buf = Vec::new();
    write_diet_csv(meals, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
