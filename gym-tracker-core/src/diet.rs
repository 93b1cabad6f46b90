//! Diet aggregation over the flat meal log.

use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::error::{Result, TrackerError};
use crate::models::{MealEntry, NutritionTotals};

/// Sums calories and macros over every meal logged on `date`.
pub fn totals_for_day(meals: &[MealEntry], date: NaiveDate) -> NutritionTotals {
    meals_on(meals, date).fold(NutritionTotals::default(), |mut totals, meal| {
        totals += meal.totals();
        totals
    })
}

/// Meals logged on `date`, in log order.
pub fn meals_on(meals: &[MealEntry], date: NaiveDate) -> impl Iterator<Item = &MealEntry> {
    meals.iter().filter(move |m| m.date == date)
}

/// Every date with at least one meal, most recent first.
pub fn distinct_dates(meals: &[MealEntry]) -> Vec<NaiveDate> {
    let dates: BTreeSet<NaiveDate> = meals.iter().map(|m| m.date).collect();
    dates.into_iter().rev().collect()
}

/// Removes the meal at `index` (0-based). An index past the end is an error
/// and leaves the log untouched.
pub fn delete_meal(meals: &mut Vec<MealEntry>, index: usize) -> Result<MealEntry> {
    if index >= meals.len() {
        return Err(TrackerError::OutOfRange(format!(
            "No meal at index {} ({} meal(s) logged)",
            index,
            meals.len()
        )));
    }
    Ok(meals.remove(index))
}
