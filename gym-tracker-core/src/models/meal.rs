use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::AddAssign;

/// A meal as it was eaten. Macronutrients are in grams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealEntry {
    pub food: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub calories: u32,
    #[serde(default)]
    pub protein: u32,
    #[serde(default)]
    pub carbs: u32,
    #[serde(default)]
    pub fats: u32,
}

impl MealEntry {
    pub fn new(food: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            food: food.into(),
            date,
            calories: 0,
            protein: 0,
            carbs: 0,
            fats: 0,
        }
    }

    pub fn with_calories(mut self, calories: u32) -> Self {
        self.calories = calories;
        self
    }

    pub fn with_macros(mut self, protein: u32, carbs: u32, fats: u32) -> Self {
        self.protein = protein;
        self.carbs = carbs;
        self.fats = fats;
        self
    }

    /// The nutrition of this meal on its own.
    pub fn totals(&self) -> NutritionTotals {
        NutritionTotals {
            calories: u64::from(self.calories),
            protein: u64::from(self.protein),
            carbs: u64::from(self.carbs),
            fats: u64::from(self.fats),
        }
    }
}

impl fmt::Display for MealEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} ({})", self.date, self.food, self.totals())
    }
}

/// Summed nutrition over a set of meals. Fields are wider than a single
/// meal's so a day's totals cannot overflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NutritionTotals {
    pub calories: u64,
    pub protein: u64,
    pub carbs: u64,
    pub fats: u64,
}

impl AddAssign for NutritionTotals {
    fn add_assign(&mut self, rhs: Self) {
        self.calories += rhs.calories;
        self.protein += rhs.protein;
        self.carbs += rhs.carbs;
        self.fats += rhs.fats;
    }
}

impl fmt::Display for NutritionTotals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Calories: {} kcal | Protein: {}g | Carbs: {}g | Fats: {}g",
            self.calories, self.protein, self.carbs, self.fats
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_meal_entry_new_defaults_to_zero() {
        let meal = MealEntry::new("Oats", date());
        assert_eq!(meal.food, "Oats");
        assert_eq!(meal.totals(), NutritionTotals::default());
    }

    #[test]
    fn test_meal_entry_builders() {
        let meal = MealEntry::new("Chicken and rice", date())
            .with_calories(650)
            .with_macros(45, 70, 12);
        assert_eq!(meal.calories, 650);
        assert_eq!(meal.protein, 45);
        assert_eq!(meal.carbs, 70);
        assert_eq!(meal.fats, 12);
    }

    #[test]
    fn test_totals_add_assign() {
        let mut totals = NutritionTotals::default();
        totals += MealEntry::new("a", date()).with_calories(100).totals();
        totals += MealEntry::new("b", date())
            .with_calories(50)
            .with_macros(1, 2, 3)
            .totals();
        assert_eq!(
            totals,
            NutritionTotals {
                calories: 150,
                protein: 1,
                carbs: 2,
                fats: 3
            }
        );
    }

    #[test]
    fn test_totals_sum_past_u32_max() {
        let mut totals = NutritionTotals::default();
        totals += MealEntry::new("a", date()).with_calories(u32::MAX).totals();
        totals += MealEntry::new("b", date()).with_calories(1).totals();
        assert_eq!(totals.calories, u64::from(u32::MAX) + 1);
    }

    #[test]
    fn test_totals_display() {
        let totals = NutritionTotals {
            calories: 800,
            protein: 50,
            carbs: 80,
            fats: 15,
        };
        assert_eq!(
            format!("{}", totals),
            "Calories: 800 kcal | Protein: 50g | Carbs: 80g | Fats: 15g"
        );
    }

    #[test]
    fn test_missing_macros_deserialize_as_zero() {
        let meal: MealEntry =
            serde_json::from_str(r#"{"food":"Apple","date":"2024-01-02","calories":95}"#).unwrap();
        assert_eq!(meal.calories, 95);
        assert_eq!(meal.protein, 0);
    }
}
