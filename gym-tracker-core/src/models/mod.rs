pub(crate) mod exercise;
mod exercise_type;
mod meal;

pub use exercise::{ExerciseEntry, SetRecord, MUSCLE_GROUPS};
pub use exercise_type::ExerciseType;
pub use meal::{MealEntry, NutritionTotals};
