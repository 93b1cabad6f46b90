//! Gym Tracker Core Library
//!
//! Workout and diet logs for a single local user: models, per-user file
//! storage, aggregation and CSV export.

pub mod diet;
pub mod error;
pub mod export;
pub mod models;
pub mod session;
pub mod storage;
pub mod username;
pub mod workout;

pub use error::{StorageError, TrackerError};
pub use models::{
    ExerciseEntry, ExerciseType, MealEntry, NutritionTotals, SetRecord, MUSCLE_GROUPS,
};
pub use session::Session;
pub use storage::{TrackerStore, UserRepository};
pub use username::{Username, UsernameError};
pub use workout::{PersonalRecord, Progress, SetRow};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
