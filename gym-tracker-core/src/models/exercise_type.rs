use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseType {
    Strength,
    Cardio,
    Mobility,
    Flexibility,
}

impl ExerciseType {
    pub const ALL: [ExerciseType; 4] = [
        ExerciseType::Strength,
        ExerciseType::Cardio,
        ExerciseType::Mobility,
        ExerciseType::Flexibility,
    ];

    /// The lowercase name used on the command line and in stored logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseType::Strength => "strength",
            ExerciseType::Cardio => "cardio",
            ExerciseType::Mobility => "mobility",
            ExerciseType::Flexibility => "flexibility",
        }
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExerciseType::Strength => write!(f, "Strength"),
            ExerciseType::Cardio => write!(f, "Cardio"),
            ExerciseType::Mobility => write!(f, "Mobility"),
            ExerciseType::Flexibility => write!(f, "Flexibility"),
        }
    }
}

impl FromStr for ExerciseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| {
                let valid: Vec<&str> = Self::ALL.iter().map(ExerciseType::as_str).collect();
                format!(
                    "Invalid exercise type '{}'. Valid options: {}",
                    s,
                    valid.join(", ")
                )
            })
    }
}
