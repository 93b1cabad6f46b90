mod config_cmd;
mod exercise;
mod goal;
mod meal;
mod user;

pub use config_cmd::ConfigCommand;
pub use exercise::ExerciseCommand;
pub use goal::GoalCommand;
pub use meal::MealCommand;
pub use user::UserCommand;

use chrono::{Local, NaiveDate};
use clap::ValueEnum;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

/// Parses an optional YYYY-MM-DD date, defaulting to today.
pub(crate) fn parse_date_or_today(date: &Option<String>) -> Result<NaiveDate, String> {
    match date {
        Some(d) => parse_date(d),
        None => Ok(Local::now().date_naive()),
    }
}

pub(crate) fn parse_date(date: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| format!("Invalid date format '{}'. Use YYYY-MM-DD.", date))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-01-31").unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
        );
    }

    #[test]
    fn test_parse_date_invalid() {
        let err = parse_date("31/01/2024").unwrap_err();
        assert!(err.contains("Use YYYY-MM-DD"));
    }

    #[test]
    fn test_parse_date_or_today_defaults() {
        assert_eq!(
            parse_date_or_today(&None).unwrap(),
            Local::now().date_naive()
        );
    }
}
