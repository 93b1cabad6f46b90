use clap::{Args, Subcommand, ValueEnum};
use std::fs::File;
use std::io;
use std::path::PathBuf;

use gym_tracker_core::export::{format_weight, write_workout_csv};
use gym_tracker_core::workout::SetRow;
use gym_tracker_core::{ExerciseEntry, ExerciseType, Session, SetRecord, MUSCLE_GROUPS};

use super::{parse_date, parse_date_or_today, OutputFormat};

#[derive(Clone, ValueEnum, Default)]
pub enum ProgressFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args)]
pub struct ExerciseCommand {
    #[command(subcommand)]
    pub command: ExerciseSubcommand,
}

#[derive(Subcommand)]
pub enum ExerciseSubcommand {
    /// Log an exercise with its sets
    Log {
        /// Exercise name
        name: String,

        /// Exercise type (strength, cardio, mobility, flexibility)
        #[arg(long = "type", short = 't', value_name = "TYPE", default_value = "strength")]
        exercise_type: ExerciseType,

        /// Targeted muscle group (can be repeated)
        #[arg(long = "muscle", short = 'm', value_name = "MUSCLE")]
        muscles: Vec<String>,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,

        /// Set as REPSxWEIGHT, e.g. 5x100 or 8x62.5 (can be repeated)
        #[arg(long = "set", short = 's', value_name = "REPSxKG", value_parser = parse_set)]
        sets: Vec<SetRecord>,
    },

    /// Show the exercise log, one row per set
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Delete one set of an exercise
    Delete {
        /// Exercise name
        name: String,

        /// Date of the entry (YYYY-MM-DD)
        #[arg(long, short)]
        date: String,

        /// Set number, as shown by 'gym exercise list'
        #[arg(long = "set", short = 's')]
        set: usize,
    },

    /// Show progress and personal records for an exercise
    Progress {
        /// Exercise name, defaults to the first exercise logged
        name: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: ProgressFormat,
    },

    /// Export the exercise log as CSV
    Export {
        /// Output file, defaults to stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

impl ExerciseCommand {
    pub fn run(&self, session: &mut Session) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ExerciseSubcommand::Log {
                name,
                exercise_type,
                muscles,
                date,
                sets,
            } => {
                let date = parse_date_or_today(date)?;
                warn_unknown_muscles(muscles);

                let entry = ExerciseEntry::new(name.trim(), *exercise_type, date)
                    .with_muscles(muscles.iter().map(|m| m.trim()))
                    .with_sets(sets.clone());
                let summary = entry.to_string();
                session.add_exercise(entry)?;

                println!("Logged for {}:", session.username());
                println!();
                print!("{}", summary);
                Ok(())
            }
            ExerciseSubcommand::List { format } => {
                let rows = session.rows();
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&rows)?);
                    }
                    OutputFormat::Csv => {
                        write_workout_csv(&rows, io::stdout().lock())?;
                    }
                    OutputFormat::Text => {
                        if rows.is_empty() {
                            println!("No exercises logged yet.");
                        } else {
                            print_rows(&rows);
                        }
                    }
                }
                Ok(())
            }
            ExerciseSubcommand::Delete { name, date, set } => {
                let date = parse_date(date)?;
                let removed = session.delete_set(name, date, *set)?;
                println!(
                    "Deleted set {} of {} on {} ({})",
                    set, name, date, removed
                );
                Ok(())
            }
            ExerciseSubcommand::Progress { name, format } => {
                self.show_progress(session, name.as_deref(), format)
            }
            ExerciseSubcommand::Export { output } => {
                let rows = session.rows();
                match output {
                    Some(path) => {
                        let file = File::create(path)?;
                        write_workout_csv(&rows, file)?;
                        println!("Exported {} set(s) to {}", rows.len(), path.display());
                    }
                    None => write_workout_csv(&rows, io::stdout().lock())?,
                }
                Ok(())
            }
        }
    }

    fn show_progress(
        &self,
        session: &Session,
        name: Option<&str>,
        format: &ProgressFormat,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let names = session.exercise_names();
        let name = match name {
            Some(n) => n.to_string(),
            None => match names.first() {
                Some(first) => first.clone(),
                None => {
                    println!("No exercises logged yet.");
                    return Ok(());
                }
            },
        };

        let progress = session.progress(&name);
        let record = session
            .personal_record(&name)
            .ok_or_else(|| format!("No sets logged for '{}'", name))?;

        match format {
            ProgressFormat::Json => {
                let value = serde_json::json!({
                    "exercise": name,
                    "personal_record": record,
                    "progress": progress,
                });
                println!("{}", serde_json::to_string_pretty(&value)?);
            }
            ProgressFormat::Text => {
                println!("{} - Progress", name);
                println!("{}", "=".repeat(40));
                println!("{:<12} {:>16} {:>10}", "Date", "Max Weight (kg)", "Max Reps");
                for ((date, weight), (_, reps)) in progress.weight.iter().zip(&progress.reps) {
                    println!(
                        "{:<12} {:>16} {:>10}",
                        date.to_string(),
                        format_weight(*weight),
                        reps
                    );
                }
                println!();
                println!("PR for {}", name);
                println!("  Max Weight: {} kg", format_weight(record.max_weight));
                println!("  Max Reps:   {}", record.max_reps);

                if names.len() > 1 {
                    println!();
                    println!("Other exercises: {}", other_names(&names, &name).join(", "));
                }
            }
        }

        Ok(())
    }
}

/// Parses a set given as `REPSxWEIGHT`.
fn parse_set(s: &str) -> Result<SetRecord, String> {
    let (reps, weight) = s
        .split_once(['x', 'X', '*'])
        .ok_or_else(|| format!("Invalid set '{}'. Use REPSxWEIGHT, e.g. 5x100", s))?;

    let reps: u32 = reps
        .trim()
        .parse()
        .map_err(|_| format!("Invalid reps '{}' in set '{}'", reps.trim(), s))?;
    if reps == 0 {
        return Err(format!("Reps must be at least 1 in set '{}'", s));
    }

    let weight: f64 = weight
        .trim()
        .trim_end_matches("kg")
        .trim()
        .parse()
        .map_err(|_| format!("Invalid weight '{}' in set '{}'", weight.trim(), s))?;
    if !weight.is_finite() || weight < 0.0 {
        return Err(format!("Weight cannot be negative in set '{}'", s));
    }
    if (weight * 2.0).fract() != 0.0 {
        return Err(format!(
            "Weight must be a multiple of 0.5 kg in set '{}'",
            s
        ));
    }

    Ok(SetRecord::new(reps, weight))
}

fn warn_unknown_muscles(muscles: &[String]) {
    for muscle in muscles {
        if !MUSCLE_GROUPS
            .iter()
            .any(|known| known.eq_ignore_ascii_case(muscle.trim()))
        {
            tracing::warn!(
                "'{}' is not a standard muscle group ({})",
                muscle,
                MUSCLE_GROUPS.join(", ")
            );
        }
    }
}

fn other_names<'a>(names: &'a [String], current: &str) -> Vec<&'a str> {
    names
        .iter()
        .map(String::as_str)
        .filter(|n| *n != current)
        .collect()
}

fn print_rows(rows: &[SetRow]) {
    println!(
        "{:<12} {:<20} {:<12} {:<24} {:>4} {:>5} {:>12}",
        "Date", "Exercise", "Type", "Muscles", "Set", "Reps", "Weight (kg)"
    );
    println!("{}", "-".repeat(95));
    for row in rows {
        println!(
            "{:<12} {:<20} {:<12} {:<24} {:>4} {:>5} {:>12}",
            row.date.to_string(),
            row.exercise,
            row.exercise_type.to_string(),
            row.muscles,
            row.set,
            row.reps,
            format_weight(row.weight)
        );
    }
    println!("\nTotal: {} set(s)", rows.len());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_set() {
        assert_eq!(parse_set("5x100").unwrap(), SetRecord::new(5, 100.0));
        assert_eq!(parse_set("8X62.5").unwrap(), SetRecord::new(8, 62.5));
        assert_eq!(parse_set(" 10 x 20kg ").unwrap(), SetRecord::new(10, 20.0));
        assert_eq!(parse_set("12*0").unwrap(), SetRecord::new(12, 0.0));
    }

    #[test]
    fn test_parse_set_invalid() {
        assert!(parse_set("5").is_err());
        assert!(parse_set("0x100").is_err());
        assert!(parse_set("fivex100").is_err());
        assert!(parse_set("5x-10").is_err());
        assert!(parse_set("5xheavy").is_err());
    }

    #[test]
    fn test_parse_set_rejects_uneven_weight() {
        let err = parse_set("8x12.25").unwrap_err();
        assert!(err.contains("multiple of 0.5"));
        assert!(parse_set("8x12.75").is_err());
        assert!(parse_set("8x62.5").is_ok());
    }

    #[test]
    fn test_other_names() {
        let names = vec!["Squat".to_string(), "Bench".to_string(), "Row".to_string()];
        assert_eq!(other_names(&names, "Bench"), vec!["Squat", "Row"]);
    }
}
