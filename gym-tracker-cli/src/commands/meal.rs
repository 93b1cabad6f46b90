use clap::{Args, Subcommand};
use std::fs::File;
use std::io;
use std::path::PathBuf;

use gym_tracker_core::diet::meals_on;
use gym_tracker_core::export::write_diet_csv;
use gym_tracker_core::{MealEntry, Session};

use super::{parse_date, parse_date_or_today, OutputFormat};

#[derive(Args)]
pub struct MealCommand {
    #[command(subcommand)]
    pub command: MealSubcommand,
}

#[derive(Subcommand)]
pub enum MealSubcommand {
    /// Log what you ate
    Log {
        /// What did you eat?
        food: String,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,

        /// Calories (kcal)
        #[arg(long, default_value_t = 0)]
        calories: u32,

        /// Protein (g)
        #[arg(long, default_value_t = 0)]
        protein: u32,

        /// Carbs (g)
        #[arg(long, default_value_t = 0)]
        carbs: u32,

        /// Fats (g)
        #[arg(long, default_value_t = 0)]
        fats: u32,
    },

    /// Show the diet log
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Delete a meal by its number in 'gym meal list'
    Delete {
        /// Meal number (starting at 1)
        index: usize,
    },

    /// Show nutrition totals for a day
    Totals {
        /// Date (YYYY-MM-DD), defaults to the most recent day with meals
        #[arg(long, short)]
        date: Option<String>,
    },

    /// List the days with logged meals, most recent first
    Days,

    /// Export the diet log as CSV
    Export {
        /// Output file, defaults to stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

impl MealCommand {
    pub fn run(&self, session: &mut Session) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            MealSubcommand::Log {
                food,
                date,
                calories,
                protein,
                carbs,
                fats,
            } => {
                let date = parse_date_or_today(date)?;
                let meal = MealEntry::new(food.trim(), date)
                    .with_calories(*calories)
                    .with_macros(*protein, *carbs, *fats);
                session.add_meal(meal)?;

                println!("Logged meal on {}", date);
                println!("  Day so far: {}", session.day_totals(date));
                Ok(())
            }
            MealSubcommand::List { format } => {
                let meals = session.diet();
                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(meals)?);
                    }
                    OutputFormat::Csv => {
                        write_diet_csv(meals, io::stdout().lock())?;
                    }
                    OutputFormat::Text => {
                        if meals.is_empty() {
                            println!("No meals logged yet.");
                        } else {
                            for (i, meal) in meals.iter().enumerate() {
                                println!("{:>4}. {}", i + 1, meal);
                            }
                            println!("\nTotal: {} meal(s)", meals.len());
                        }
                    }
                }
                Ok(())
            }
            MealSubcommand::Delete { index } => {
                let position = meal_position(*index, session.diet().len())?;
                let removed = session.delete_meal(position)?;
                println!("Deleted meal: {}", removed);
                Ok(())
            }
            MealSubcommand::Totals { date } => {
                let date = match date {
                    Some(d) => parse_date(d)?,
                    None => match session.meal_dates().first() {
                        Some(latest) => *latest,
                        None => {
                            println!("No meals logged yet.");
                            return Ok(());
                        }
                    },
                };

                let totals = session.day_totals(date);
                println!("{}", date.format("%A, %d %B %Y"));
                println!("{}", "-".repeat(40));
                for meal in meals_on(session.diet(), date) {
                    println!("  {}", meal.food);
                }
                println!();
                println!("Total Calories: {} kcal", totals.calories);
                println!("Protein: {} g", totals.protein);
                println!("Carbs:   {} g", totals.carbs);
                println!("Fats:    {} g", totals.fats);
                Ok(())
            }
            MealSubcommand::Days => {
                let dates = session.meal_dates();
                if dates.is_empty() {
                    println!("No meals logged yet.");
                }
                for date in dates {
                    println!("{}", date);
                }
                Ok(())
            }
            MealSubcommand::Export { output } => {
                let meals = session.diet();
                match output {
                    Some(path) => {
                        let file = File::create(path)?;
                        write_diet_csv(meals, file)?;
                        println!("Exported {} meal(s) to {}", meals.len(), path.display());
                    }
                    None => write_diet_csv(meals, io::stdout().lock())?,
                }
                Ok(())
            }
        }
    }
}

/// Converts a meal number as shown by `meal list` to a log position.
fn meal_position(number: usize, len: usize) -> Result<usize, String> {
    if number == 0 {
        return Err("Meal numbers start at 1".to_string());
    }
    if number > len {
        return Err(format!(
            "Meal #{} does not exist ({} meal(s) logged)",
            number, len
        ));
    }
    Ok(number - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_position() {
        assert_eq!(meal_position(1, 3), Ok(0));
        assert_eq!(meal_position(3, 3), Ok(2));
    }

    #[test]
    fn test_meal_position_out_of_range() {
        assert!(meal_position(0, 3).unwrap_err().contains("start at 1"));
        assert!(meal_position(4, 3).unwrap_err().contains("Meal #4"));
        assert!(meal_position(1, 0).is_err());
    }
}
