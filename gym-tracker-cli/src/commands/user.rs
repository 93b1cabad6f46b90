use chrono::Local;
use clap::{Args, Subcommand};

use gym_tracker_core::{TrackerStore, Username};

use crate::config::Config;

#[derive(Args)]
pub struct UserCommand {
    #[command(subcommand)]
    pub command: UserSubcommand,
}

#[derive(Subcommand)]
pub enum UserSubcommand {
    /// List known users
    List,

    /// Make a user the active one (new users are created on first log)
    Switch {
        /// Username (letters, digits, '-' or '_')
        name: String,
    },

    /// Show the active user's profile
    Show,
}

impl UserCommand {
    pub fn run(
        &self,
        store: &TrackerStore,
        cli_user: Option<&str>,
        config: &Config,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            UserSubcommand::List => {
                let users = store.list_users()?;
                let last_user = store.load_last_user()?;

                if users.is_empty() {
                    println!("No users yet. Use 'gym user switch <NAME>' to create one.");
                    return Ok(());
                }

                for user in &users {
                    let marker = if user.as_str() == last_user { "*" } else { " " };
                    println!("{} {}", marker, user);
                }
                Ok(())
            }
            UserSubcommand::Switch { name } => {
                let username = Username::parse(name)?;
                let known = store.user(&username).exists();
                store.save_last_user(&username)?;

                if known {
                    println!("Switched to {}", username);
                } else {
                    println!("Switched to new user {}", username);
                }
                Ok(())
            }
            UserSubcommand::Show => {
                let session = crate::open_session(store, cli_user, config)?;
                let goal = session.goal()?;

                println!("Profile");
                println!("=======");
                println!();
                println!("Welcome, {}!", session.username());
                println!("Today is {}", Local::now().format("%A, %d %B %Y"));
                println!();
                if goal.is_empty() {
                    println!("Goal: (not set)");
                } else {
                    println!("Goal: {}", goal);
                }
                println!(
                    "Logged: {} exercise(s), {} set(s), {} meal(s)",
                    session.exercises().len(),
                    session.rows().len(),
                    session.diet().len()
                );
                Ok(())
            }
        }
    }
}
