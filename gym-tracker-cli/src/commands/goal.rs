use clap::{Args, Subcommand};

use gym_tracker_core::Session;

#[derive(Args)]
pub struct GoalCommand {
    #[command(subcommand)]
    pub command: GoalSubcommand,
}

#[derive(Subcommand)]
pub enum GoalSubcommand {
    /// Show your current goal
    Show,

    /// Set your fitness goal, replacing the previous one
    Set {
        /// The goal, e.g. "Squat 150kg by summer"
        #[arg(required = true, num_args = 1..)]
        goal: Vec<String>,
    },
}

impl GoalCommand {
    pub fn run(&self, session: &Session) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            GoalSubcommand::Show => {
                let goal = session.goal()?;
                if goal.is_empty() {
                    println!("No goal set. Use 'gym goal set <GOAL>' to set one.");
                } else {
                    println!("Your current goal: {}", goal);
                }
                Ok(())
            }
            GoalSubcommand::Set { goal } => {
                session.set_goal(&goal.join(" "))?;
                println!("Goal saved!");
                Ok(())
            }
        }
    }
}
