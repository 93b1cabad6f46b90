use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gym_tracker_core::{Session, TrackerStore, Username};

mod commands;
mod config;

use commands::{ConfigCommand, ExerciseCommand, GoalCommand, MealCommand, UserCommand};
use config::Config;

#[derive(Parser)]
#[command(name = "gym")]
#[command(version)]
#[command(about = "Log workouts and meals and track your progress", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// User to act as (defaults to the last active user)
    #[arg(long, short, global = true)]
    user: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List, switch and show users
    User(UserCommand),

    /// Show or set your fitness goal
    Goal(GoalCommand),

    /// Log and review exercises
    Exercise(ExerciseCommand),

    /// Log and review meals
    Meal(MealCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Save config path for config init
    let cli_config_path = cli.config.clone();

    let config = Config::load(cli.config)?;
    tracing::debug!("Data directory: {}", config.data_dir.value.display());
    let store = TrackerStore::new(config.data_dir.value.clone());

    match &cli.command {
        Some(Commands::User(cmd)) => {
            cmd.run(&store, cli.user.as_deref(), &config)?;
        }
        Some(Commands::Goal(cmd)) => {
            let session = open_session(&store, cli.user.as_deref(), &config)?;
            cmd.run(&session)?;
        }
        Some(Commands::Exercise(cmd)) => {
            let mut session = open_session(&store, cli.user.as_deref(), &config)?;
            cmd.run(&mut session)?;
        }
        Some(Commands::Meal(cmd)) => {
            let mut session = open_session(&store, cli.user.as_deref(), &config)?;
            cmd.run(&mut session)?;
        }
        Some(Commands::Config(cmd)) => {
            cmd.run(&config, cli_config_path)?;
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}

/// Opens a session for the user given on the command line, falling back to
/// the last active user and then the configured default user.
pub(crate) fn open_session(
    store: &TrackerStore,
    cli_user: Option<&str>,
    config: &Config,
) -> Result<Session, Box<dyn std::error::Error>> {
    let username = resolve_user(store, cli_user, config)?;
    Ok(Session::open(store, username)?)
}

fn resolve_user(
    store: &TrackerStore,
    cli_user: Option<&str>,
    config: &Config,
) -> Result<Username, Box<dyn std::error::Error>> {
    if let Some(name) = cli_user {
        return Ok(Username::parse(name)?);
    }

    let last_user = store.load_last_user()?;
    if !last_user.is_empty() {
        return Ok(Username::parse(&last_user)?);
    }

    if let Some(name) = &config.default_user.value {
        return Ok(Username::parse(name)?);
    }

    Err("No user selected. Pass --user <NAME> or run 'gym user switch <NAME>'.".into())
}
