//! Command-line front end for the Ausweg game engine.

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "aw",
    about = "Ausweg: escape rooms and timing puzzles for players and agents",
    version,
    propagate_version = true
)]
struct Cli {
    /// Engine configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory of extra scenario definitions (*.json)
    #[arg(long, global = true)]
    scenarios: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available scenarios
    Scenarios,

    /// Show details about a scenario
    Show {
        /// Scenario id
        scenario: String,
    },

    /// Play a scenario interactively
    Play {
        /// Scenario id
        scenario: String,

        /// Name recorded as the player
        #[arg(short, long, default_value = "human-player")]
        agent: String,
    },

    /// Run a file of commands against a scenario
    Run {
        /// Scenario id
        scenario: String,

        /// Script with one command per line; blank lines and `#` comments are skipped
        #[arg(short, long)]
        script: PathBuf,

        /// Print one JSON object per line instead of a transcript
        #[arg(long)]
        json: bool,

        /// Name recorded as the player
        #[arg(short, long, default_value = "script")]
        agent: String,
    },
}

fn main() {
    // Logs go to stderr so game output on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let opts = commands::Options {
        config: cli.config.as_deref(),
        scenarios: cli.scenarios.as_deref(),
    };

    let result = match &cli.command {
        Commands::Scenarios => commands::scenarios::run(&opts),
        Commands::Show { scenario } => commands::show::run(&opts, scenario),
        Commands::Play { scenario, agent } => commands::play::run(&opts, scenario, agent),
        Commands::Run {
            scenario,
            script,
            json,
            agent,
        } => commands::run::run(&opts, scenario, script, *json, agent),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
