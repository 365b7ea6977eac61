//! numguess CLI - guess the secret number, optionally racing a learning AI

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "numguess")]
#[command(version, about = "Number-guessing game with a Q-learning opponent", long_about = None)]
struct Cli {
    /// Debug-level logging (RUST_LOG takes precedence)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the game (default)
    Play(numguess::cli::commands::play::PlayArgs),

    /// Train the AI opponent by self-play
    Train(numguess::cli::commands::train::TrainArgs),

    /// Show best-attempt records
    Records(numguess::cli::commands::records::RecordsArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    numguess::logging::init_logging(cli.verbose)?;

    match cli.command {
        Some(Commands::Play(args)) => numguess::cli::commands::play::execute(args),
        Some(Commands::Train(args)) => numguess::cli::commands::train::execute(args),
        Some(Commands::Records(args)) => numguess::cli::commands::records::execute(args),
        None => numguess::cli::commands::play::execute(Default::default()),
    }
}
