//! Fendo CLI - Command-line interface for running and viewing Fendo games.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

/// Fendo - a deterministic rules engine for the fence-building territory game
#[derive(Parser, Debug)]
#[command(name = "fendo")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a single random self-play game
    Run {
        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Move cap before a game is abandoned (default: 500)
        #[arg(short, long, default_value = "500")]
        max_moves: u32,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Save recording to file
        #[arg(long)]
        save: Option<std::path::PathBuf>,

        /// Suppress the move-by-move listing
        #[arg(short, long)]
        quiet: bool,
    },

    /// View a recorded game
    Replay {
        /// Recording file (JSON)
        #[arg(required = true)]
        recording: std::path::PathBuf,

        /// Show the position after N moves (default: end of recording)
        #[arg(short, long)]
        position: Option<usize>,

        /// List the recorded moves
        #[arg(short, long)]
        list: bool,
    },

    /// Run mass parallel self-play games and aggregate statistics
    Stats {
        /// Number of games to run (default: 1000)
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Starting seed (increments for each game)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Move cap per game (default: 500)
        #[arg(short, long, default_value = "500")]
        max_moves: u32,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::StatsFormat,

        /// Show progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// Print the legal-move set after an optional move prefix
    Legal {
        /// Moves to apply first, in canonical text encoding
        #[arg(num_args = 0..)]
        moves: Vec<String>,

        /// Also print the board and status
        #[arg(short, long)]
        board: bool,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = match args.command {
        Commands::Run {
            seed,
            max_moves,
            format,
            save,
            quiet,
        } => cli::run::execute(seed, max_moves, format, save, quiet),

        Commands::Replay {
            recording,
            position,
            list,
        } => cli::replay::execute(recording, position, list),

        Commands::Stats {
            games,
            seed,
            threads,
            max_moves,
            format,
            progress,
        } => cli::stats::execute(games, seed, threads, max_moves, format, progress),

        Commands::Legal { moves, board } => cli::legal::execute(moves, board),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
