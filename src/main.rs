//! Chicane CLI - run and analyze dice-racing board game simulations.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

/// Chicane - a deterministic dice-racing engine
#[derive(Parser, Debug)]
#[command(name = "chicane")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a single race between AI pilots
    Run {
        /// Pilots on the grid (2-8)
        #[arg(required = true, num_args = 2..=8)]
        pilots: Vec<cli::PilotArg>,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Laps to race (default: 2)
        #[arg(short, long, default_value = "2")]
        laps: i32,

        /// Maximum turns (default: 500)
        #[arg(short, long, default_value = "500")]
        turns: u32,

        /// Starting hitpoints per car (default: 18)
        #[arg(long, default_value = "18")]
        hitpoints: i32,

        /// Track file (default: generated circuit)
        #[arg(long)]
        track: Option<std::path::PathBuf>,

        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Suppress the banner
        #[arg(short, long)]
        quiet: bool,
    },

    /// Run a championship of many races and aggregate standings
    Championship {
        /// Pilots on the grid (2-8)
        #[arg(required = true, num_args = 2..=8)]
        pilots: Vec<cli::PilotArg>,

        /// Number of races (default: 100)
        #[arg(short, long, default_value = "100")]
        races: u64,

        /// Base seed (race i uses seed + i)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Number of worker threads (default: all cores)
        #[arg(long)]
        threads: Option<usize>,

        /// Laps per race (default: 2)
        #[arg(short, long, default_value = "2")]
        laps: i32,

        /// Maximum turns per race (default: 500)
        #[arg(short, long, default_value = "500")]
        turns: u32,

        /// Track file (default: generated circuit)
        #[arg(long)]
        track: Option<std::path::PathBuf>,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::ChampionshipFormat,

        /// Show a progress bar
        #[arg(short, long)]
        progress: bool,
    },

    /// Validate a track file
    Validate {
        /// Track JSON file
        track: std::path::PathBuf,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = match args.command {
        Commands::Run {
            pilots,
            seed,
            laps,
            turns,
            hitpoints,
            track,
            format,
            quiet,
        } => cli::run::execute(pilots, seed, laps, turns, hitpoints, track, format, quiet),
        Commands::Championship {
            pilots,
            races,
            seed,
            threads,
            laps,
            turns,
            track,
            format,
            progress,
        } => cli::championship::execute(
            pilots, races, seed, threads, laps, turns, track, format, progress,
        ),
        Commands::Validate { track } => cli::validate::execute(track),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
