//! CLI command implementations for Chicane.

pub(crate) mod championship;
pub(crate) mod run;
pub(crate) mod track_file;
pub(crate) mod validate;

mod output;

use chicane::PilotKind;
use chicane::race::RaceError;
use clap::ValueEnum;
use std::fmt;

/// Pilot strategy selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum PilotArg {
    /// Full heuristic pipeline.
    Heuristic,
    /// Conservative low-gear baseline.
    Steady,
}

impl PilotArg {
    /// Map to the engine's strategy kind.
    pub(crate) fn kind(self) -> PilotKind {
        match self {
            PilotArg::Heuristic => PilotKind::Heuristic,
            PilotArg::Steady => PilotKind::Steady,
        }
    }
}

/// Output format for the `run` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Output format for the `championship` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ChampionshipFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
    /// CSV format.
    Csv,
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error with the given message.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<RaceError> for CliError {
    fn from(err: RaceError) -> Self {
        Self::new(err.to_string())
    }
}
