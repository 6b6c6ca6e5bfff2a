//! Run command implementation.

use super::output::format_text;
use super::{CliError, OutputFormat, PilotArg, track_file};
use chicane::PilotKind;
use chicane::race::{RaceConfig, generate_track, run_race, standard_plan};
use std::path::PathBuf;

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the track cannot be loaded or the race fails.
#[allow(clippy::too_many_arguments)]
pub(crate) fn execute(
    pilots: Vec<PilotArg>,
    seed: Option<u64>,
    laps: i32,
    turns: u32,
    hitpoints: i32,
    track: Option<PathBuf>,
    format: OutputFormat,
    quiet: bool,
) -> Result<(), CliError> {
    let kinds: Vec<PilotKind> = pilots.iter().map(|pilot| pilot.kind()).collect();

    let track = match track {
        Some(path) => track_file::load_track(&path)?,
        None => generate_track(kinds.len() as u32, &standard_plan())
            .map_err(|e| CliError::new(format!("Failed to generate track: {e}")))?,
    };

    // Generate seed if not provided
    let seed = seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    });

    let config = RaceConfig {
        laps,
        hitpoints,
        max_turns: turns,
    };

    if !quiet {
        println!("Running race with seed {seed}...");
        println!(
            "Grid: {}",
            kinds
                .iter()
                .map(|kind| kind.name())
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!();
    }

    let result = run_race(seed, &kinds, &track, &config)?;

    match format {
        OutputFormat::Text => {
            print!("{}", format_text(&result));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&result)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}
