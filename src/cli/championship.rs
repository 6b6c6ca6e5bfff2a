//! Championship command implementation.

use super::output::ChampionshipStats;
use super::{ChampionshipFormat, CliError, PilotArg, track_file};
use chicane::PilotKind;
use chicane::race::{RaceConfig, RaceResult, generate_track, run_race, standard_plan};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::PathBuf;
use std::time::Instant;

/// Execute the championship command.
///
/// Races are independent and run in parallel; race `i` uses seed
/// `base_seed + i`, so a championship is reproducible from its base seed.
///
/// # Errors
///
/// Returns an error if the track cannot be loaded or any race fails.
#[allow(clippy::too_many_arguments)]
pub(crate) fn execute(
    pilots: Vec<PilotArg>,
    races: u64,
    seed: Option<u64>,
    threads: Option<usize>,
    laps: i32,
    turns: u32,
    track: Option<PathBuf>,
    format: ChampionshipFormat,
    progress: bool,
) -> Result<(), CliError> {
    let kinds: Vec<PilotKind> = pilots.iter().map(|pilot| pilot.kind()).collect();

    let track = match track {
        Some(path) => track_file::load_track(&path)?,
        None => generate_track(kinds.len() as u32, &standard_plan())
            .map_err(|e| CliError::new(format!("Failed to generate track: {e}")))?,
    };

    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let base_seed = seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    });

    let config = RaceConfig {
        laps,
        hitpoints: RaceConfig::default().hitpoints,
        max_turns: turns,
    };

    let bar = if progress {
        let bar = ProgressBar::new(races);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} races ({per_sec})",
                )
                .map_err(|e| CliError::new(format!("Invalid progress template: {e}")))?
                .progress_chars("=>-"),
        );
        Some(bar)
    } else {
        None
    };

    let started = Instant::now();
    let results: Result<Vec<RaceResult>, CliError> = (0..races)
        .into_par_iter()
        .map(|index| {
            let result = run_race(base_seed.wrapping_add(index), &kinds, &track, &config)
                .map_err(CliError::from);
            if let Some(bar) = &bar {
                bar.inc(1);
            }
            result
        })
        .collect();
    let results = results?;
    if let Some(bar) = &bar {
        bar.finish_and_clear();
    }

    let mut stats = ChampionshipStats::new(kinds);
    for result in &results {
        stats.record(result);
    }

    match format {
        ChampionshipFormat::Text => {
            print!("{}", stats.format_text());
            println!();
            println!(
                "Completed {races} races in {:.2}s",
                started.elapsed().as_secs_f64()
            );
        }
        ChampionshipFormat::Json => {
            let json = serde_json::to_string_pretty(&stats)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
        ChampionshipFormat::Csv => {
            print!("{}", stats.format_csv());
        }
    }

    Ok(())
}
