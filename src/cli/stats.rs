//! Stats command implementation: mass parallel self-play.

use super::output::{JsonStatsResult, SelfPlayStats, format_stats_csv, format_stats_text};
use super::{CliError, StatsFormat};
use fendo::selfplay::{SelfPlayConfig, run_game};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::time::Instant;

/// Execute the stats command.
///
/// # Errors
///
/// Returns an error if result serialization fails.
pub(crate) fn execute(
    games: u64,
    seed: Option<u64>,
    threads: Option<usize>,
    max_moves: u32,
    format: StatsFormat,
    progress: bool,
) -> Result<(), CliError> {
    // Set thread pool size if specified
    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    // Base seed
    let base_seed = seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    });

    let config = SelfPlayConfig { max_moves };

    // Progress bar
    let pb = if progress {
        let pb = ProgressBar::new(games);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games ({per_sec})")
                .expect("valid template")
                .progress_chars("=>-"),
        );
        Some(pb)
    } else {
        None
    };

    let start = Instant::now();

    // Run games in parallel using lock-free fold/reduce pattern.
    // Each thread accumulates into its own SelfPlayStats, merged at the end.
    let stats = (0..games)
        .into_par_iter()
        .fold(SelfPlayStats::default, |mut local_stats, i| {
            let game_seed = base_seed.wrapping_add(i);
            let result = run_game(game_seed, &config);
            local_stats.add_result(&result);
            local_stats
        })
        .reduce(SelfPlayStats::default, |mut a, b| {
            a.merge(&b);
            a
        });

    // Update progress bar after completion (no atomic overhead in hot path)
    if let Some(pb) = pb {
        pb.set_position(stats.games_played);
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();
    let games_per_sec = if duration.as_secs_f64() > 0.0 {
        stats.games_played as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    match format {
        StatsFormat::Text => {
            println!();
            print!("{}", format_stats_text(&stats));
            println!();
            println!(
                "Duration: {:.2}s ({games_per_sec:.0} games/sec)",
                duration.as_secs_f64()
            );
        }
        StatsFormat::Json => {
            let json_result = JsonStatsResult::from_stats(&stats);
            let json = serde_json::to_string_pretty(&json_result)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
        StatsFormat::Csv => {
            print!("{}", format_stats_csv(&stats));
        }
    }

    Ok(())
}
