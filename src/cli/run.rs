//! Run command implementation.

use super::output::{JsonGameResult, format_text};
use super::{CliError, OutputFormat};
use fendo::replay::{Recording, ReplayEngine, render_board, render_status};
use fendo::selfplay::{SelfPlayConfig, run_game};
use std::path::PathBuf;

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the game fails to replay for display or the
/// recording cannot be saved.
pub(crate) fn execute(
    seed: Option<u64>,
    max_moves: u32,
    format: OutputFormat,
    save: Option<PathBuf>,
    quiet: bool,
) -> Result<(), CliError> {
    // Generate seed if not provided
    let seed = seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(42)
    });

    let config = SelfPlayConfig { max_moves };

    if !quiet {
        println!("Running self-play game with seed {seed}...");
        println!();
    }

    let result = run_game(seed, &config);

    // Save recording if requested
    if let Some(save_path) = save {
        let recording = Recording::from_result(&result);
        recording
            .save(&save_path)
            .map_err(|e| CliError::new(format!("Failed to save recording: {e}")))?;
        if !quiet {
            println!("Recording saved to: {}", save_path.display());
            println!();
        }
    }

    match format {
        OutputFormat::Text => {
            if !quiet {
                for (i, mv) in result.moves.iter().enumerate() {
                    println!("{:3}. {mv}", i + 1);
                }
                println!();
            }

            // Replay to the end for the final position.
            let recording = Recording::from_result(&result);
            let position = recording.moves.len();
            let engine = ReplayEngine::new_at(recording, position)?;
            println!("{}", render_board(engine.state()));
            println!("{}", render_status(engine.state()));
            print!("{}", format_text(&result));
        }
        OutputFormat::Json => {
            let json_result = JsonGameResult::from_game_result(&result);
            let json = serde_json::to_string_pretty(&json_result)
                .map_err(|e| CliError::new(format!("JSON serialization failed: {e}")))?;
            println!("{json}");
        }
    }

    Ok(())
}
