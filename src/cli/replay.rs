//! Replay command implementation.

use super::CliError;
use fendo::replay::{Recording, ReplayEngine};
use std::path::PathBuf;

/// Execute the replay command.
///
/// # Errors
///
/// Returns an error if the recording cannot be loaded or contains an
/// illegal move.
pub(crate) fn execute(
    recording: PathBuf,
    position: Option<usize>,
    list: bool,
) -> Result<(), CliError> {
    let recording = Recording::load(&recording)
        .map_err(|e| CliError::new(format!("Failed to load recording: {e}")))?;

    if list {
        for (i, mv) in recording.moves.iter().enumerate() {
            println!("{:3}. {mv}", i + 1);
        }
        println!();
    }

    let target = position.unwrap_or(recording.moves.len());
    let engine = ReplayEngine::new_at(recording, target)?;

    println!(
        "Position {}/{}",
        engine.position(),
        engine.recording().moves.len()
    );
    if let Some(seed) = engine.recording().seed {
        println!("Seed: {seed}");
    }
    println!();
    println!("{}", engine.render_board());
    println!("{}", engine.render_status());

    Ok(())
}
