//! Legal command implementation: query the legal-move set.

use super::CliError;
use fendo::GameState;
use fendo::replay::{render_board, render_status};

/// Execute the legal command.
///
/// Applies the given move prefix to a fresh game, then prints the
/// legal-move set for the player to move.
///
/// # Errors
///
/// Returns an error if a prefix move is rejected by the engine.
pub(crate) fn execute(moves: Vec<String>, board: bool) -> Result<(), CliError> {
    let mut state = GameState::new();
    for (i, text) in moves.iter().enumerate() {
        state
            .apply_text(text)
            .map_err(|e| CliError::new(format!("Move {} rejected: {e}", i + 1)))?;
    }

    if board {
        println!("{}", render_board(&state));
        println!("{}", render_status(&state));
    }

    let legal = state.legal_moves();
    if legal.is_empty() {
        println!("No legal moves: the game is over.");
        return Ok(());
    }

    println!(
        "Legal moves for player {} ({}):",
        state.current_player(),
        legal.len()
    );
    for mv in legal {
        println!("  {mv}");
    }

    Ok(())
}
