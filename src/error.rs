//! Error types for the Fendo rules engine.

use crate::game::PlayerId;
use std::fmt;

/// Errors produced when an action is rejected by the engine.
///
/// All validation happens before any mutation: a returned error guarantees
/// the game state is unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// The submitted action is not a member of the current legal-move set,
    /// or could not be parsed. Carries the offending action verbatim.
    Invalid {
        /// The action as submitted by the caller.
        action: String,
    },
    /// The game is already over; no further moves or resignations accepted.
    GameOver,
    /// The player identifier is not part of this game.
    UnknownPlayer(PlayerId),
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::Invalid { action } => write!(f, "invalid move: {action}"),
            MoveError::GameOver => write!(f, "game is already over"),
            MoveError::UnknownPlayer(p) => write!(f, "unknown player: {p}"),
        }
    }
}

impl std::error::Error for MoveError {}

/// Result type for move application and related state transitions.
pub type MoveResult<T> = Result<T, MoveError>;
