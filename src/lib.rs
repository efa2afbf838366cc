// Allow unwrap in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
//! Fendo: a deterministic rules engine for the fence-building territory
//! game.
//!
//! Players manoeuvre pieces and build fences, dividing the board into
//! regions; a region holding exactly one piece is scored for that piece's
//! owner. Once no contested region remains, the player controlling the most
//! area wins.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │     CLI / Replay / Self-play        │
//! ├─────────────────────────────────────┤
//! │   GameState (move application)      │
//! ├─────────────────────────────────────┤
//! │  MoveGen · PathFinder · Regions     │
//! ├─────────────────────────────────────┤
//! │     Board · BoardGraph              │
//! └─────────────────────────────────────┘
//! ```
//!
//! The engine is synchronous and single-threaded; speculative move trials
//! run on disposable copies, never on shared state.

pub mod error;
pub mod game;
pub mod replay;
pub mod selfplay;

pub use error::{MoveError, MoveResult};

// Re-export key game types at crate root for convenience
pub use game::{Board, BoardGraph, Cell, Direction, GameState, Move, PlayerId};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crate_root_reexports() {
        let state = GameState::new();
        assert_eq!(state.current_player(), 1);
        let mv: Move = "pass".parse().expect("parseable");
        assert_eq!(mv, Move::Pass);
    }
}
