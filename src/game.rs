//! Rules core for Fendo.
//!
//! Implements the game on a mutable connectivity graph:
//! - Board geometry and piece occupancy
//! - Connectivity graph with permanently severable edges (fences)
//! - Region classification (empty / closed / open)
//! - Constrained path finding (straight or single-bend movement)
//! - Speculative legal-move generation
//! - The authoritative game state machine

mod board;
mod graph;
mod invariants;
mod movegen;
mod path;
mod regions;
mod state;

pub use board::{BOARD_SIZE, Board, CELL_COUNT, Cell, Direction, NUM_PLAYERS, PlayerId};
pub use graph::{BoardGraph, FULL_EDGE_COUNT};
pub use invariants::{InvariantViolation, assert_invariants, check_invariants};
pub use movegen::{Move, legal_moves};
pub use path::{direction_changes, find_path};
pub use regions::{Areas, Region, classify};
pub use state::{GameState, MoveRecord, PIECES_IN_HAND, Snapshot};
