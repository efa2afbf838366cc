//! Game replay and viewing.
//!
//! Because the engine is deterministic, replay requires only the ordered
//! move list: to view position N, re-apply moves 0..N from the setup
//! position.
//!
//! # Time travel
//!
//! - **Forward**: apply the next recorded move
//! - **Backward**: re-apply from the start to `position - 1`
//! - **Jump to position N**: re-apply from the start to N

mod render;

pub use render::{render_board, render_status};

use crate::error::MoveError;
use crate::game::GameState;
use crate::selfplay::GameResult;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// Minimal recording: the move list, plus the seed that produced it for
/// provenance (absent for recordings of human games).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recording {
    /// Seed of the self-play game this was recorded from, if any.
    pub seed: Option<u64>,
    /// Applied moves in canonical text encoding, in order.
    pub moves: Vec<String>,
}

impl Recording {
    /// Create a recording from a move list.
    #[must_use]
    pub fn new(moves: Vec<String>) -> Self {
        Self { seed: None, moves }
    }

    /// Create a recording from a finished self-play game.
    #[must_use]
    pub fn from_result(result: &GameResult) -> Self {
        Self {
            seed: Some(result.seed),
            moves: result.moves.clone(),
        }
    }

    /// Save the recording to a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file I/O fails.
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(path, json)
    }

    /// Load a recording from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if file I/O fails or the JSON is malformed.
    pub fn load(path: &Path) -> io::Result<Self> {
        let json = fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

/// Error type for replay operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    /// A recorded move was rejected by the engine.
    InvalidMove {
        /// Index of the offending move (0-based).
        index: usize,
        /// The engine's rejection.
        error: MoveError,
    },
    /// Position out of bounds for this recording.
    OutOfBounds {
        /// Requested position.
        requested: usize,
        /// Number of recorded moves.
        max: usize,
    },
}

impl std::fmt::Display for ReplayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMove { index, error } => {
                write!(f, "Recorded move {index} rejected: {error}")
            }
            Self::OutOfBounds { requested, max } => {
                write!(f, "Position {requested} out of bounds (max: {max})")
            }
        }
    }
}

impl std::error::Error for ReplayError {}

/// Replay engine - steps through a recorded game deterministically.
#[derive(Debug, Clone)]
pub struct ReplayEngine {
    /// The recording being replayed.
    recording: Recording,
    /// Game state at the current position.
    state: GameState,
    /// Number of applied moves.
    position: usize,
}

impl ReplayEngine {
    /// Create a new replay engine at the setup position.
    #[must_use]
    pub fn new(recording: Recording) -> Self {
        Self {
            recording,
            state: GameState::new(),
            position: 0,
        }
    }

    /// Create a new replay engine at a specific position.
    ///
    /// # Errors
    ///
    /// Returns an error if the position is out of bounds or a recorded move
    /// is rejected on the way there.
    pub fn new_at(recording: Recording, position: usize) -> Result<Self, ReplayError> {
        let mut engine = Self::new(recording);
        engine.goto(position)?;
        Ok(engine)
    }

    /// The recording.
    #[must_use]
    pub const fn recording(&self) -> &Recording {
        &self.recording
    }

    /// The game state at the current position.
    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// Number of applied moves.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Whether the current position is the end of the recording.
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.position == self.recording.moves.len()
    }

    /// Step forward one move.
    ///
    /// # Errors
    ///
    /// Returns an error at the end of the recording, or when the recorded
    /// move is rejected by the engine.
    pub fn step_forward(&mut self) -> Result<(), ReplayError> {
        let Some(text) = self.recording.moves.get(self.position) else {
            return Err(ReplayError::OutOfBounds {
                requested: self.position + 1,
                max: self.recording.moves.len(),
            });
        };
        self.state
            .apply_text(text)
            .map_err(|error| ReplayError::InvalidMove {
                index: self.position,
                error,
            })?;
        self.position += 1;
        Ok(())
    }

    /// Step backward one move by re-applying from the start.
    ///
    /// # Errors
    ///
    /// Returns an error when already at the setup position.
    pub fn step_backward(&mut self) -> Result<(), ReplayError> {
        if self.position == 0 {
            return Err(ReplayError::OutOfBounds {
                requested: 0,
                max: self.recording.moves.len(),
            });
        }
        let target = self.position - 1;
        self.goto(target)
    }

    /// Jump to a specific position by re-applying from the start.
    ///
    /// # Errors
    ///
    /// Returns an error if the position is out of bounds or a recorded move
    /// is rejected on the way there.
    pub fn goto(&mut self, position: usize) -> Result<(), ReplayError> {
        if position > self.recording.moves.len() {
            return Err(ReplayError::OutOfBounds {
                requested: position,
                max: self.recording.moves.len(),
            });
        }
        self.state = GameState::new();
        self.position = 0;
        while self.position < position {
            self.step_forward()?;
        }
        Ok(())
    }

    /// Render the current position as a plain-text board.
    #[must_use]
    pub fn render_board(&self) -> String {
        render_board(&self.state)
    }

    /// Render hands, scores and outcome for the current position.
    #[must_use]
    pub fn render_status(&self) -> String {
        render_status(&self.state)
    }
}
