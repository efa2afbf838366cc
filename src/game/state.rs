//! Game state management: move application, scoring, end of game.

use crate::error::{MoveError, MoveResult};
use crate::game::movegen::{Move, legal_moves};
use crate::game::path::find_path;
use crate::game::regions::classify;
use crate::game::{Board, BoardGraph, Cell, NUM_PLAYERS, PlayerId};
use serde::{Deserialize, Serialize};

/// Pieces each player holds in hand at setup (one more starts on the board).
pub const PIECES_IN_HAND: u8 = 7;

/// One entry of a move's result trail.
///
/// A closed set so that history rendering and logging collaborators can
/// match exhaustively. A single accepted action may produce several records
/// (one `Moved` per path step, then a `Fenced`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveRecord {
    /// A piece entered from hand.
    Placed {
        /// Cell the piece entered on.
        cell: Cell,
    },
    /// One step of a piece relocation.
    Moved {
        /// Step start.
        from: Cell,
        /// Step end.
        to: Cell,
    },
    /// An edge was permanently severed.
    Fenced {
        /// The two cells the fence separates.
        between: (Cell, Cell),
    },
    /// The turn passed with no board change.
    Passed,
    /// The game ended.
    Ended,
    /// The final winner set.
    Winners {
        /// Winning players (more than one on a tie).
        players: Vec<PlayerId>,
    },
    /// A player resigned.
    Resigned {
        /// The resigning player.
        player: PlayerId,
    },
}

/// A serializable view of one position in the game history.
///
/// This is the shape the excluded serialization collaborator persists; the
/// authoritative connectivity graph is derived data and is rebuilt from the
/// fence list on restore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Player to move.
    pub current_player: PlayerId,
    /// Occupied cells and their occupants, row-major order.
    pub board: Vec<(Cell, PlayerId)>,
    /// Pieces in hand per player.
    pub hands: [u8; NUM_PLAYERS],
    /// Severed edges, in placement order.
    pub fences: Vec<(Cell, Cell)>,
    /// The action that produced this position, canonical text.
    pub last_move: Option<String>,
    /// Result trail of that action.
    pub records: Vec<MoveRecord>,
}

/// The authoritative game state machine.
///
/// Owns the board, the connectivity graph, per-player hands and the
/// append-only history stack. All mutation goes through [`GameState::apply`]
/// (validate-then-commit: a rejected action leaves no trace) or
/// [`GameState::resign`]. The engine is single-threaded; callers sharing an
/// instance across threads must serialize access themselves.
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    graph: BoardGraph,
    hands: [u8; NUM_PLAYERS],
    fences: Vec<(Cell, Cell)>,
    current_player: PlayerId,
    last_move: Option<Move>,
    game_over: bool,
    winners: Vec<PlayerId>,
    records: Vec<MoveRecord>,
    stack: Vec<Snapshot>,
}

impl GameState {
    /// Create a fresh game: full connectivity, seed pieces on `a4` and `g4`,
    /// seven pieces in hand per player, player 1 to move.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Board::new();
        board.set(Cell::new(0, 3), 1);
        board.set(Cell::new(6, 3), 2);

        let mut state = Self {
            board,
            graph: BoardGraph::new(),
            hands: [PIECES_IN_HAND; NUM_PLAYERS],
            fences: Vec::new(),
            current_player: 1,
            last_move: None,
            game_over: false,
            winners: Vec::new(),
            records: Vec::new(),
            stack: Vec::new(),
        };
        state.stack.push(state.build_snapshot());
        state
    }

    /// The current board occupancy.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// The current connectivity graph.
    #[must_use]
    pub const fn graph(&self) -> &BoardGraph {
        &self.graph
    }

    /// Severed edges in placement order.
    #[must_use]
    pub fn fences(&self) -> &[(Cell, Cell)] {
        &self.fences
    }

    /// Pieces in hand for a player (0 for unknown players).
    #[must_use]
    pub fn hand(&self, player: PlayerId) -> u8 {
        if player == 0 || player as usize > NUM_PLAYERS {
            return 0;
        }
        self.hands[usize::from(player) - 1]
    }

    /// The player to move.
    #[must_use]
    pub const fn current_player(&self) -> PlayerId {
        self.current_player
    }

    /// Whether the game has ended.
    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// The winner set (empty while the game is in progress).
    #[must_use]
    pub fn winners(&self) -> &[PlayerId] {
        &self.winners
    }

    /// The most recently applied action.
    #[must_use]
    pub const fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    /// Result trail of the most recently applied action.
    #[must_use]
    pub fn records(&self) -> &[MoveRecord] {
        &self.records
    }

    /// The full history stack, oldest first. The first entry is the setup
    /// position; one entry is appended per accepted action.
    #[must_use]
    pub fn history(&self) -> &[Snapshot] {
        &self.stack
    }

    /// A serializable view of the current position.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.build_snapshot()
    }

    /// Legal actions for the player to move.
    #[must_use]
    pub fn legal_moves(&self) -> Vec<Move> {
        legal_moves(self, self.current_player)
    }

    /// Legal actions for an arbitrary player in the current position.
    #[must_use]
    pub fn legal_moves_for(&self, player: PlayerId) -> Vec<Move> {
        legal_moves(self, player)
    }

    /// Scores for both players: the summed sizes of the closed regions each
    /// one owns.
    #[must_use]
    pub fn scores(&self) -> [u32; NUM_PLAYERS] {
        let mut scores = [0u32; NUM_PLAYERS];
        let areas = classify(&self.graph, &self.board);
        for region in &areas.closed {
            if let Some(owner) = region.sole_occupant(&self.board)
                && owner >= 1
                && usize::from(owner) <= NUM_PLAYERS
            {
                scores[usize::from(owner) - 1] += region.size() as u32;
            }
        }
        scores
    }

    /// Score for one player.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::UnknownPlayer`] for identifiers outside the
    /// game.
    pub fn score(&self, player: PlayerId) -> MoveResult<u32> {
        if player == 0 || usize::from(player) > NUM_PLAYERS {
            return Err(MoveError::UnknownPlayer(player));
        }
        Ok(self.scores()[usize::from(player) - 1])
    }

    /// Apply an accepted action for the player to move.
    ///
    /// The action is validated against the current legal-move set before
    /// any mutation; on rejection the state is untouched. On success the
    /// turn advances, the end-of-game check runs and a snapshot is pushed
    /// onto the history stack.
    ///
    /// # Errors
    ///
    /// [`MoveError::GameOver`] after the game has ended,
    /// [`MoveError::Invalid`] when the action is not currently legal.
    pub fn apply(&mut self, mv: Move) -> MoveResult<()> {
        if self.game_over {
            return Err(MoveError::GameOver);
        }
        if !self.legal_moves().contains(&mv) {
            return Err(MoveError::Invalid {
                action: mv.to_string(),
            });
        }

        let mut records = Vec::new();
        match mv {
            Move::Pass => {
                records.push(MoveRecord::Passed);
            }
            Move::Place(cell) => {
                self.board.set(cell, self.current_player);
                self.hands[usize::from(self.current_player) - 1] -= 1;
                records.push(MoveRecord::Placed { cell });
            }
            Move::MoveFence { from, to, fence } => {
                // Legality guarantees the fenced neighbour is on the board;
                // checked here before any mutation all the same.
                let Some(other) = to.step(fence) else {
                    return Err(MoveError::Invalid {
                        action: mv.to_string(),
                    });
                };
                if let Some(path) = find_path(&self.graph, &self.board, from, to) {
                    for pair in path.windows(2) {
                        records.push(MoveRecord::Moved {
                            from: pair[0],
                            to: pair[1],
                        });
                    }
                }
                self.board.clear(from);
                self.board.set(to, self.current_player);
                self.fences.push((to, other));
                self.graph.sever_edge(to, other);
                records.push(MoveRecord::Fenced { between: (to, other) });
            }
        }
        self.records = records;

        self.last_move = Some(mv);
        self.current_player = self.current_player % (NUM_PLAYERS as PlayerId) + 1;

        self.check_end_of_game(mv);
        self.stack.push(self.build_snapshot());
        Ok(())
    }

    /// Parse and apply an action in its canonical text encoding.
    ///
    /// # Errors
    ///
    /// As [`GameState::apply`]; unparseable text is reported as
    /// [`MoveError::Invalid`] with the text verbatim.
    pub fn apply_text(&mut self, text: &str) -> MoveResult<()> {
        let mv: Move = text.parse()?;
        self.apply(mv)
    }

    /// Resign on behalf of `player`, ending the game immediately with the
    /// opponent(s) as winners. Bypasses move legality.
    ///
    /// # Errors
    ///
    /// [`MoveError::GameOver`] after the game has ended,
    /// [`MoveError::UnknownPlayer`] for identifiers outside the game.
    pub fn resign(&mut self, player: PlayerId) -> MoveResult<()> {
        if self.game_over {
            return Err(MoveError::GameOver);
        }
        if player == 0 || usize::from(player) > NUM_PLAYERS {
            return Err(MoveError::UnknownPlayer(player));
        }

        self.game_over = true;
        self.winners = (1..=NUM_PLAYERS as PlayerId)
            .filter(|&p| p != player)
            .collect();
        self.records = vec![
            MoveRecord::Resigned { player },
            MoveRecord::Ended,
            MoveRecord::Winners {
                players: self.winners.clone(),
            },
        ];
        self.stack.push(self.build_snapshot());
        Ok(())
    }

    /// Undo the most recent accepted action, restoring the previous
    /// position from the history stack. Returns `false` when already at the
    /// setup position.
    pub fn undo(&mut self) -> bool {
        if self.stack.len() < 2 {
            return false;
        }
        self.stack.pop();
        let snapshot = self.stack.last().cloned().unwrap_or_else(|| {
            // Unreachable: the stack always holds the setup entry.
            GameState::new().build_snapshot()
        });
        self.restore(&snapshot);
        true
    }

    /// End-of-game check, run after every applied action: the game ends
    /// when no open region remains, or when this and the previous action
    /// were both passes. Winners are the players with the maximal score.
    fn check_end_of_game(&mut self, mv: Move) {
        let passed_out = mv == Move::Pass
            && self
                .stack
                .last()
                .is_some_and(|prev| prev.last_move.as_deref() == Some("pass"));

        let areas = classify(&self.graph, &self.board);
        if !areas.open.is_empty() && !passed_out {
            return;
        }

        self.game_over = true;
        let scores = self.scores();
        let best = scores.iter().copied().max().unwrap_or(0);
        self.winners = (1..=NUM_PLAYERS as PlayerId)
            .filter(|&p| scores[usize::from(p) - 1] == best)
            .collect();
        self.records.push(MoveRecord::Ended);
        self.records.push(MoveRecord::Winners {
            players: self.winners.clone(),
        });
    }

    /// Build a snapshot of the live position.
    fn build_snapshot(&self) -> Snapshot {
        Snapshot {
            current_player: self.current_player,
            board: self.board.pieces().collect(),
            hands: self.hands,
            fences: self.fences.clone(),
            last_move: self.last_move.map(|mv| mv.to_string()),
            records: self.records.clone(),
        }
    }

    /// Restore the live position from a snapshot, rebuilding the graph from
    /// the fence list.
    fn restore(&mut self, snapshot: &Snapshot) {
        self.board = Board::new();
        for &(cell, player) in &snapshot.board {
            self.board.set(cell, player);
        }
        self.hands = snapshot.hands;
        self.fences = snapshot.fences.clone();
        self.graph = BoardGraph::from_fences(&self.fences);
        self.current_player = snapshot.current_player;
        self.last_move = snapshot
            .last_move
            .as_deref()
            .and_then(|text| text.parse().ok());
        self.records = snapshot.records.clone();
        self.game_over = false;
        self.winners.clear();
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;

    fn cell(s: &str) -> Cell {
        Cell::parse(s).expect("valid cell")
    }

    #[test]
    fn test_setup_position() {
        let state = GameState::new();
        assert_eq!(state.board().get(cell("a4")), Some(1));
        assert_eq!(state.board().get(cell("g4")), Some(2));
        assert_eq!(state.hand(1), PIECES_IN_HAND);
        assert_eq!(state.hand(2), PIECES_IN_HAND);
        assert_eq!(state.current_player(), 1);
        assert!(!state.is_game_over());
        assert_eq!(state.history().len(), 1);
        assert_eq!(state.scores(), [0, 0]);
    }

    #[test]
    fn test_placement_decrements_hand_and_advances_turn() {
        let mut state = GameState::new();
        state.apply_text("d4").expect("legal placement");
        assert_eq!(state.board().get(cell("d4")), Some(1));
        assert_eq!(state.hand(1), PIECES_IN_HAND - 1);
        assert_eq!(state.current_player(), 2);
        assert_eq!(state.history().len(), 2);
    }

    #[test]
    fn test_illegal_move_leaves_state_untouched() {
        let mut state = GameState::new();
        let before = state.snapshot();

        // a4 is occupied, so placing there is illegal.
        let err = state.apply_text("a4").expect_err("occupied cell");
        assert_eq!(
            err,
            MoveError::Invalid {
                action: "a4".to_string()
            }
        );
        assert_eq!(state.snapshot(), before);
        assert_eq!(state.history().len(), 1);
    }

    #[test]
    fn test_unparseable_text_reports_original() {
        let mut state = GameState::new();
        let err = state.apply_text("nonsense!").expect_err("garbage");
        assert_eq!(
            err,
            MoveError::Invalid {
                action: "nonsense!".to_string()
            }
        );
    }

    #[test]
    fn test_move_fence_severs_edge_and_records_trail() {
        let mut state = GameState::new();
        let mv = Move::MoveFence {
            from: cell("a4"),
            to: cell("b4"),
            fence: Direction::North,
        };
        assert!(state.legal_moves().contains(&mv), "seed piece can move");
        state.apply(mv).expect("legal move");

        assert!(state.board().is_empty(cell("a4")));
        assert_eq!(state.board().get(cell("b4")), Some(1));
        assert!(!state.graph().has_edge(cell("b4"), cell("b5")));
        assert_eq!(state.fences(), &[(cell("b4"), cell("b5"))]);

        let records = state.records();
        assert!(matches!(records.first(), Some(MoveRecord::Moved { .. })));
        assert!(matches!(records.last(), Some(MoveRecord::Fenced { .. })));
    }

    #[test]
    fn test_round_robin_turns() {
        let mut state = GameState::new();
        assert_eq!(state.current_player(), 1);
        state.apply_text("d4").expect("legal");
        assert_eq!(state.current_player(), 2);
        state.apply_text("f4").expect("legal");
        assert_eq!(state.current_player(), 1);
    }

    #[test]
    fn test_undo_restores_previous_position() {
        let mut state = GameState::new();
        let before = state.snapshot();
        state.apply_text("d4").expect("legal");
        assert!(state.undo());
        assert_eq!(state.snapshot().board, before.board);
        assert_eq!(state.hand(1), PIECES_IN_HAND);
        assert_eq!(state.current_player(), 1);
        assert_eq!(state.history().len(), 1);
        // Nothing left to undo.
        assert!(!state.undo());
    }

    #[test]
    fn test_resignation_awards_opponent() {
        let mut state = GameState::new();
        state.resign(1).expect("resignation always allowed");
        assert!(state.is_game_over());
        assert_eq!(state.winners(), &[2]);
        assert!(matches!(
            state.records().first(),
            Some(MoveRecord::Resigned { player: 1 })
        ));
    }

    #[test]
    fn test_resignation_rejected_after_game_over() {
        let mut state = GameState::new();
        state.resign(2).expect("first resignation");
        assert_eq!(state.resign(1), Err(MoveError::GameOver));
    }

    #[test]
    fn test_resignation_rejects_unknown_player() {
        let mut state = GameState::new();
        assert_eq!(state.resign(3), Err(MoveError::UnknownPlayer(3)));
        assert_eq!(state.resign(0), Err(MoveError::UnknownPlayer(0)));
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new();
        let json = serde_json::to_string(&state.snapshot()).expect("serializable");
        let back: Snapshot = serde_json::from_str(&json).expect("deserializable");
        assert_eq!(back, state.snapshot());
    }
}
