//! Legal move enumeration with speculative fence trials.

use crate::error::MoveError;
use crate::game::path::find_path;
use crate::game::regions::classify;
use crate::game::state::GameState;
use crate::game::{Board, BoardGraph, Cell, Direction, PlayerId};
use std::collections::BTreeSet;
use std::str::FromStr;

/// A structured player action.
///
/// This is a closed set: consumers (history rendering, logging) can match
/// exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    /// Enter a piece from hand on an unoccupied, reachable cell.
    Place(Cell),
    /// Relocate a piece, then sever the edge leaving `to` towards `fence`.
    MoveFence {
        /// Cell the piece starts on.
        from: Cell,
        /// Cell the piece lands on.
        to: Cell,
        /// Direction of the severed edge, relative to `to`.
        fence: Direction,
    },
    /// Record the turn with no board change.
    Pass,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::Place(cell) => write!(f, "{cell}"),
            Move::MoveFence { from, to, fence } => {
                write!(f, "{from}-{to}{}", fence.bearing())
            }
            Move::Pass => write!(f, "pass"),
        }
    }
}

impl FromStr for Move {
    type Err = MoveError;

    /// Parse the canonical text encoding: `"<from>-<to><DIR>"` for
    /// move+fence, a bare cell for placement, `"pass"` for pass.
    ///
    /// Input is normalized first: whitespace is stripped and case is
    /// ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || MoveError::Invalid {
            action: s.to_string(),
        };
        let text: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let text = text.to_lowercase();
        if !text.is_ascii() {
            return Err(invalid());
        }

        if text == "pass" {
            return Ok(Move::Pass);
        }

        if let Some((from_text, target_text)) = text.split_once('-') {
            let from = Cell::parse(from_text).ok_or_else(invalid)?;
            if target_text.len() != 3 {
                return Err(invalid());
            }
            let to = Cell::parse(&target_text[..2]).ok_or_else(invalid)?;
            let bearing = target_text.chars().next_back().ok_or_else(invalid)?;
            let fence = Direction::from_bearing(bearing).ok_or_else(invalid)?;
            return Ok(Move::MoveFence { from, to, fence });
        }

        Cell::parse(&text).map(Move::Place).ok_or_else(invalid)
    }
}

/// A disposable snapshot for trying a candidate move against the resulting
/// topology: copy the position, apply the tentative displacement and fence,
/// inspect the partition, then discard.
///
/// Board and graph are small fixed arrays, so the snapshot is a cheap stack
/// copy rather than a deep clone of shared structures.
#[derive(Debug, Clone, Copy)]
struct Trial {
    graph: BoardGraph,
    board: Board,
}

impl Trial {
    fn new(graph: &BoardGraph, board: &Board) -> Self {
        Self {
            graph: *graph,
            board: *board,
        }
    }

    fn move_piece(&mut self, from: Cell, to: Cell, player: PlayerId) {
        self.board.clear(from);
        self.board.set(to, player);
    }

    fn sever(&mut self, a: Cell, b: Cell) {
        self.graph.sever_edge(a, b);
    }

    /// Whether the resulting partition has zero empty regions and at most
    /// one open region.
    fn is_legal_partition(&self) -> bool {
        classify(&self.graph, &self.board).is_legal_partition()
    }
}

/// Enumerate every legal action for `player` in the given state.
///
/// Returns the empty set once the game is over. Otherwise the set contains
/// placements and move+fence actions inside the single open region, or
/// exactly `pass` when no such action exists. The result is deterministic
/// for a given state; callers must not rely on any particular order beyond
/// that.
#[must_use]
pub fn legal_moves(state: &GameState, player: PlayerId) -> Vec<Move> {
    if state.is_game_over() {
        return Vec::new();
    }

    let graph = state.graph();
    let board = state.board();
    let areas = classify(graph, board);
    debug_assert!(
        areas.open.len() <= 1,
        "reachable states never hold more than one open region"
    );
    let Some(open) = areas.open_region() else {
        return vec![Move::Pass];
    };

    // Valid movement targets for each of the player's pieces in the open
    // region. This list drives both move types.
    let my_pieces: Vec<Cell> = board
        .pieces_of(player)
        .filter(|&cell| open.contains(cell))
        .collect();
    let empties: Vec<Cell> = open
        .cells()
        .iter()
        .copied()
        .filter(|&cell| board.is_empty(cell))
        .collect();

    let mut valid_targets: Vec<(Cell, Vec<Cell>)> = Vec::new();
    for &piece in &my_pieces {
        let targets: Vec<Cell> = empties
            .iter()
            .copied()
            .filter(|&target| find_path(graph, board, piece, target).is_some())
            .collect();
        if !targets.is_empty() {
            valid_targets.push((piece, targets));
        }
    }

    let mut moves = Vec::new();

    // A piece from hand can enter on any cell reachable by some piece.
    if state.hand(player) > 0 {
        let unique_targets: BTreeSet<Cell> = valid_targets
            .iter()
            .flat_map(|(_, targets)| targets.iter().copied())
            .collect();
        moves.extend(unique_targets.into_iter().map(Move::Place));
    }

    // Move a piece, then fence one of the target's still-present edges.
    // Each candidate is simulated on a trial snapshot and kept only if the
    // resulting partition stays legal.
    for (from, targets) in &valid_targets {
        for &to in targets {
            let (adj, count) = graph.neighbours(to);
            for &n in &adj[..count as usize] {
                let mut trial = Trial::new(graph, board);
                trial.move_piece(*from, to, player);
                trial.sever(to, n);
                if trial.is_legal_partition()
                    && let Some(fence) = to.bearing_to(n)
                {
                    moves.push(Move::MoveFence {
                        from: *from,
                        to,
                        fence,
                    });
                }
            }
        }
    }

    if moves.is_empty() {
        moves.push(Move::Pass);
    }

    moves
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(s: &str) -> Cell {
        Cell::parse(s).expect("valid cell")
    }

    #[test]
    fn test_parse_placement() {
        assert_eq!("d5".parse::<Move>(), Ok(Move::Place(cell("d5"))));
        assert_eq!(" D5 ".parse::<Move>(), Ok(Move::Place(cell("d5"))));
    }

    #[test]
    fn test_parse_move_fence() {
        let expected = Move::MoveFence {
            from: cell("a4"),
            to: cell("b4"),
            fence: Direction::North,
        };
        assert_eq!("a4-b4N".parse::<Move>(), Ok(expected));
        assert_eq!("A4-B4n".parse::<Move>(), Ok(expected));
    }

    #[test]
    fn test_parse_pass() {
        assert_eq!("pass".parse::<Move>(), Ok(Move::Pass));
        assert_eq!(" PASS ".parse::<Move>(), Ok(Move::Pass));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "z9", "a4-", "a4-b4", "a4-b4X", "a4b4N", "a4-b4NN"] {
            assert!(bad.parse::<Move>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn test_display_round_trip() {
        let moves = [
            Move::Place(cell("d5")),
            Move::MoveFence {
                from: cell("a4"),
                to: cell("b4"),
                fence: Direction::South,
            },
            Move::Pass,
        ];
        for mv in moves {
            assert_eq!(mv.to_string().parse::<Move>(), Ok(mv));
        }
    }

    #[test]
    fn test_trial_does_not_touch_source() {
        let graph = BoardGraph::new();
        let mut board = Board::new();
        board.set(cell("a4"), 1);

        let mut trial = Trial::new(&graph, &board);
        trial.move_piece(cell("a4"), cell("b4"), 1);
        trial.sever(cell("b4"), cell("b5"));

        assert_eq!(board.get(cell("a4")), Some(1));
        assert!(graph.has_edge(cell("b4"), cell("b5")));
        assert!(trial.board.is_empty(cell("a4")));
        assert!(!trial.graph.has_edge(cell("b4"), cell("b5")));
    }
}
