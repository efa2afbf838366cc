//! Game invariants - sanity checks that detect bugs.
//!
//! These should NEVER trigger in a correctly implemented game; a violation
//! means state corruption, not bad input. Callers treat a non-empty result
//! as fatal and abort the current operation rather than attempt repair.

use crate::game::{
    CELL_COUNT, FULL_EDGE_COUNT, GameState, NUM_PLAYERS, PIECES_IN_HAND, PlayerId, classify,
};

/// Invariant violation report.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all game invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    // The region classification is a true partition of the board.
    let areas = classify(state.graph(), state.board());
    if areas.total_cells() != CELL_COUNT {
        violations.push(InvariantViolation {
            message: format!(
                "Partition covers {} cells, expected {CELL_COUNT}",
                areas.total_cells()
            ),
        });
    }

    // No empty region, at most one open region. This holds for every
    // reachable state including setup (one open region over the whole
    // board) and finished games (zero open regions).
    if !areas.empty.is_empty() {
        violations.push(InvariantViolation {
            message: format!("{} empty region(s) present", areas.empty.len()),
        });
    }
    if areas.open.len() > 1 {
        violations.push(InvariantViolation {
            message: format!("{} open regions present, at most 1 allowed", areas.open.len()),
        });
    }

    // Edge accounting: the graph only ever shrinks, one edge per fence.
    let expected_edges = FULL_EDGE_COUNT.saturating_sub(state.fences().len());
    if state.graph().edge_count() != expected_edges {
        violations.push(InvariantViolation {
            message: format!(
                "Graph has {} edges, expected {expected_edges} ({} fences)",
                state.graph().edge_count(),
                state.fences().len()
            ),
        });
    }
    for (i, fence) in state.fences().iter().enumerate() {
        let duplicated = state.fences()[..i]
            .iter()
            .any(|other| other == fence || (other.1, other.0) == *fence);
        if duplicated {
            violations.push(InvariantViolation {
                message: format!("Fence {}-{} recorded twice", fence.0, fence.1),
            });
        }
    }

    // Piece conservation: board pieces plus hand equal the full allotment.
    for player in 1..=NUM_PLAYERS as PlayerId {
        let on_board = state.board().pieces_of(player).count();
        let total = on_board + usize::from(state.hand(player));
        let expected = usize::from(PIECES_IN_HAND) + 1;
        if total != expected {
            violations.push(InvariantViolation {
                message: format!(
                    "Player {player} accounts for {total} pieces, expected {expected}"
                ),
            });
        }
    }

    // Turn and outcome bookkeeping.
    if state.current_player() == 0 || usize::from(state.current_player()) > NUM_PLAYERS {
        violations.push(InvariantViolation {
            message: format!("Current player {} out of range", state.current_player()),
        });
    }
    if state.is_game_over() && state.winners().is_empty() {
        violations.push(InvariantViolation {
            message: "Game over without winners".to_string(),
        });
    }
    if !state.is_game_over() && !state.winners().is_empty() {
        violations.push(InvariantViolation {
            message: "Winners recorded while game in progress".to_string(),
        });
    }

    violations
}

/// Assert all game invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(state: &GameState) {
    let violations = check_invariants(state);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Game invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_state: &GameState) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_state_passes() {
        let state = GameState::new();
        let violations = check_invariants(&state);
        assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn test_invariants_hold_across_a_few_moves() {
        let mut state = GameState::new();
        for _ in 0..6 {
            if state.is_game_over() {
                break;
            }
            let moves = state.legal_moves();
            let mv = moves.first().copied().expect("in-progress game has moves");
            state.apply(mv).expect("legal move applies");
            let violations = check_invariants(&state);
            assert!(violations.is_empty(), "{violations:?}");
        }
    }

    #[test]
    fn test_resigned_game_passes() {
        let mut state = GameState::new();
        state.resign(2).expect("resignation");
        let violations = check_invariants(&state);
        assert!(violations.is_empty(), "{violations:?}");
    }
}
