#![no_main]

//! Move application fuzzer.
//!
//! Throws arbitrary action sequences at a game. Accepted actions must keep
//! every engine invariant; rejected actions must leave the state untouched.

use arbitrary::Arbitrary;
use fendo::game::{check_invariants, Cell, Direction, GameState, Move};
use libfuzzer_sys::fuzz_target;

/// A fuzzer-generated action.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum FuzzMove {
    /// Place at (col, row).
    Place { col: u8, row: u8 },
    /// Move from (col, row) to (col, row) and fence towards a direction.
    MoveFence {
        from_col: u8,
        from_row: u8,
        to_col: u8,
        to_row: u8,
        dir: u8,
    },
    /// Pass the turn.
    Pass,
    /// Resign the current player.
    Resign,
}

fn cell(col: u8, row: u8) -> Cell {
    Cell::new(col % 7, row % 7)
}

fn direction(d: u8) -> Direction {
    Direction::ALL[(d % 4) as usize]
}

fuzz_target!(|actions: Vec<FuzzMove>| {
    let mut state = GameState::new();

    for action in actions.into_iter().take(64) {
        let before = state.snapshot();
        let result = match action {
            FuzzMove::Place { col, row } => state.apply(Move::Place(cell(col, row))),
            FuzzMove::MoveFence {
                from_col,
                from_row,
                to_col,
                to_row,
                dir,
            } => state.apply(Move::MoveFence {
                from: cell(from_col, from_row),
                to: cell(to_col, to_row),
                fence: direction(dir),
            }),
            FuzzMove::Pass => state.apply(Move::Pass),
            FuzzMove::Resign => {
                let player = state.current_player();
                state.resign(player)
            }
        };

        if result.is_err() {
            // Rejected actions must not mutate anything.
            assert_eq!(state.snapshot(), before);
        }

        let violations = check_invariants(&state);
        assert!(violations.is_empty(), "{violations:?}");
    }
});
