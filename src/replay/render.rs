//! Plain-text renderer for terminal viewing.

use crate::game::{BOARD_SIZE, Cell, GameState, NUM_PLAYERS, PlayerId, classify};

/// Piece glyphs per player.
const PIECE_GLYPHS: [char; 2] = ['A', 'B'];

/// Glyph for an empty cell.
const EMPTY_GLYPH: char = '.';

/// Render the board as plain text, top rank first.
///
/// Severed edges are drawn as walls between cells:
///
/// ```text
/// 7  .  .  .  .  .  .  .
/// 6  .  .  .| A  .  .  .
///       ───
/// 5  .  .  .  .  .  .  .
///    a  b  c  d  e  f  g
/// ```
#[must_use]
pub fn render_board(state: &GameState) -> String {
    let mut output = String::new();

    for row in (0..BOARD_SIZE).rev() {
        // Cell line: rank label, then glyphs with vertical walls between.
        output.push(char::from(b'1' + row));
        output.push(' ');
        for col in 0..BOARD_SIZE {
            let cell = Cell::new(col, row);
            output.push(' ');
            output.push(glyph(state, cell));
            if col + 1 < BOARD_SIZE {
                let east = Cell::new(col + 1, row);
                output.push(if state.graph().has_edge(cell, east) {
                    ' '
                } else {
                    '|'
                });
            }
        }
        output.push('\n');

        // Separator line: horizontal walls towards the next rank down.
        if row > 0 {
            let mut separator = String::from("  ");
            let mut any_wall = false;
            for col in 0..BOARD_SIZE {
                let cell = Cell::new(col, row);
                let south = Cell::new(col, row - 1);
                if state.graph().has_edge(cell, south) {
                    separator.push_str("   ");
                } else {
                    separator.push_str("───");
                    any_wall = true;
                }
            }
            if any_wall {
                output.push_str(separator.trim_end());
                output.push('\n');
            }
        }
    }

    output.push_str("  ");
    for col in 0..BOARD_SIZE {
        output.push(' ');
        output.push(char::from(b'a' + col));
        output.push(' ');
    }
    output.push('\n');

    output
}

/// Render hands, scores and outcome.
#[must_use]
pub fn render_status(state: &GameState) -> String {
    let mut output = String::new();
    let scores = state.scores();

    for player in 1..=NUM_PLAYERS as PlayerId {
        output.push_str(&format!(
            "Player {player} ({}):  In hand: {}  Score: {}\n",
            PIECE_GLYPHS[usize::from(player) - 1],
            state.hand(player),
            scores[usize::from(player) - 1],
        ));
    }

    if state.is_game_over() {
        let winners: Vec<String> = state
            .winners()
            .iter()
            .map(|w| format!("Player {w}"))
            .collect();
        output.push_str(&format!("Game over. Winner: {}\n", winners.join(", ")));
    } else {
        output.push_str(&format!("Player {} to move\n", state.current_player()));
    }

    let areas = classify(state.graph(), state.board());
    output.push_str(&format!(
        "Regions: {} open, {} closed\n",
        areas.open.len(),
        areas.closed.len()
    ));

    output
}

/// Glyph for one cell.
fn glyph(state: &GameState, cell: Cell) -> char {
    match state.board().get(cell) {
        Some(player) if (1..=NUM_PLAYERS as PlayerId).contains(&player) => {
            PIECE_GLYPHS[usize::from(player) - 1]
        }
        Some(_) => '?',
        None => EMPTY_GLYPH,
    }
}
