//! Plain-text boards

use crate::game::{Position, SIDE};

const BOARD_GAP: &str = "         ";

fn rows(position: &Position) -> Vec<String> {
    position.to_string().lines().map(str::to_string).collect()
}

/// A single board followed by a newline
pub fn render_board(position: &Position) -> String {
    format!("{position}\n")
}

/// Two boards side by side, row by row
pub fn render_pair(left: &Position, right: &Position) -> String {
    let mut out = String::new();
    for (left_row, right_row) in rows(left).iter().zip(rows(right).iter()).take(SIDE) {
        out.push_str(left_row);
        out.push_str(BOARD_GAP);
        out.push_str(right_row);
        out.push('\n');
    }
    out
}

/// A position next to the board after one of its moves.
///
/// `successor` is seen from the side to move next; the right board is flipped
/// back so `X` still marks the player who just moved.
pub fn render_move(position: &Position, successor: &Position) -> String {
    let after = Position::from_sets(successor.opponent(), successor.mover());
    render_pair(position, &after)
}
