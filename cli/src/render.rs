// SPDX-License-Identifier: MIT OR Apache-2.0

//! ASCII board rendering for the terminal

use goflip_core::{Board, Color};

fn stone(color: Color) -> char {
    match color {
        Color::Empty => '.',
        Color::Black => 'X',
        Color::White => 'O',
        Color::Red => 'R',
        Color::Green => 'G',
        Color::Blue => 'B',
        Color::Yellow => 'Y',
    }
}

/// Render the board with coordinate labels on both axes.
pub fn draw(board: &Board) -> String {
    let size = board.size() as i32;
    let mut out = String::new();
    out.push_str("  ");
    for x in 0..size {
        out.push_str(&format!("{x:>2}"));
    }
    out.push('\n');
    for y in 0..size {
        out.push_str(&format!("{y:>2}"));
        for x in 0..size {
            out.push(' ');
            out.push(stone(board.get(x, y).unwrap_or(Color::Empty)));
        }
        out.push('\n');
    }
    out
}
