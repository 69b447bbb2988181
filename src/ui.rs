#![cfg(feature = "std")]

//! Terminal rendering and coordinate parsing for the interactive game.

use std::fmt::Write;

use crate::board::Board;
use crate::common::{CellView, Coord};
use crate::config::BOARD_SIZE;
use crate::game::Match;

/// Parse a coordinate such as `A5` or `j10` into a zero-based [`Coord`].
pub fn parse_coord(input: &str) -> Result<Coord, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty input".to_string());
    }
    if input.len() < 2 {
        return Err("Too short - need column letter and row number (e.g., A5)".to_string());
    }
    let mut chars = input.chars();
    let col_ch = chars.next().ok_or("No column letter")?.to_ascii_uppercase();
    if !col_ch.is_ascii_alphabetic() {
        return Err(format!("Invalid column '{}' - must be a letter A-J", col_ch));
    }
    let col = (col_ch as u8).wrapping_sub(b'A') as usize;
    if col >= BOARD_SIZE {
        return Err(format!("Column '{}' out of bounds - must be A-J", col_ch));
    }
    let row_str: String = chars.collect();
    let row: usize = row_str
        .parse()
        .map_err(|_| format!("Invalid row '{}' - must be a number 1-10", row_str))?;
    if row == 0 || row > BOARD_SIZE {
        return Err(format!("Row {} out of bounds - must be 1-10", row));
    }
    Ok(Coord::new(col, row - 1))
}

fn glyph(view: CellView) -> char {
    match view {
        CellView::Water => '.',
        CellView::Ship => 'S',
        CellView::Hit => 'X',
        CellView::Miss => 'o',
        CellView::Destroyed => '#',
    }
}

/// Draw a board as text, one row per line with column letters on top.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();
    out.push_str("    ");
    for c in 0..BOARD_SIZE {
        let _ = write!(out, " {}", (b'A' + c as u8) as char);
    }
    out.push('\n');
    for (y, row) in board.view_grid().iter().enumerate() {
        let _ = write!(out, "  {:2}", y + 1);
        for view in row.iter() {
            let _ = write!(out, " {}", glyph(*view));
        }
        out.push('\n');
    }
    out
}

/// Opponent board on top, the player's own board below, then the status line.
pub fn render_match(game: &Match) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Opponent board ({} ships left):",
        game.opponent_board().surviving_ships()
    );
    out.push_str(&render_board(game.opponent_board()));
    let _ = writeln!(
        out,
        "\nYour board ({} ships left):",
        game.player_board().surviving_ships()
    );
    out.push_str(&render_board(game.player_board()));
    out.push_str("    Legend: S=Ship  X=Hit  #=Sunk  o=Miss  .=Water\n");
    let _ = writeln!(out, "\n{}", game.status_line());
    out
}
