//! Text renderings of a session.
//!
//! All functions take `&GameSession` and only read from it.

use std::fmt::Write;

use rustc_hash::FxHashMap;

use super::layout::{cell_to_square, square_to_cell};
use crate::core::Square;
use crate::session::GameSession;

/// ASCII board, top row first.
///
/// Each cell shows its number and a marker line: the turn-order numbers of
/// players standing there, then `S` on a snake head or `L` on a ladder foot.
/// A legend follows the grid.
#[must_use]
pub fn render_board(session: &GameSession) -> String {
    let board = session.board();
    let size = board.size();
    let width = board.last_square().to_string().len().max(5);
    let separator = format!("{}+", format!("+{}", "-".repeat(width)).repeat(size as usize));

    let mut out = String::new();
    for row in (0..size).rev() {
        let mut numbers = String::new();
        let mut markers = String::new();

        for col in 0..size {
            let Some(square) = cell_to_square(size, row, col) else {
                continue;
            };
            let _ = write!(numbers, "|{square:>width$}");
            let _ = write!(markers, "|{:<width$}", cell_markers(session, square));
        }

        let _ = writeln!(out, "{separator}");
        let _ = writeln!(out, "{numbers}|");
        let _ = writeln!(out, "{markers}|");
    }
    let _ = writeln!(out, "{separator}");

    out.push_str(&render_legend(session));
    out
}

fn cell_markers(session: &GameSession, square: Square) -> String {
    let mut markers: String = session
        .players()
        .iter()
        .enumerate()
        .filter(|(_, p)| p.position() == square)
        .filter_map(|(i, _)| char::from_digit(i as u32 + 1, 10))
        .collect();

    let board = session.board();
    if board.snakes().contains_key(&square) {
        markers.push('S');
    } else if board.ladders().contains_key(&square) {
        markers.push('L');
    }
    markers
}

fn render_legend(session: &GameSession) -> String {
    let board = session.board();
    let mut out = String::new();

    let pairs = |map: &im::OrdMap<Square, Square>| {
        map.iter()
            .map(|(s, e)| format!("{s}->{e}"))
            .collect::<Vec<_>>()
            .join(", ")
    };

    if !board.snakes().is_empty() {
        let _ = writeln!(out, "Snakes:  {}", pairs(board.snakes()));
    }
    if !board.ladders().is_empty() {
        let _ = writeln!(out, "Ladders: {}", pairs(board.ladders()));
    }

    for (i, player) in session.players().iter().enumerate() {
        let place = if player.has_started() {
            format!("square {}", player.position())
        } else {
            "off the board".to_string()
        };
        let _ = writeln!(out, "{} {}: {}", i + 1, player.name(), place);
    }

    if let Some(winner) = session.winner() {
        let _ = writeln!(out, "Winner: {}", winner.name());
    }
    out
}

/// Positions reached by each player, turn by turn, in turn order.
#[must_use]
pub fn player_paths(session: &GameSession) -> Vec<(String, Vec<Square>)> {
    session
        .players()
        .iter()
        .map(|p| {
            let path = session.move_log().positions_of(p.name()).collect();
            (p.name().to_string(), path)
        })
        .collect()
}

/// One line per player: `Ada: 4 -> 9 -> 31`.
#[must_use]
pub fn render_paths(session: &GameSession) -> String {
    let mut out = String::new();
    for (name, path) in player_paths(session) {
        let steps = if path.is_empty() {
            "(no moves)".to_string()
        } else {
            path.iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" -> ")
        };
        let _ = writeln!(out, "{name}: {steps}");
    }
    out
}

/// How often each square appears in the move log, laid out as the board is
/// displayed: `grid[0]` is the top row.
#[must_use]
pub fn landing_frequency(session: &GameSession) -> Vec<Vec<u32>> {
    let size = session.board().size();

    let mut counts: FxHashMap<Square, u32> = FxHashMap::default();
    for record in session.move_log().iter() {
        *counts.entry(record.position).or_insert(0) += 1;
    }

    let mut grid = vec![vec![0u32; size as usize]; size as usize];
    for (square, count) in counts {
        if let Some((row, col)) = square_to_cell(size, square) {
            grid[(size - 1 - row) as usize][col as usize] = count;
        }
    }
    grid
}

/// The landing-frequency grid as right-aligned text.
#[must_use]
pub fn render_heatmap(session: &GameSession) -> String {
    let grid = landing_frequency(session);
    let width = grid
        .iter()
        .flatten()
        .map(|c| c.to_string().len())
        .max()
        .unwrap_or(1);

    let mut out = String::new();
    for row in &grid {
        let line = row
            .iter()
            .map(|c| format!("{c:>width$}"))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = writeln!(out, "{line}");
    }
    out
}
