//! Text board for the console transcript

use std::fmt::Write;

use crate::arena::execution::Arena;
use crate::arena::grid::Grid;
use crate::arena::roster::RobotEntry;
use crate::core::types::Position;

/// Board header plus the grid, one row per line
pub fn render_board(arena: &Arena) -> String {
    let mut out = format!("=========== starting round {} ===========\n", arena.round());
    out.push_str(&render_grid(arena.grid(), arena.robots()));
    out
}

/// Grid with column indices across the top and row indices down the side.
/// Robots are drawn over terrain, live robots over downed ones.
pub fn render_grid(grid: &Grid, roster: &[RobotEntry]) -> String {
    let mut cells: Vec<Vec<char>> = (0..grid.rows())
        .map(|r| {
            (0..grid.cols())
                .map(|c| {
                    grid.terrain(Position::new(r, c))
                        .map(|t| t.glyph())
                        .unwrap_or(' ')
                })
                .collect()
        })
        .collect();

    let downed = roster.iter().filter(|e| !e.is_alive());
    let live = roster.iter().filter(|e| e.is_alive());
    for entry in downed.chain(live) {
        if grid.in_bounds(entry.position) {
            cells[entry.position.row as usize][entry.position.col as usize] = entry.glyph();
        }
    }

    let mut out = String::from("   ");
    for c in 0..grid.cols() {
        let _ = write!(out, "{:>2} ", c);
    }
    out.push('\n');

    for (r, row) in cells.iter().enumerate() {
        let _ = write!(out, "{:>2} ", r);
        for ch in row {
            let _ = write!(out, " {} ", ch);
        }
        out.push('\n');
    }
    out
}
