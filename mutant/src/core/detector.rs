//! Single-pass run detection.
//!
//! Every cell is visited once in row-major order. At each cell up to four
//! direction checks run, each gated so that a full run starting at the cell
//! stays inside the grid. A check only counts a run at its first cell: if the
//! cell one step backward along the same direction holds the same base, the
//! run was already counted (or belongs to a longer one) and is skipped.

use serde::Serialize;

use crate::core::grid::{RUN_LENGTH, ValidGrid};
use crate::core::types::Verdict;

/// Runs required to classify a sample as mutant.
pub const MUTANT_THRESHOLD: usize = 2;

/// Axis along which a run is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Left to right along a row.
    Horizontal,
    /// Top to bottom along a column.
    Vertical,
    /// Bottom-left to top-right.
    DiagonalAscending,
    /// Top-left to bottom-right.
    DiagonalDescending,
}

impl Direction {
    /// Check order at each cell.
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::DiagonalAscending,
        Direction::DiagonalDescending,
    ];

    /// `(row, col)` offset of one step forward.
    fn step(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::DiagonalAscending => (-1, 1),
            Direction::DiagonalDescending => (1, 1),
        }
    }

    /// True if a full run anchored at `(row, col)` fits in an `n`x`n` grid.
    fn fits(self, n: usize, row: usize, col: usize) -> bool {
        let col_fits = col + RUN_LENGTH <= n;
        match self {
            Direction::Horizontal => col_fits,
            Direction::Vertical => row + RUN_LENGTH <= n,
            Direction::DiagonalAscending => row + 1 >= RUN_LENGTH && col_fits,
            Direction::DiagonalDescending => row + RUN_LENGTH <= n && col_fits,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::Horizontal => "horizontal",
            Direction::Vertical => "vertical",
            Direction::DiagonalAscending => "diagonal_ascending",
            Direction::DiagonalDescending => "diagonal_descending",
        }
    }
}

/// A counted run, identified by its anchor cell and direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Run {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
    pub symbol: char,
}

/// True if the grid contains at least [`MUTANT_THRESHOLD`] runs.
///
/// Stops at the second run found.
pub fn scan(grid: &ValidGrid) -> bool {
    if grid.is_too_small() {
        return false;
    }
    runs(grid).take(MUTANT_THRESHOLD).count() >= MUTANT_THRESHOLD
}

pub fn classify(grid: &ValidGrid) -> Verdict {
    Verdict::from(scan(grid))
}

/// Every counted run, in scan order. Does not stop early.
pub fn find_runs(grid: &ValidGrid) -> Vec<Run> {
    runs(grid).collect()
}

/// Lazy row-major enumeration of counted runs.
fn runs(grid: &ValidGrid) -> impl Iterator<Item = Run> + '_ {
    let n = grid.size();
    (0..n)
        .flat_map(move |row| (0..n).map(move |col| (row, col)))
        .flat_map(|(row, col)| {
            Direction::ALL
                .into_iter()
                .map(move |direction| (row, col, direction))
        })
        .filter(move |&(row, col, direction)| direction.fits(n, row, col))
        .filter_map(|(row, col, direction)| run_at(grid, row, col, direction))
}

fn run_at(grid: &ValidGrid, row: usize, col: usize, direction: Direction) -> Option<Run> {
    let base = grid.get(row, col)?;
    if offset(grid, row, col, direction, -1) == Some(base) {
        return None;
    }
    let complete =
        (1..RUN_LENGTH as isize).all(|k| offset(grid, row, col, direction, k) == Some(base));
    complete.then_some(Run {
        row,
        col,
        direction,
        symbol: char::from(base),
    })
}

/// Base `k` steps from `(row, col)` along `direction`, if inside the grid.
fn offset(
    grid: &ValidGrid,
    row: usize,
    col: usize,
    direction: Direction,
    k: isize,
) -> Option<u8> {
    let (dr, dc) = direction.step();
    let row = row.checked_add_signed(dr * k)?;
    let col = col.checked_add_signed(dc * k)?;
    grid.get(row, col)
}
