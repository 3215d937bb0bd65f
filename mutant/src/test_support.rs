//! Test-only helpers for building dna grids.

use crate::core::detector::Direction;
use crate::core::grid::{ALPHABET, RUN_LENGTH, ValidGrid};
use crate::core::validate::validate;

/// Validate `rows`, panicking on invalid input.
pub fn grid<S: AsRef<str>>(rows: &[S]) -> ValidGrid {
    validate(rows).expect("test grid must be valid")
}

/// An `n`x`n` grid in which no two neighbouring cells match in any direction.
///
/// Cell `(r, c)` holds `ALPHABET[(r + 2c) % 4]`, so neighbours differ by 1, 2
/// or 3 positions along every axis.
pub fn run_free_rows(n: usize) -> Vec<String> {
    (0..n)
        .map(|row| {
            (0..n)
                .map(|col| char::from(ALPHABET[(row + 2 * col) % ALPHABET.len()]))
                .collect()
        })
        .collect()
}

/// Overwrite a run of `symbol` anchored at `(row, col)` along `direction`.
///
/// Panics if the run does not fit.
pub fn stamp_run(
    rows: Vec<String>,
    row: usize,
    col: usize,
    direction: Direction,
    symbol: char,
) -> Vec<String> {
    let mut cells: Vec<Vec<char>> = rows.iter().map(|line| line.chars().collect()).collect();
    for k in 0..RUN_LENGTH {
        let (r, c) = match direction {
            Direction::Horizontal => (row, col + k),
            Direction::Vertical => (row + k, col),
            Direction::DiagonalAscending => (row - k, col + k),
            Direction::DiagonalDescending => (row + k, col + k),
        };
        cells[r][c] = symbol;
    }
    cells.into_iter().map(|line| line.into_iter().collect()).collect()
}

/// Rows of `rows` mirrored along the main diagonal.
pub fn transpose_rows<S: AsRef<str>>(rows: &[S]) -> Vec<String> {
    grid(rows).transpose().to_rows()
}
