//! Shape and alphabet validation for raw dna rows.

use thiserror::Error;

use crate::core::grid::{ValidGrid, is_base};

/// Why a row sequence is not a well-formed dna grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("dna must not be empty")]
    EmptyInput,
    #[error("dna must be a square matrix: {rows} rows but a row has {columns} columns")]
    NotSquare { rows: usize, columns: usize },
    #[error("only A, T, C and G are allowed: found {symbol:?} at row {row}, column {col}")]
    InvalidAlphabet { symbol: char, row: usize, col: usize },
}

/// Validate raw rows and build a [`ValidGrid`].
///
/// Checks run in a fixed order so every input has exactly one error:
/// - `EmptyInput` if there are no rows or every row is blank.
/// - `InvalidAlphabet` for the first symbol outside `A T C G` (row-major).
/// - `NotSquare` for the first row whose length differs from the row count.
///
/// Grids with fewer than four rows are valid; they simply cannot hold a run.
pub fn validate<S: AsRef<str>>(rows: &[S]) -> Result<ValidGrid, ValidationError> {
    if rows.iter().all(|row| row.as_ref().trim().is_empty()) {
        return Err(ValidationError::EmptyInput);
    }

    for (row, line) in rows.iter().enumerate() {
        if let Some((col, symbol)) = line
            .as_ref()
            .chars()
            .enumerate()
            .find(|&(_, symbol)| !is_base(symbol))
        {
            return Err(ValidationError::InvalidAlphabet { symbol, row, col });
        }
    }

    // Every symbol is ASCII past this point, so byte length == column count.
    let n = rows.len();
    if let Some(line) = rows.iter().find(|line| line.as_ref().len() != n) {
        return Err(ValidationError::NotSquare {
            rows: n,
            columns: line.as_ref().len(),
        });
    }

    let cells = rows
        .iter()
        .flat_map(|line| line.as_ref().bytes())
        .collect();
    Ok(ValidGrid::from_validated(n, cells))
}
