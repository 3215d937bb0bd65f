//! Square nucleotide grid storage.

/// Bases allowed in a dna grid. Comparison is case-sensitive.
pub const ALPHABET: [u8; 4] = *b"ATCG";

/// Number of identical consecutive bases that make up a run.
pub const RUN_LENGTH: usize = 4;

/// True if `symbol` is one of [`ALPHABET`].
pub fn is_base(symbol: char) -> bool {
    symbol.is_ascii() && ALPHABET.contains(&(symbol as u8))
}

/// Validated NxN grid of bases, stored row-major with stride `n`.
///
/// Only [`crate::core::validate::validate`] constructs one, so every value is
/// square, non-empty, and restricted to [`ALPHABET`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ValidGrid {
    n: usize,
    cells: Vec<u8>,
}

impl ValidGrid {
    pub(crate) fn from_validated(n: usize, cells: Vec<u8>) -> Self {
        debug_assert_eq!(cells.len(), n * n);
        Self { n, cells }
    }

    /// Side length (rows == columns).
    pub fn size(&self) -> usize {
        self.n
    }

    /// Grids smaller than [`RUN_LENGTH`] cannot contain any run.
    pub fn is_too_small(&self) -> bool {
        self.n < RUN_LENGTH
    }

    /// Base at `(row, col)`, or `None` outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if row >= self.n || col >= self.n {
            return None;
        }
        self.cells.get(row * self.n + col).copied()
    }

    /// Row-major concatenation of all rows.
    pub fn as_bytes(&self) -> &[u8] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks(self.n)
    }

    /// Rows rendered back to strings, in order.
    pub fn to_rows(&self) -> Vec<String> {
        self.rows()
            .map(|row| row.iter().copied().map(char::from).collect())
            .collect()
    }

    /// Grid mirrored along its main diagonal.
    pub fn transpose(&self) -> Self {
        let n = self.n;
        let mut cells = Vec::with_capacity(self.cells.len());
        for row in 0..n {
            for col in 0..n {
                cells.push(self.cells[col * n + row]);
            }
        }
        Self { n, cells }
    }
}
