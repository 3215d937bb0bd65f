//! Content fingerprints used as verdict cache keys.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::core::grid::ValidGrid;

/// Lowercase hex SHA-256 of the row-major concatenation of all rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Fingerprint raw rows, preserving their order.
    #[cfg(test)]
    pub(crate) fn of_rows<S: AsRef<str>>(rows: &[S]) -> Self {
        let mut hasher = Sha256::new();
        for row in rows {
            hasher.update(row.as_ref().as_bytes());
        }
        Self(hex::encode(hasher.finalize()))
    }

    /// SHA-256 of the grid's rows, concatenated top to bottom.
    pub fn of_grid(grid: &ValidGrid) -> Self {
        Self(hex::encode(Sha256::digest(grid.as_bytes())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
