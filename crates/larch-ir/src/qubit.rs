//! Grid-addressed qubits.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A qubit addressed by its position on a 2D device grid.
///
/// Ordering is row-major, so sorting a set of grid qubits walks the device
/// row by row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridQubit {
    /// Row on the device grid.
    pub row: i32,
    /// Column on the device grid.
    pub col: i32,
}

impl GridQubit {
    /// Create a new grid qubit.
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Qubits `(row, col) .. (row, col + len)` laid out along one row.
    pub fn line(row: i32, col: i32, len: u32) -> Vec<Self> {
        (0..len)
            .map(|offset| Self::new(row, col + offset as i32))
            .collect()
    }

    /// All qubits of a `rows × cols` rectangle anchored at `(0, 0)`.
    pub fn rect(rows: u32, cols: u32) -> Vec<Self> {
        (0..rows as i32)
            .flat_map(|row| (0..cols as i32).map(move |col| Self::new(row, col)))
            .collect()
    }

    /// Check whether two qubits are nearest neighbours on the grid.
    pub fn is_adjacent(&self, other: &Self) -> bool {
        (self.row - other.row).abs() + (self.col - other.col).abs() == 1
    }
}

impl fmt::Display for GridQubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q({}, {})", self.row, self.col)
    }
}

impl From<(i32, i32)> for GridQubit {
    fn from((row, col): (i32, i32)) -> Self {
        GridQubit::new(row, col)
    }
}
