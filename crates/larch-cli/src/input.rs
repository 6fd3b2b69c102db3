//! Batch input format for `larch lower`.
//!
//! ```json
//! {
//!   "matrices": [
//!     { "name": "cz", "matrix": [[[1, 0], [0, 0], [0, 0], [0, 0]], ...] }
//!   ]
//! }
//! ```
//!
//! Each matrix is a list of rows, each entry a `[re, im]` pair.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use larch_ir::{Matrix, matrix};

/// A batch of named matrices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixBatch {
    pub matrices: Vec<NamedMatrix>,
}

/// One matrix in a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedMatrix {
    pub name: String,
    pub matrix: Vec<Vec<[f64; 2]>>,
}

impl MatrixBatch {
    /// Load a batch from a JSON file.
    pub fn from_file(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            anyhow::bail!("File not found: {path}");
        }

        let source =
            fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))?;
        Self::from_json(&source).with_context(|| format!("Failed to parse {path}"))
    }

    /// Parse a batch from a JSON string.
    pub fn from_json(source: &str) -> Result<Self> {
        Ok(serde_json::from_str(source)?)
    }
}

impl NamedMatrix {
    /// Wrap an existing matrix.
    pub fn from_matrix(name: impl Into<String>, m: &Matrix) -> Self {
        let matrix = m
            .rows()
            .into_iter()
            .map(|row| row.iter().map(|c| [c.re, c.im]).collect())
            .collect();
        Self {
            name: name.into(),
            matrix,
        }
    }

    /// Convert to a dense matrix, checking the rows form a square.
    pub fn to_matrix(&self) -> Result<Matrix> {
        let dim = self.matrix.len();
        if dim == 0 {
            anyhow::bail!("Matrix '{}' is empty", self.name);
        }
        if let Some((i, row)) = self.matrix.iter().enumerate().find(|(_, r)| r.len() != dim) {
            anyhow::bail!(
                "Matrix '{}' is not square: row {i} has {} entries, expected {dim}",
                self.name,
                row.len()
            );
        }

        let data = self
            .matrix
            .iter()
            .flatten()
            .map(|&[re, im]| Complex64::new(re, im))
            .collect();
        matrix::from_row_major(dim, data).with_context(|| format!("Matrix '{}'", self.name))
    }
}
