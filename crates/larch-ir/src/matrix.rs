//! Dense unitary matrices.
//!
//! Matrices are `ndarray` arrays of `Complex64`. Multi-qubit operators use
//! big-endian operand order: the first qubit an operator acts on is the most
//! significant bit of the row/column index.

use ndarray::Array2;
use num_complex::Complex64;

use crate::error::{IrError, IrResult};

/// A dense complex matrix.
pub type Matrix = Array2<Complex64>;

/// The `2^n × 2^n` identity.
pub fn identity(num_qubits: u32) -> Matrix {
    Matrix::eye(1 << num_qubits)
}

/// Number of qubits a square matrix acts on.
///
/// Fails for empty, non-square and non-power-of-two matrices, and for the
/// `1 × 1` case, which addresses no qubits.
pub fn num_qubits_of(matrix: &Matrix) -> IrResult<u32> {
    let (rows, cols) = matrix.dim();
    if rows != cols {
        return Err(IrError::InvalidMatrix(format!(
            "expected a square matrix, got {rows}x{cols}"
        )));
    }
    if rows < 2 || !rows.is_power_of_two() {
        return Err(IrError::InvalidMatrix(format!(
            "dimension {rows} is not a power of two of at least 2"
        )));
    }
    Ok(rows.trailing_zeros())
}

/// Build a matrix from row-major data.
pub fn from_row_major(dim: usize, data: Vec<Complex64>) -> IrResult<Matrix> {
    Matrix::from_shape_vec((dim, dim), data)
        .map_err(|e| IrError::InvalidMatrix(format!("bad row-major data: {e}")))
}

/// Kronecker product `a ⊗ b`.
pub fn kron(a: &Matrix, b: &Matrix) -> Matrix {
    let (ar, ac) = a.dim();
    let (br, bc) = b.dim();
    Matrix::from_shape_fn((ar * br, ac * bc), |(i, j)| {
        a[[i / br, j / bc]] * b[[i % br, j % bc]]
    })
}

/// Lift `op` acting on `positions` into the full `num_qubits` register.
///
/// `positions[0]` is the most significant qubit of `op`; within the
/// register, position 0 is the most significant bit.
pub fn embed(op: &Matrix, positions: &[usize], num_qubits: usize) -> Matrix {
    let dim = 1usize << num_qubits;
    let k = positions.len();
    let mut out = Matrix::zeros((dim, dim));

    for col in 0..dim {
        let sub_col = positions
            .iter()
            .fold(0, |acc, &q| (acc << 1) | ((col >> (num_qubits - 1 - q)) & 1));

        for sub_row in 0..(1usize << k) {
            let amp = op[[sub_row, sub_col]];
            if amp.norm_sqr() == 0.0 {
                continue;
            }
            let mut row = col;
            for (idx, &q) in positions.iter().enumerate() {
                let shift = num_qubits - 1 - q;
                let bit = (sub_row >> (k - 1 - idx)) & 1;
                row = (row & !(1 << shift)) | (bit << shift);
            }
            out[[row, col]] += amp;
        }
    }

    out
}

/// Exact element-wise equality, including shape.
pub fn exactly_equal(a: &Matrix, b: &Matrix) -> bool {
    a == b
}

/// Largest element-wise deviation `max |a_ij - b_ij|`.
///
/// Returns infinity when the shapes differ.
pub fn max_abs_diff(a: &Matrix, b: &Matrix) -> f64 {
    if a.dim() != b.dim() {
        return f64::INFINITY;
    }
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).norm())
        .fold(0.0, f64::max)
}

/// Check `max |a_ij - b_ij| <= atol`.
pub fn allclose(a: &Matrix, b: &Matrix, atol: f64) -> bool {
    max_abs_diff(a, b) <= atol
}

/// Largest deviation between `a` and `e^{iθ}·b` for the best-fitting
/// global phase θ.
///
/// The phase is taken from the overlap `Σ conj(b_ij)·a_ij`. Returns
/// infinity when the shapes differ or the matrices are orthogonal.
pub fn phase_deviation(a: &Matrix, b: &Matrix) -> f64 {
    if a.dim() != b.dim() {
        return f64::INFINITY;
    }
    let overlap: Complex64 = a.iter().zip(b.iter()).map(|(x, y)| y.conj() * x).sum();
    if overlap.norm() < f64::EPSILON {
        return f64::INFINITY;
    }
    let phase = overlap / overlap.norm();
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - phase * y).norm())
        .fold(0.0, f64::max)
}

/// Check that `a` equals `b` up to a global phase within `atol`.
pub fn equal_up_to_global_phase(a: &Matrix, b: &Matrix, atol: f64) -> bool {
    phase_deviation(a, b) <= atol
}
