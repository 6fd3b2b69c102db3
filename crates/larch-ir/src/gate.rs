//! Quantum gate types.

use std::f64::consts::PI;

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::error::IrResult;
use crate::matrix::{self, Matrix};

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

/// Standard gates with known semantics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StandardGate {
    /// Identity on the given number of qubits.
    Identity(u32),

    // Single-qubit gates
    /// Pauli-X gate.
    X,
    /// Hadamard gate.
    H,
    /// T gate (fourth root of Z).
    T,
    /// T-dagger gate.
    Tdg,

    // Sycamore single-qubit native
    /// Phased XZ gate: `Z^z · Z^a · X^x · Z^-a`, all exponents in half turns.
    PhasedXZ {
        /// X exponent.
        x: f64,
        /// Trailing Z exponent.
        z: f64,
        /// Axis phase exponent.
        a: f64,
    },

    // Two-qubit gates
    /// Controlled-X (CNOT) gate.
    CX,
    /// Controlled-Z gate.
    CZ,
    /// SWAP gate.
    Swap,
    /// iSWAP gate.
    ISwap,
    /// Sycamore gate, `FSim(π/2, π/6)`.
    Syc,

    // Three-qubit gates
    /// Toffoli gate (CCX).
    CCX,
    /// Doubly-controlled Z gate.
    CCZ,
    /// Fredkin gate (CSWAP).
    CSwap,
}

impl StandardGate {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            StandardGate::Identity(_) => "id",
            StandardGate::X => "x",
            StandardGate::H => "h",
            StandardGate::T => "t",
            StandardGate::Tdg => "tdg",
            StandardGate::PhasedXZ { .. } => "phxz",
            StandardGate::CX => "cx",
            StandardGate::CZ => "cz",
            StandardGate::Swap => "swap",
            StandardGate::ISwap => "iswap",
            StandardGate::Syc => "syc",
            StandardGate::CCX => "ccx",
            StandardGate::CCZ => "ccz",
            StandardGate::CSwap => "cswap",
        }
    }

    /// Get the number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            StandardGate::Identity(n) => *n,
            StandardGate::X
            | StandardGate::H
            | StandardGate::T
            | StandardGate::Tdg
            | StandardGate::PhasedXZ { .. } => 1,
            StandardGate::CX
            | StandardGate::CZ
            | StandardGate::Swap
            | StandardGate::ISwap
            | StandardGate::Syc => 2,
            StandardGate::CCX | StandardGate::CCZ | StandardGate::CSwap => 3,
        }
    }

    /// The exact unitary of this gate.
    pub fn unitary(&self) -> Matrix {
        match self {
            StandardGate::Identity(n) => matrix::identity(*n),
            StandardGate::X => permutation(2, |i| i ^ 1),
            StandardGate::H => {
                let s = Complex64::new(std::f64::consts::FRAC_1_SQRT_2, 0.0);
                ndarray::arr2(&[[s, s], [s, -s]])
            }
            StandardGate::T => diagonal(&[ONE, Complex64::from_polar(1.0, PI / 4.0)]),
            StandardGate::Tdg => diagonal(&[ONE, Complex64::from_polar(1.0, -PI / 4.0)]),
            StandardGate::PhasedXZ { x, z, a } => phased_xz_matrix(*x, *z, *a),
            StandardGate::CX => permutation(4, |i| if i >= 2 { i ^ 1 } else { i }),
            StandardGate::CZ => diagonal(&[ONE, ONE, ONE, -ONE]),
            StandardGate::Swap => permutation(4, |i| match i {
                1 => 2,
                2 => 1,
                other => other,
            }),
            StandardGate::ISwap => ndarray::arr2(&[
                [ONE, ZERO, ZERO, ZERO],
                [ZERO, ZERO, I, ZERO],
                [ZERO, I, ZERO, ZERO],
                [ZERO, ZERO, ZERO, ONE],
            ]),
            StandardGate::Syc => ndarray::arr2(&[
                [ONE, ZERO, ZERO, ZERO],
                [ZERO, ZERO, -I, ZERO],
                [ZERO, -I, ZERO, ZERO],
                [ZERO, ZERO, ZERO, Complex64::from_polar(1.0, -PI / 6.0)],
            ]),
            StandardGate::CCX => permutation(8, |i| if i >= 6 { i ^ 1 } else { i }),
            StandardGate::CCZ => diagonal(&[ONE, ONE, ONE, ONE, ONE, ONE, ONE, -ONE]),
            StandardGate::CSwap => permutation(8, |i| match i {
                5 => 6,
                6 => 5,
                other => other,
            }),
        }
    }
}

/// `Z^t = diag(1, e^{iπt})`.
fn z_pow(t: f64) -> Matrix {
    diagonal(&[ONE, Complex64::from_polar(1.0, PI * t)])
}

/// `X^t`, with the global phase `e^{iπt/2}` of the half-turn convention.
fn x_pow(t: f64) -> Matrix {
    let g = Complex64::from_polar(1.0, PI * t / 2.0);
    let c = (PI * t / 2.0).cos();
    let s = (PI * t / 2.0).sin();
    ndarray::arr2(&[[g * c, -I * g * s], [-I * g * s, g * c]])
}

fn phased_xz_matrix(x: f64, z: f64, a: f64) -> Matrix {
    z_pow(z).dot(&z_pow(a)).dot(&x_pow(x)).dot(&z_pow(-a))
}

/// Permutation matrix sending basis state `i` to `f(i)`.
fn permutation(dim: usize, f: impl Fn(usize) -> usize) -> Matrix {
    let mut m = Matrix::zeros((dim, dim));
    for i in 0..dim {
        m[[f(i), i]] = ONE;
    }
    m
}

fn diagonal(entries: &[Complex64]) -> Matrix {
    let mut m = Matrix::zeros((entries.len(), entries.len()));
    for (i, &d) in entries.iter().enumerate() {
        m[[i, i]] = d;
    }
    m
}

/// A gate defined only by its dense unitary.
///
/// The matrix is stored row-major and is not decomposed further by the IR.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatrixGate {
    num_qubits: u32,
    matrix: Vec<Complex64>,
}

impl MatrixGate {
    /// Wrap a square, power-of-two matrix verbatim.
    pub fn new(unitary: &Matrix) -> IrResult<Self> {
        let num_qubits = matrix::num_qubits_of(unitary)?;
        Ok(Self {
            num_qubits,
            matrix: unitary.iter().copied().collect(),
        })
    }

    /// The number of qubits it operates on.
    pub fn num_qubits(&self) -> u32 {
        self.num_qubits
    }

    /// The wrapped unitary.
    pub fn unitary(&self) -> Matrix {
        let dim = 1usize << self.num_qubits;
        Matrix::from_shape_fn((dim, dim), |(i, j)| self.matrix[i * dim + j])
    }
}

/// A quantum gate, either standard or matrix-defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GateKind {
    /// A standard gate with known semantics.
    Standard(StandardGate),
    /// A gate given by an explicit unitary.
    Matrix(MatrixGate),
}

impl GateKind {
    /// Get the name of this gate.
    #[inline]
    pub fn name(&self) -> &str {
        match self {
            GateKind::Standard(g) => g.name(),
            GateKind::Matrix(_) => "matrix",
        }
    }

    /// Get the number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> u32 {
        match self {
            GateKind::Standard(g) => g.num_qubits(),
            GateKind::Matrix(g) => g.num_qubits(),
        }
    }
}

/// A gate with associated metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gate {
    /// The kind of gate.
    pub kind: GateKind,
    /// Optional label for the gate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Gate {
    /// Create a new gate from a standard gate.
    pub fn standard(gate: StandardGate) -> Self {
        Self {
            kind: GateKind::Standard(gate),
            label: None,
        }
    }

    /// Create a new gate from a matrix gate.
    pub fn matrix(gate: MatrixGate) -> Self {
        Self {
            kind: GateKind::Matrix(gate),
            label: None,
        }
    }

    /// Add a label to the gate.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Get the name of this gate.
    pub fn name(&self) -> &str {
        self.kind.name()
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> u32 {
        self.kind.num_qubits()
    }

    /// The exact unitary of this gate.
    pub fn unitary(&self) -> Matrix {
        match &self.kind {
            GateKind::Standard(g) => g.unitary(),
            GateKind::Matrix(g) => g.unitary(),
        }
    }

    /// Get the standard gate, if this is one.
    pub fn as_standard(&self) -> Option<&StandardGate> {
        match &self.kind {
            GateKind::Standard(g) => Some(g),
            GateKind::Matrix(_) => None,
        }
    }
}

impl From<StandardGate> for Gate {
    fn from(gate: StandardGate) -> Self {
        Gate::standard(gate)
    }
}

impl From<MatrixGate> for Gate {
    fn from(gate: MatrixGate) -> Self {
        Gate::matrix(gate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{allclose, exactly_equal};

    fn is_unitary(m: &Matrix) -> bool {
        let n = m.nrows();
        let product = m.t().mapv(|v| v.conj()).dot(m);
        allclose(&product, &Matrix::eye(n), 1e-12)
    }

    #[test]
    fn test_standard_gate_properties() {
        assert_eq!(StandardGate::Identity(3).num_qubits(), 3);
        assert_eq!(StandardGate::CX.num_qubits(), 2);
        assert_eq!(StandardGate::Syc.num_qubits(), 2);
        assert_eq!(StandardGate::CSwap.num_qubits(), 3);
        assert_eq!(StandardGate::Syc.name(), "syc");
    }

    #[test]
    fn test_catalog_unitaries_are_unitary() {
        for gate in [
            StandardGate::X,
            StandardGate::H,
            StandardGate::T,
            StandardGate::Tdg,
            StandardGate::CX,
            StandardGate::CZ,
            StandardGate::Swap,
            StandardGate::ISwap,
            StandardGate::Syc,
            StandardGate::CCX,
            StandardGate::CCZ,
            StandardGate::CSwap,
            StandardGate::PhasedXZ {
                x: 0.3,
                z: -0.2,
                a: 0.7,
            },
        ] {
            let u = gate.unitary();
            assert_eq!(u.nrows(), 1 << gate.num_qubits());
            assert!(is_unitary(&u), "{} is not unitary", gate.name());
        }
    }

    #[test]
    fn test_cx_is_big_endian() {
        let cx = StandardGate::CX.unitary();
        // |10> (control set) -> |11>
        assert_eq!(cx[[3, 2]], ONE);
        assert_eq!(cx[[1, 1]], ONE);
    }

    #[test]
    fn test_toffoli_flips_only_last_pair() {
        let ccx = StandardGate::CCX.unitary();
        assert_eq!(ccx[[7, 6]], ONE);
        assert_eq!(ccx[[6, 7]], ONE);
        assert_eq!(ccx[[5, 5]], ONE);
    }

    #[test]
    fn test_phased_xz_special_cases() {
        // x = 1, a = 0, z = 0 is Pauli X.
        let x = StandardGate::PhasedXZ {
            x: 1.0,
            z: 0.0,
            a: 0.0,
        }
        .unitary();
        assert!((x[[0, 1]] - ONE).norm() < 1e-12);
        assert!(x[[0, 0]].norm() < 1e-12);

        // x = 0 collapses to Z^z.
        let s = StandardGate::PhasedXZ {
            x: 0.0,
            z: 0.5,
            a: 0.3,
        }
        .unitary();
        assert!((s[[1, 1]] - I).norm() < 1e-12);
        assert!((s[[0, 0]] - ONE).norm() < 1e-12);
    }

    #[test]
    fn test_matrix_gate_roundtrip() {
        let iswap = StandardGate::ISwap.unitary();
        let gate = MatrixGate::new(&iswap).unwrap();
        assert_eq!(gate.num_qubits(), 2);
        assert!(exactly_equal(&gate.unitary(), &iswap));

        assert!(MatrixGate::new(&Matrix::eye(3)).is_err());
    }

    #[test]
    fn test_gate_creation() {
        let cz = Gate::standard(StandardGate::CZ);
        assert_eq!(cz.name(), "cz");
        assert_eq!(cz.num_qubits(), 2);
        assert!(cz.label.is_none());

        let labeled = Gate::standard(StandardGate::CX).with_label("CNOT");
        assert_eq!(labeled.label.as_deref(), Some("CNOT"));
        assert_eq!(labeled.as_standard(), Some(&StandardGate::CX));

        let m = Gate::from(MatrixGate::new(&matrix::identity(1)).unwrap());
        assert_eq!(m.name(), "matrix");
        assert!(m.as_standard().is_none());
    }
}
