//! 2x2 unitary algebra for single-qubit synthesis.
//!
//! Provides the matrix products, ZYZ decomposition and the conversion to
//! Sycamore's `PhasedXZ` gate used by the translator.

use num_complex::Complex64;
use std::f64::consts::PI;

use larch_ir::{Matrix, StandardGate};

/// Absolute tolerance for identity and special-angle checks.
const EPSILON: f64 = 1e-10;

/// Single-qubit unitary used while merging and converting 1-qubit factors.
#[derive(Debug, Clone, Copy)]
pub struct Unitary2x2 {
    /// Entries `[[a, b], [c, d]]`, stored as `[a, b, c, d]`.
    pub data: [Complex64; 4],
}

impl Unitary2x2 {
    /// Build from the four entries, row by row.
    pub fn new(a: Complex64, b: Complex64, c: Complex64, d: Complex64) -> Self {
        Self { data: [a, b, c, d] }
    }

    /// The identity.
    pub fn identity() -> Self {
        Self::new(
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(1.0, 0.0),
        )
    }

    /// Hadamard.
    pub fn h() -> Self {
        let s = 1.0 / 2.0_f64.sqrt();
        Self::new(
            Complex64::new(s, 0.0),
            Complex64::new(s, 0.0),
            Complex64::new(s, 0.0),
            Complex64::new(-s, 0.0),
        )
    }

    /// Pauli X.
    pub fn x() -> Self {
        Self::new(
            Complex64::new(0.0, 0.0),
            Complex64::new(1.0, 0.0),
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 0.0),
        )
    }

    /// `exp(-iθX/2)`.
    pub fn rx(theta: f64) -> Self {
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        Self::new(
            Complex64::new(c, 0.0),
            Complex64::new(0.0, -s),
            Complex64::new(0.0, -s),
            Complex64::new(c, 0.0),
        )
    }

    /// `exp(-iθY/2)`.
    pub fn ry(theta: f64) -> Self {
        let c = (theta / 2.0).cos();
        let s = (theta / 2.0).sin();
        Self::new(
            Complex64::new(c, 0.0),
            Complex64::new(-s, 0.0),
            Complex64::new(s, 0.0),
            Complex64::new(c, 0.0),
        )
    }

    /// `exp(-iθZ/2)`.
    pub fn rz(theta: f64) -> Self {
        let exp_neg = Complex64::from_polar(1.0, -theta / 2.0);
        let exp_pos = Complex64::from_polar(1.0, theta / 2.0);
        Self::new(
            exp_neg,
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            exp_pos,
        )
    }

    /// `diag(1, e^{iλ})`.
    pub fn p(lambda: f64) -> Self {
        let phase = Complex64::from_polar(1.0, lambda);
        Self::new(
            Complex64::new(1.0, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, 0.0),
            phase,
        )
    }

    /// Create a phased XZ gate `Z^z · Z^a · X^x · Z^-a` (exponents in half turns).
    pub fn phased_xz(x: f64, z: f64, a: f64) -> Self {
        let phase = Complex64::from_polar(1.0, PI * x / 2.0);
        let rx = Self::rx(PI * x);
        let x_pow = Self::new(
            phase * rx.data[0],
            phase * rx.data[1],
            phase * rx.data[2],
            phase * rx.data[3],
        );
        Self::p(PI * z) * Self::p(PI * a) * x_pow * Self::p(-PI * a)
    }

    /// Read a `2 × 2` matrix. Returns `None` for any other shape.
    pub fn from_matrix(matrix: &Matrix) -> Option<Self> {
        if matrix.dim() != (2, 2) {
            return None;
        }
        Some(Self::new(
            matrix[[0, 0]],
            matrix[[0, 1]],
            matrix[[1, 0]],
            matrix[[1, 1]],
        ))
    }

    /// Unitary of a single-qubit standard gate.
    pub fn from_gate(gate: &StandardGate) -> Option<Self> {
        if gate.num_qubits() != 1 {
            return None;
        }
        Self::from_matrix(&gate.unitary())
    }

    /// Convert to a dense matrix.
    pub fn to_matrix(&self) -> Matrix {
        ndarray::arr2(&[[self.data[0], self.data[1]], [self.data[2], self.data[3]]])
    }

    /// Matrix product `self · other` (`other` applied first).
    #[allow(clippy::many_single_char_names)]
    pub fn mul(&self, other: &Self) -> Self {
        let [a, b, c, d] = self.data;
        let [e, f, g, h] = other.data;
        Self::new(a * e + b * g, a * f + b * h, c * e + d * g, c * f + d * h)
    }

    /// Conjugate transpose.
    pub fn dagger(&self) -> Self {
        Self::new(
            self.data[0].conj(),
            self.data[2].conj(),
            self.data[1].conj(),
            self.data[3].conj(),
        )
    }

    /// Check for the identity up to a global phase, within `EPSILON`.
    pub fn is_identity(&self) -> bool {
        let [a, b, c, d] = self.data;

        if b.norm() > EPSILON || c.norm() > EPSILON {
            return false;
        }

        (a - d).norm() < EPSILON
    }

    /// Decompose into RZ(alpha) * RY(beta) * RZ(gamma) * `global_phase`.
    ///
    /// Returns (alpha, beta, gamma, `global_phase`). The reconstruction
    /// `e^{i·global_phase} · Rz(alpha) · Ry(beta) · Rz(gamma)` is exact, phase
    /// included.
    pub fn zyz_decomposition(&self) -> (f64, f64, f64, f64) {
        let [a, b, c, d] = self.data;

        let det = a * d - b * c;
        let global_phase = det.arg() / 2.0;

        // Strip the determinant phase so the matrix is in SU(2)
        let phase_factor = Complex64::from_polar(1.0, -global_phase);
        let a = a * phase_factor;
        let b = b * phase_factor;
        let c = c * phase_factor;

        // For SU(2): U = [[cos(b/2)*e^(-i(a+g)/2), -sin(b/2)*e^(-i(a-g)/2)],
        //                 [sin(b/2)*e^(i(a-g)/2),   cos(b/2)*e^(i(a+g)/2)]]
        let beta = 2.0 * c.norm().atan2(a.norm());

        if beta.abs() < EPSILON {
            let alpha_plus_gamma = -2.0 * a.arg();
            return (
                alpha_plus_gamma / 2.0,
                0.0,
                alpha_plus_gamma / 2.0,
                global_phase,
            );
        }

        if (beta - PI).abs() < EPSILON {
            let alpha_minus_gamma = -2.0 * (-b).arg();
            return (
                alpha_minus_gamma / 2.0,
                PI,
                -alpha_minus_gamma / 2.0,
                global_phase,
            );
        }

        let alpha_plus_gamma = -2.0 * a.arg();
        let alpha_minus_gamma = 2.0 * c.arg();

        let alpha = f64::midpoint(alpha_plus_gamma, alpha_minus_gamma);
        let gamma = (alpha_plus_gamma - alpha_minus_gamma) / 2.0;

        (alpha, beta, gamma, global_phase)
    }

    /// Express this unitary as a `PhasedXZ` gate, up to global phase.
    ///
    /// With `U ∝ Rz(α)·Ry(β)·Rz(γ)`: `x = β/π`, `z = (α+γ)/π`,
    /// `a = 1/2 − γ/π`. Exponents are reduced to `(-1, 1]`.
    pub fn to_phased_xz(&self) -> StandardGate {
        let (alpha, beta, gamma, _phase) = self.zyz_decomposition();

        let x = beta / PI;
        let z = normalize_half_turns((alpha + gamma) / PI);
        let a = if x.abs() < EPSILON {
            0.0
        } else {
            normalize_half_turns(0.5 - gamma / PI)
        };

        StandardGate::PhasedXZ { x, z, a }
    }

    /// Wrap an angle into `[-π, π]`; non-finite input maps to 0.
    pub fn normalize_angle(angle: f64) -> f64 {
        if angle.is_nan() || angle.is_infinite() {
            return 0.0;
        }
        let mut a = angle.rem_euclid(2.0 * PI);
        if a > PI {
            a -= 2.0 * PI;
        }
        a
    }
}

/// Reduce an exponent in half turns to `(-1, 1]`.
fn normalize_half_turns(t: f64) -> f64 {
    Unitary2x2::normalize_angle(t * PI) / PI
}

impl Default for Unitary2x2 {
    fn default() -> Self {
        Self::identity()
    }
}

impl std::ops::Mul for Unitary2x2 {
    type Output = Self;

    #[allow(clippy::needless_pass_by_value)]
    fn mul(self, rhs: Self) -> Self::Output {
        Unitary2x2::mul(&self, &rhs)
    }
}
