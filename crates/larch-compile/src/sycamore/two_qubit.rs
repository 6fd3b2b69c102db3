//! Generic two-qubit synthesis.
//!
//! The unitary is reduced to a diagonal by Givens rotations acting on pairs
//! of basis states that differ in one bit, visited in Gray-code order. Each
//! rotation is then a singly-controlled single-qubit gate, and the diagonal
//! is two phase gates plus a controlled phase. Controlled gates use the
//! `A·X·B·X·C` construction with two CX.

use larch_ir::{GridQubit, Matrix};

use super::builder::SycamoreBuilder;
use crate::unitary::Unitary2x2;

const GRAY: [usize; 4] = [0, 1, 3, 2];

/// Below this an entry is already eliminated.
const ZERO_TOLERANCE: f64 = 1e-12;

const EPSILON: f64 = 1e-10;

/// A rotation `g` applied to rows `(lo, hi)` during elimination.
struct Givens {
    lo: usize,
    hi: usize,
    g: Unitary2x2,
}

/// Emit `unitary` (a `4 × 4` matrix, `q0` most significant) into `builder`.
pub(crate) fn synthesize(
    builder: &mut SycamoreBuilder,
    unitary: &Matrix,
    q0: GridQubit,
    q1: GridQubit,
) {
    let mut w = unitary.clone();
    let mut rotations = Vec::new();

    for (c, &col) in GRAY.iter().enumerate().take(3) {
        for r in (c + 1..4).rev() {
            let (lo, hi) = (GRAY[r - 1], GRAY[r]);
            let (a, b) = (w[[lo, col]], w[[hi, col]]);
            if b.norm() < ZERO_TOLERANCE {
                continue;
            }
            let n = (a.norm_sqr() + b.norm_sqr()).sqrt();
            let g = Unitary2x2::new(a.conj() / n, b.conj() / n, -b / n, a / n);
            for j in 0..4 {
                let (x, y) = (w[[lo, j]], w[[hi, j]]);
                w[[lo, j]] = g.data[0] * x + g.data[1] * y;
                w[[hi, j]] = g.data[2] * x + g.data[3] * y;
            }
            rotations.push(Givens { lo, hi, g });
        }
    }

    // w = G_k ... G_1 · U is diagonal; emit the diagonal first.
    let d0 = w[[0, 0]];
    let phi: [f64; 4] = std::array::from_fn(|k| (w[[k, k]] / d0).arg());
    builder.single(q0, Unitary2x2::p(phi[2]));
    builder.single(q1, Unitary2x2::p(phi[1]));
    let lambda = Unitary2x2::normalize_angle(phi[3] - phi[1] - phi[2]);
    if lambda.abs() > EPSILON {
        controlled(builder, Unitary2x2::p(lambda), q0, q1, true);
    }

    let x = Unitary2x2::x();
    for rot in rotations.iter().rev() {
        let inverse = rot.g.dagger();
        // Rows differing in the high bit rotate q0 under control of q1.
        let (control, target, control_value, target_bit) = if rot.lo ^ rot.hi == 2 {
            (q1, q0, rot.lo & 1, (rot.lo >> 1) & 1)
        } else {
            (q0, q1, (rot.lo >> 1) & 1, rot.lo & 1)
        };
        let v = if target_bit == 0 {
            inverse
        } else {
            x * inverse * x
        };
        controlled(builder, v, control, target, control_value == 1);
    }
}

/// Controlled-`v`, firing when `control` is `|1⟩` (or `|0⟩` if `on_one` is false).
fn controlled(
    builder: &mut SycamoreBuilder,
    v: Unitary2x2,
    control: GridQubit,
    target: GridQubit,
    on_one: bool,
) {
    let (alpha, beta, gamma, phase) = v.zyz_decomposition();
    let a = Unitary2x2::rz(alpha) * Unitary2x2::ry(beta / 2.0);
    let b = Unitary2x2::ry(-beta / 2.0) * Unitary2x2::rz(-(gamma + alpha) / 2.0);
    let c = Unitary2x2::rz((gamma - alpha) / 2.0);

    if !on_one {
        builder.single(control, Unitary2x2::x());
    }
    builder.single(target, c);
    builder.cx(control, target);
    builder.single(target, b);
    builder.cx(control, target);
    builder.single(target, a);
    builder.single(control, Unitary2x2::p(phase));
    if !on_one {
        builder.single(control, Unitary2x2::x());
    }
}
