//! Toffoli-family networks.

use std::f64::consts::FRAC_PI_4;

use larch_ir::GridQubit;

use super::builder::SycamoreBuilder;
use crate::unitary::Unitary2x2;

/// Doubly-controlled Z: six CX with T and T† phases.
pub(crate) fn ccz(builder: &mut SycamoreBuilder, a: GridQubit, b: GridQubit, c: GridQubit) {
    let t = Unitary2x2::p(FRAC_PI_4);
    let tdg = Unitary2x2::p(-FRAC_PI_4);

    builder.cx(b, c);
    builder.single(c, tdg);
    builder.cx(a, c);
    builder.single(c, t);
    builder.cx(b, c);
    builder.single(c, tdg);
    builder.cx(a, c);
    builder.single(b, t);
    builder.single(c, t);
    builder.cx(a, b);
    builder.single(a, t);
    builder.single(b, tdg);
    builder.cx(a, b);
}

/// Toffoli with controls `a`, `b` and target `c`.
pub(crate) fn ccx(builder: &mut SycamoreBuilder, a: GridQubit, b: GridQubit, c: GridQubit) {
    builder.single(c, Unitary2x2::h());
    ccz(builder, a, b, c);
    builder.single(c, Unitary2x2::h());
}

/// Fredkin: swap `b` and `c` when `a` is set.
pub(crate) fn cswap(builder: &mut SycamoreBuilder, a: GridQubit, b: GridQubit, c: GridQubit) {
    builder.cx(c, b);
    ccx(builder, a, b, c);
    builder.cx(c, b);
}
