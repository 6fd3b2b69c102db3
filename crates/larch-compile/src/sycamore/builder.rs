//! Operation stream in the Sycamore gate set.

use larch_ir::{GridQubit, Operation, StandardGate};

use crate::unitary::Unitary2x2;

/// `CZ` as two Sycamore gates: three layers of `PhasedXZ (x, z, a)` pairs
/// on `(q0, q1)` with a `SYC(q0, q1)` between consecutive layers.
const CZ_LAYERS: [[[f64; 3]; 2]; 3] = [
    [
        [-1.0, 0.426_247_846_385_437_3, 0.616_437_999_862_716_5],
        [-0.413_654_065_425_682_56, 0.498_808_386_451_46, -0.313_866_375_498_572_6],
    ],
    [
        [0.522_873_301_501_334_4, 1.070_132_956_633_389_5, -0.898_391_322_380_446],
        [-1.0, 0.494_089_199_842_445_3, -0.096_634_323_116_609_09],
    ],
    [
        [0.0, -1.141_696_707_498_357, 0.0],
        [0.586_345_934_574_317_5, 0.097_725_323_581_817_22, 1.088_408_300_919_610_2],
    ],
];

/// Accumulates Sycamore-native operations.
///
/// Single-qubit unitaries are held per qubit and multiplied together until a
/// two-qubit gate touches that qubit; the product is then emitted as one
/// `PhasedXZ`, or dropped when it is the identity up to phase.
#[derive(Debug, Default)]
pub(crate) struct SycamoreBuilder {
    operations: Vec<Operation>,
    pending: Vec<(GridQubit, Unitary2x2)>,
}

impl SycamoreBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Apply a single-qubit unitary after everything already on `qubit`.
    pub(crate) fn single(&mut self, qubit: GridQubit, unitary: Unitary2x2) {
        if let Some((_, acc)) = self.pending.iter_mut().find(|(q, _)| *q == qubit) {
            *acc = unitary * *acc;
        } else {
            self.pending.push((qubit, unitary));
        }
    }

    fn flush(&mut self, qubit: GridQubit) {
        let Some(pos) = self.pending.iter().position(|(q, _)| *q == qubit) else {
            return;
        };
        let (_, unitary) = self.pending.remove(pos);
        if !unitary.is_identity() {
            self.operations
                .push(Operation::single_qubit_gate(unitary.to_phased_xz(), qubit));
        }
    }

    pub(crate) fn syc(&mut self, q0: GridQubit, q1: GridQubit) {
        self.flush(q0);
        self.flush(q1);
        self.operations
            .push(Operation::two_qubit_gate(StandardGate::Syc, q0, q1));
    }

    pub(crate) fn cz(&mut self, q0: GridQubit, q1: GridQubit) {
        for (i, [p0, p1]) in CZ_LAYERS.iter().enumerate() {
            if i > 0 {
                self.syc(q0, q1);
            }
            self.single(q0, Unitary2x2::phased_xz(p0[0], p0[1], p0[2]));
            self.single(q1, Unitary2x2::phased_xz(p1[0], p1[1], p1[2]));
        }
    }

    // CX = H · CZ · H (on target)
    pub(crate) fn cx(&mut self, control: GridQubit, target: GridQubit) {
        self.single(target, Unitary2x2::h());
        self.cz(control, target);
        self.single(target, Unitary2x2::h());
    }

    pub(crate) fn finish(mut self) -> Vec<Operation> {
        let qubits: Vec<_> = self.pending.iter().map(|(q, _)| *q).collect();
        for q in qubits {
            self.flush(q);
        }
        self.operations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use larch_ir::Circuit;
    use larch_ir::matrix::{equal_up_to_global_phase, phase_deviation};

    fn pair() -> (GridQubit, GridQubit) {
        (GridQubit::new(0, 0), GridQubit::new(0, 1))
    }

    fn unitary_of(qubits: &[GridQubit], ops: Vec<Operation>) -> larch_ir::Matrix {
        let mut circuit = Circuit::with_qubits("t", qubits.iter().copied());
        circuit.extend(ops).unwrap();
        circuit.unitary()
    }

    #[test]
    fn test_cz_uses_two_syc() {
        let (a, b) = pair();
        let mut builder = SycamoreBuilder::new();
        builder.cz(a, b);
        let ops = builder.finish();

        assert_eq!(ops.iter().filter(|op| op.name() == "syc").count(), 2);
        assert!(ops.iter().all(|op| op.name() == "syc" || op.name() == "phxz"));

        let u = unitary_of(&[a, b], ops);
        assert!(phase_deviation(&u, &StandardGate::CZ.unitary()) < 1e-10);
    }

    #[test]
    fn test_cx_is_directed() {
        let (a, b) = pair();
        let mut builder = SycamoreBuilder::new();
        builder.cx(b, a);
        let u = unitary_of(&[b, a], builder.finish());
        assert!(equal_up_to_global_phase(&u, &StandardGate::CX.unitary(), 1e-10));
    }

    #[test]
    fn test_singles_merge_and_cancel() {
        let (a, _) = pair();
        let mut builder = SycamoreBuilder::new();
        builder.single(a, Unitary2x2::h());
        builder.single(a, Unitary2x2::h());
        assert!(builder.finish().is_empty());

        let mut builder = SycamoreBuilder::new();
        builder.single(a, Unitary2x2::h());
        builder.single(a, Unitary2x2::x());
        let ops = builder.finish();
        assert_eq!(ops.len(), 1);
        assert_eq!(ops[0].name(), "phxz");
    }

    #[test]
    fn test_pending_flushes_before_syc() {
        let (a, b) = pair();
        let mut builder = SycamoreBuilder::new();
        builder.single(a, Unitary2x2::x());
        builder.syc(a, b);
        let ops = builder.finish();
        let names: Vec<_> = ops.iter().map(Operation::name).collect();
        assert_eq!(names, ["phxz", "syc"]);
    }
}
