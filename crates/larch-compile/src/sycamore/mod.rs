//! Translation to the Google Sycamore gate set.
//!
//! The native vocabulary is `PhasedXZ` plus the Sycamore gate
//! `SYC = FSim(π/2, π/6)`. Rewrites:
//!
//! | Input | Output |
//! |-------|--------|
//! | `Identity(n)` | nothing |
//! | 1-qubit gate | one `PhasedXZ` |
//! | `CZ` | 2 `SYC` |
//! | `CX` | `H · CZ · H` on the target |
//! | `Swap` | 3 `CX` |
//! | `ISwap`, 2-qubit matrix | Givens synthesis |
//! | `CCZ`, `CCX`, `CSwap` | 6-`CX` Toffoli network |
//!
//! Adjacent single-qubit factors are merged, so every qubit carries at most
//! one `PhasedXZ` between consecutive `SYC` gates.

mod builder;
mod three_qubit;
mod two_qubit;

use tracing::debug;

use larch_ir::{GateKind, GridQubit, IrError, MatrixGate, Operation, StandardGate};

use crate::error::{CompileError, CompileResult};
use crate::gate_set::GateSet;
use crate::translator::GateSetTranslator;
use crate::unitary::Unitary2x2;

use builder::SycamoreBuilder;

/// Translator targeting the Sycamore gate set.
#[derive(Debug, Clone)]
pub struct SycamoreTranslator {
    gate_set: GateSet,
}

impl SycamoreTranslator {
    /// Create a new Sycamore translator.
    pub fn new() -> Self {
        Self {
            gate_set: GateSet::sycamore(),
        }
    }
}

impl Default for SycamoreTranslator {
    fn default() -> Self {
        Self::new()
    }
}

impl GateSetTranslator for SycamoreTranslator {
    fn name(&self) -> &str {
        "sycamore"
    }

    fn gate_set(&self) -> &GateSet {
        &self.gate_set
    }

    fn translate(&self, operation: &Operation) -> CompileResult<Vec<Operation>> {
        let gate = &operation.gate;
        let qubits = &operation.qubits;

        let got = u32::try_from(qubits.len()).unwrap_or(u32::MAX);
        if got != gate.num_qubits() {
            return Err(IrError::QubitCountMismatch {
                gate_name: gate.name().to_string(),
                expected: gate.num_qubits(),
                got,
            }
            .into());
        }

        if self.gate_set.accepts(operation) {
            return Ok(vec![operation.clone()]);
        }

        let mut builder = SycamoreBuilder::new();
        match &gate.kind {
            GateKind::Standard(g) => translate_standard(&mut builder, g, qubits)?,
            GateKind::Matrix(g) => translate_matrix(&mut builder, g, qubits)?,
        }
        let ops = builder.finish();

        debug!(
            "Translated {} on {} qubits into {} operations",
            gate.name(),
            qubits.len(),
            ops.len()
        );
        Ok(ops)
    }
}

fn translate_standard(
    builder: &mut SycamoreBuilder,
    gate: &StandardGate,
    qubits: &[GridQubit],
) -> CompileResult<()> {
    match gate {
        StandardGate::Identity(_) => {}

        StandardGate::X
        | StandardGate::H
        | StandardGate::T
        | StandardGate::Tdg
        | StandardGate::PhasedXZ { .. } => {
            let u = Unitary2x2::from_gate(gate)
                .ok_or_else(|| CompileError::GateNotInBasis(gate.name().to_string()))?;
            builder.single(qubits[0], u);
        }

        StandardGate::CZ => builder.cz(qubits[0], qubits[1]),
        StandardGate::CX => builder.cx(qubits[0], qubits[1]),
        StandardGate::Swap => {
            let (a, b) = (qubits[0], qubits[1]);
            builder.cx(a, b);
            builder.cx(b, a);
            builder.cx(a, b);
        }
        StandardGate::Syc => builder.syc(qubits[0], qubits[1]),
        StandardGate::ISwap => {
            two_qubit::synthesize(builder, &gate.unitary(), qubits[0], qubits[1]);
        }

        StandardGate::CCZ => three_qubit::ccz(builder, qubits[0], qubits[1], qubits[2]),
        StandardGate::CCX => three_qubit::ccx(builder, qubits[0], qubits[1], qubits[2]),
        StandardGate::CSwap => three_qubit::cswap(builder, qubits[0], qubits[1], qubits[2]),
    }
    Ok(())
}

fn translate_matrix(
    builder: &mut SycamoreBuilder,
    gate: &MatrixGate,
    qubits: &[GridQubit],
) -> CompileResult<()> {
    let unitary = gate.unitary();
    match gate.num_qubits() {
        1 => {
            let u = Unitary2x2::from_matrix(&unitary)
                .ok_or_else(|| CompileError::InvalidMatrix("expected a 2x2 matrix".into()))?;
            builder.single(qubits[0], u);
        }
        2 => two_qubit::synthesize(builder, &unitary, qubits[0], qubits[1]),
        n => {
            return Err(CompileError::GateNotInBasis(format!(
                "{n}-qubit matrix"
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use larch_ir::matrix::{equal_up_to_global_phase, identity};
    use larch_ir::{Circuit, Gate};

    fn run(gate: impl Into<Gate>, qubits: &[GridQubit]) -> CompileResult<Circuit> {
        let op = Operation::new(gate, qubits.iter().copied())?;
        let ops = SycamoreTranslator::new().translate(&op)?;
        let mut circuit = Circuit::with_qubits("t", qubits.iter().copied());
        circuit.extend(ops)?;
        Ok(circuit)
    }

    fn assert_native(circuit: &Circuit) {
        let gs = GateSet::sycamore();
        for op in circuit.operations() {
            assert!(gs.accepts(op), "non-native operation {}", op.name());
        }
    }

    #[test]
    fn test_every_standard_gate_translates() {
        let qubits = GridQubit::line(0, 0, 3);
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
        ] {
            let n = gate.num_qubits() as usize;
            let circuit = run(gate.clone(), &qubits[..n]).unwrap();
            assert_native(&circuit);
            assert!(
                equal_up_to_global_phase(&circuit.unitary(), &gate.unitary(), 1e-9),
                "{} translation is not equivalent",
                gate.name()
            );
        }
    }

    #[test]
    fn test_identity_translates_to_nothing() {
        let qubits = GridQubit::line(0, 0, 2);
        let circuit = run(StandardGate::Identity(2), &qubits).unwrap();
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_native_gates_pass_through() {
        let qubits = GridQubit::line(0, 0, 2);
        let circuit = run(StandardGate::Syc, &qubits).unwrap();
        assert_eq!(circuit.num_ops(), 1);
        assert_eq!(circuit.operations()[0].qubits, qubits);
    }

    #[test]
    fn test_syc_counts() {
        let qubits = GridQubit::line(0, 0, 2);
        assert_eq!(run(StandardGate::CZ, &qubits).unwrap().count("syc"), 2);
        assert_eq!(run(StandardGate::CX, &qubits).unwrap().count("syc"), 2);
        assert_eq!(run(StandardGate::Swap, &qubits).unwrap().count("syc"), 6);
    }

    #[test]
    fn test_three_qubit_matrix_is_rejected() {
        let qubits = GridQubit::line(0, 0, 3);
        let gate = MatrixGate::new(&identity(3)).unwrap();
        let err = run(gate, &qubits).unwrap_err();
        assert!(matches!(err, CompileError::GateNotInBasis(_)));
        assert_eq!(err.to_string(), "Gate '3-qubit matrix' not in target basis");
    }

    #[test]
    fn test_operand_arity_is_checked() {
        let qubits = GridQubit::line(0, 0, 3);
        let op = Operation {
            gate: StandardGate::CZ.into(),
            qubits: qubits.clone(),
        };
        let err = SycamoreTranslator::new().translate(&op).unwrap_err();
        assert!(matches!(err, CompileError::Ir(_)));
    }
}
