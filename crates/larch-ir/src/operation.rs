//! Operations: gates bound to qubits.

use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::{Gate, StandardGate};
use crate::qubit::GridQubit;

/// A gate applied to an ordered tuple of qubits.
///
/// Operand order is significant: the first qubit is the most significant
/// index of the gate's unitary (the control of a CX, for example).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    /// The gate.
    pub gate: Gate,
    /// Qubits this operation acts on.
    pub qubits: Vec<GridQubit>,
}

impl Operation {
    /// Bind a gate to qubits, checking arity and distinctness.
    pub fn new(gate: impl Into<Gate>, qubits: impl IntoIterator<Item = GridQubit>) -> IrResult<Self> {
        let gate = gate.into();
        let qubits: Vec<_> = qubits.into_iter().collect();

        let got = u32::try_from(qubits.len()).unwrap_or(u32::MAX);
        if got != gate.num_qubits() {
            return Err(IrError::QubitCountMismatch {
                gate_name: gate.name().to_string(),
                expected: gate.num_qubits(),
                got,
            });
        }

        for (i, q) in qubits.iter().enumerate() {
            if qubits[..i].contains(q) {
                return Err(IrError::DuplicateQubit {
                    qubit: *q,
                    gate_name: Some(gate.name().to_string()),
                });
            }
        }

        Ok(Self { gate, qubits })
    }

    /// Single-qubit standard gate on `qubit`.
    pub fn single_qubit_gate(gate: StandardGate, qubit: GridQubit) -> Self {
        Self {
            gate: gate.into(),
            qubits: vec![qubit],
        }
    }

    /// Two-qubit standard gate on `(q1, q2)`.
    ///
    /// Callers guarantee `q1 != q2`; use [`Operation::new`] for unchecked input.
    pub fn two_qubit_gate(gate: StandardGate, q1: GridQubit, q2: GridQubit) -> Self {
        Self {
            gate: gate.into(),
            qubits: vec![q1, q2],
        }
    }

    /// Get the name of the operation's gate.
    pub fn name(&self) -> &str {
        self.gate.name()
    }

    /// Number of qubits the operation touches.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }
}
