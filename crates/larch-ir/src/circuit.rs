//! Circuits as ordered operation sequences.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::{IrError, IrResult};
use crate::gate::StandardGate;
use crate::matrix::{self, Matrix};
use crate::operation::Operation;
use crate::qubit::GridQubit;

/// A quantum circuit.
///
/// Operations are kept in application order over a declared list of
/// qubits. The qubit list also fixes the index order of [`Circuit::unitary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Name of the circuit.
    name: String,
    /// Qubits in the circuit.
    qubits: Vec<GridQubit>,
    /// Operations in application order.
    operations: Vec<Operation>,
}

impl Circuit {
    /// Create a new empty circuit.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            qubits: vec![],
            operations: vec![],
        }
    }

    /// Create an empty circuit over the given qubits.
    pub fn with_qubits(name: impl Into<String>, qubits: impl IntoIterator<Item = GridQubit>) -> Self {
        let mut circuit = Self::new(name);
        for q in qubits {
            circuit.add_qubit(q);
        }
        circuit
    }

    /// Add a qubit. Returns `false` if it was already present.
    pub fn add_qubit(&mut self, qubit: GridQubit) -> bool {
        if self.qubits.contains(&qubit) {
            return false;
        }
        self.qubits.push(qubit);
        true
    }

    /// Append an operation.
    ///
    /// Every operand must already belong to the circuit.
    pub fn append(&mut self, operation: Operation) -> IrResult<&mut Self> {
        if let Some(missing) = operation.qubits.iter().find(|q| !self.qubits.contains(q)) {
            return Err(IrError::QubitNotFound {
                qubit: *missing,
                gate_name: Some(operation.name().to_string()),
            });
        }
        self.operations.push(operation);
        Ok(self)
    }

    /// Append several operations in order.
    pub fn extend(&mut self, operations: impl IntoIterator<Item = Operation>) -> IrResult<&mut Self> {
        for op in operations {
            self.append(op)?;
        }
        Ok(self)
    }

    // =========================================================================
    // Native gates
    // =========================================================================

    /// Apply a phased XZ gate.
    pub fn phased_xz(&mut self, x: f64, z: f64, a: f64, qubit: GridQubit) -> IrResult<&mut Self> {
        self.append(Operation::single_qubit_gate(
            StandardGate::PhasedXZ { x, z, a },
            qubit,
        ))
    }

    /// Apply the Sycamore gate.
    pub fn syc(&mut self, q1: GridQubit, q2: GridQubit) -> IrResult<&mut Self> {
        self.append(Operation::new(StandardGate::Syc, [q1, q2])?)
    }

    /// Apply controlled-X.
    pub fn cx(&mut self, control: GridQubit, target: GridQubit) -> IrResult<&mut Self> {
        self.append(Operation::new(StandardGate::CX, [control, target])?)
    }

    /// Apply controlled-Z.
    pub fn cz(&mut self, q1: GridQubit, q2: GridQubit) -> IrResult<&mut Self> {
        self.append(Operation::new(StandardGate::CZ, [q1, q2])?)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Get the name of the circuit.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the qubits in the circuit.
    pub fn qubits(&self) -> &[GridQubit] {
        &self.qubits
    }

    /// Get the operations in application order.
    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    /// Get the number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.qubits.len()
    }

    /// Get the number of operations.
    pub fn num_ops(&self) -> usize {
        self.operations.len()
    }

    /// Check whether the circuit has no operations.
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Number of layers when every operation is scheduled as early as its
    /// qubits allow.
    pub fn depth(&self) -> usize {
        let mut frontier: FxHashMap<GridQubit, usize> = FxHashMap::default();
        let mut depth = 0;
        for op in &self.operations {
            let layer = op
                .qubits
                .iter()
                .map(|q| frontier.get(q).copied().unwrap_or(0))
                .max()
                .unwrap_or(0)
                + 1;
            for q in &op.qubits {
                frontier.insert(*q, layer);
            }
            depth = depth.max(layer);
        }
        depth
    }

    /// Count operations per gate name.
    pub fn count_ops(&self) -> FxHashMap<String, usize> {
        let mut counts = FxHashMap::default();
        for op in &self.operations {
            *counts.entry(op.name().to_string()).or_insert(0) += 1;
        }
        counts
    }

    /// Count operations with the given gate name.
    pub fn count(&self, name: &str) -> usize {
        self.operations.iter().filter(|op| op.name() == name).count()
    }

    /// Count operations touching two or more qubits.
    pub fn multi_qubit_count(&self) -> usize {
        self.operations
            .iter()
            .filter(|op| op.num_qubits() >= 2)
            .count()
    }

    /// Combined unitary, indexed by the circuit's own qubit order.
    pub fn unitary(&self) -> Matrix {
        let n = self.qubits.len();
        let mut total = matrix::identity(u32::try_from(n).unwrap_or(u32::MAX));
        for op in &self.operations {
            let positions: Vec<usize> = op
                .qubits
                .iter()
                .filter_map(|q| self.qubits.iter().position(|c| c == q))
                .collect();
            let lifted = matrix::embed(&op.gate.unitary(), &positions, n);
            total = lifted.dot(&total);
        }
        total
    }

    /// Combined unitary with indices ordered by `order`.
    ///
    /// `order` must list every qubit of the circuit exactly once.
    pub fn unitary_on(&self, order: &[GridQubit]) -> IrResult<Matrix> {
        let missing = self
            .qubits
            .iter()
            .find(|q| !order.contains(q))
            .or_else(|| order.iter().find(|q| !self.qubits.contains(q)));
        if let Some(q) = missing {
            return Err(IrError::QubitNotFound {
                qubit: *q,
                gate_name: None,
            });
        }
        for (i, q) in order.iter().enumerate() {
            if order[..i].contains(q) {
                return Err(IrError::DuplicateQubit {
                    qubit: *q,
                    gate_name: None,
                });
            }
        }

        let reordered = Circuit {
            name: self.name.clone(),
            qubits: order.to_vec(),
            operations: self.operations.clone(),
        };
        Ok(reordered.unitary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{allclose, equal_up_to_global_phase, exactly_equal};

    fn q(row: i32, col: i32) -> GridQubit {
        GridQubit::new(row, col)
    }

    #[test]
    fn test_circuit_creation() {
        let circuit = Circuit::with_qubits("empty", [q(0, 0), q(0, 1), q(0, 0)]);
        assert_eq!(circuit.name(), "empty");
        assert_eq!(circuit.num_qubits(), 2);
        assert!(circuit.is_empty());
        assert_eq!(circuit.depth(), 0);
        assert!(exactly_equal(&circuit.unitary(), &matrix::identity(2)));
    }

    #[test]
    fn test_append_rejects_foreign_qubit() {
        let mut circuit = Circuit::with_qubits("c", [q(0, 0), q(0, 1)]);
        let err = circuit.cz(q(0, 0), q(5, 5)).unwrap_err();
        assert!(matches!(err, IrError::QubitNotFound { .. }));
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_depth_and_counts() {
        let (a, b, c) = (q(0, 0), q(0, 1), q(0, 2));
        let mut circuit = Circuit::with_qubits("c", [a, b, c]);
        circuit.phased_xz(0.5, 0.0, 0.0, a).unwrap();
        circuit.phased_xz(0.5, 0.0, 0.0, c).unwrap();
        circuit.syc(a, b).unwrap();
        circuit.syc(b, c).unwrap();

        assert_eq!(circuit.num_ops(), 4);
        assert_eq!(circuit.depth(), 3);
        assert_eq!(circuit.count("syc"), 2);
        assert_eq!(circuit.count_ops().get("phxz"), Some(&2));
        assert_eq!(circuit.multi_qubit_count(), 2);
    }

    #[test]
    fn test_unitary_respects_operand_order() {
        let (a, b) = (q(0, 0), q(0, 1));
        let mut forward = Circuit::with_qubits("f", [a, b]);
        forward.cx(a, b).unwrap();
        let mut backward = Circuit::with_qubits("b", [a, b]);
        backward.cx(b, a).unwrap();

        let cx = StandardGate::CX.unitary();
        assert!(exactly_equal(&forward.unitary(), &cx));
        assert!(!allclose(&backward.unitary(), &cx, 1e-6));

        // Reading the reversed circuit in reversed qubit order recovers CX.
        assert!(exactly_equal(&backward.unitary_on(&[b, a]).unwrap(), &cx));
    }

    #[test]
    fn test_cz_cx_identity() {
        // (I ⊗ H) CZ (I ⊗ H) = CX, with H = PhasedXZ(x=0.5, z=1, a=-0.5) up to phase.
        let (a, b) = (q(1, 0), q(1, 1));
        let mut circuit = Circuit::with_qubits("cx", [a, b]);
        circuit.phased_xz(0.5, 1.0, -0.5, b).unwrap();
        circuit.cz(a, b).unwrap();
        circuit.phased_xz(0.5, 1.0, -0.5, b).unwrap();

        assert!(equal_up_to_global_phase(
            &circuit.unitary(),
            &StandardGate::CX.unitary(),
            1e-12
        ));
    }

    #[test]
    fn test_unitary_on_requires_every_qubit() {
        let (a, b) = (q(0, 0), q(0, 1));
        let circuit = Circuit::with_qubits("c", [a, b]);
        assert!(circuit.unitary_on(&[a]).is_err());
        assert!(circuit.unitary_on(&[a, q(3, 3)]).is_err());
        assert!(circuit.unitary_on(&[b, a]).is_ok());
    }

    #[test]
    fn test_circuit_serializes() {
        let (a, b) = (q(0, 0), q(0, 1));
        let mut circuit = Circuit::with_qubits("json", [a, b]);
        circuit.syc(a, b).unwrap();

        let json = serde_json::to_string(&circuit).unwrap();
        let back: Circuit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, circuit);
    }
}
