//! Checks on lowered circuits.
//!
//! A lowering is correct when every operation belongs to the target gate set
//! and the circuit's unitary, read in target-qubit order, equals the input
//! matrix up to a global phase.

use rustc_hash::FxHashSet;
use serde::Serialize;
use tracing::debug;

use larch_ir::{Circuit, GridQubit, Matrix, matrix};

use crate::error::CompileResult;
use crate::gate_set::GateSet;

/// Result of verifying a lowered circuit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerificationReport {
    /// Whether both checks passed.
    pub passed: bool,
    /// Whether every operation is in the gate set.
    pub in_gate_set: bool,
    /// Names of operations outside the gate set, in first-seen order.
    pub foreign_gates: Vec<String>,
    /// Largest element deviation from the input after phase alignment.
    pub max_deviation: f64,
    /// Tolerance the deviation was checked against.
    pub tolerance: f64,
}

impl VerificationReport {
    /// Describe why verification failed, if it did.
    pub fn failure_reason(&self) -> Option<String> {
        if self.passed {
            return None;
        }
        if !self.in_gate_set {
            return Some(format!(
                "operations outside the gate set: {}",
                self.foreign_gates.join(", ")
            ));
        }
        Some(format!(
            "unitary deviates by {:.3e} (tolerance {:.1e})",
            self.max_deviation, self.tolerance
        ))
    }
}

/// Verify that `circuit` implements `unitary` on `targets` using only
/// gates from `gate_set`.
///
/// Fails only when `circuit` and `targets` name different qubits.
pub fn verify_lowering(
    circuit: &Circuit,
    targets: &[GridQubit],
    unitary: &Matrix,
    gate_set: &GateSet,
    atol: f64,
) -> CompileResult<VerificationReport> {
    let mut seen = FxHashSet::default();
    let mut foreign_gates: Vec<String> = Vec::new();
    for op in circuit.operations() {
        if !gate_set.accepts(op) && seen.insert(op.name()) {
            foreign_gates.push(op.name().to_string());
        }
    }
    let in_gate_set = foreign_gates.is_empty();

    let actual = circuit.unitary_on(targets)?;
    let max_deviation = matrix::phase_deviation(&actual, unitary);
    let passed = in_gate_set && max_deviation <= atol;

    debug!(
        "Verified {}: in_gate_set={in_gate_set}, max_deviation={max_deviation:.3e}",
        circuit.name()
    );

    Ok(VerificationReport {
        passed,
        in_gate_set,
        foreign_gates,
        max_deviation,
        tolerance: atol,
    })
}
