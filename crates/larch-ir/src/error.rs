//! Errors raised while building operations and circuits.

use crate::qubit::GridQubit;
use thiserror::Error;

/// Errors from the circuit IR.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IrError {
    /// An operand is not declared on the circuit.
    #[error("Qubit {qubit} not found in circuit{}", format_gate_context(.gate_name))]
    QubitNotFound {
        /// The undeclared qubit.
        qubit: GridQubit,
        /// Gate being applied, if known.
        gate_name: Option<String>,
    },

    /// Operand count does not match the gate's arity.
    #[error("Gate '{gate_name}' requires {expected} qubits, got {got}")]
    QubitCountMismatch {
        /// Name of the gate.
        gate_name: String,
        /// Arity of the gate.
        expected: u32,
        /// Operands supplied.
        got: u32,
    },

    /// The same qubit appears twice among the operands.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: GridQubit,
        /// Gate being applied, if known.
        gate_name: Option<String>,
    },

    /// Matrix shape does not describe a qubit operator.
    #[error("Invalid matrix: {0}")]
    InvalidMatrix(String),
}

/// Suffix naming the gate, when known.
#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result alias for [`IrError`].
pub type IrResult<T> = Result<T, IrError>;
