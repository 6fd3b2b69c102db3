//! Error types for the compilation crate.

use thiserror::Error;

/// Errors that can occur while matching and lowering.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// Error from the IR crate.
    #[error("IR error: {0}")]
    Ir(#[from] larch_ir::IrError),

    /// Input matrix does not describe a qubit operator.
    #[error("Invalid matrix: {0}")]
    InvalidMatrix(String),

    /// Number of target qubits does not fit the matrix dimension.
    #[error("Matrix of dimension {dim} acts on {expected} qubits, got {got} targets")]
    QubitCountMismatch {
        /// Matrix side length.
        dim: usize,
        /// Qubits implied by the dimension.
        expected: u32,
        /// Targets supplied.
        got: usize,
    },

    /// Gate not in target basis.
    #[error("Gate '{0}' not in target basis")]
    GateNotInBasis(String),

    /// Lowered circuit failed verification.
    #[error("Verification failed for '{gate}': {reason}")]
    VerificationFailed {
        /// Gate that was lowered.
        gate: String,
        /// What went wrong.
        reason: String,
    },

    /// Invalid pipeline configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

/// Result type for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;
