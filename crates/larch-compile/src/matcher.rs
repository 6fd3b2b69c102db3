//! Recognizing unitaries as catalog gates.
//!
//! [`GateMatcher`] compares a matrix against the identity and then, in a
//! fixed order, against the two- and three-qubit catalog. Unmatched one- and
//! two-qubit matrices become a [`MatrixGate`]; anything larger is
//! [`MatchOutcome::Unsupported`].
//!
//! # Example
//!
//! ```rust
//! use larch_compile::{GateMatcher, MatchOutcome};
//! use larch_ir::StandardGate;
//!
//! let matcher = GateMatcher::new();
//! let outcome = matcher.match_unitary(&StandardGate::CZ.unitary()).unwrap();
//!
//! let MatchOutcome::Matched(gate) = outcome else { panic!() };
//! assert_eq!(gate.as_standard(), Some(&StandardGate::CZ));
//! ```

use tracing::debug;

use larch_ir::{Gate, IrError, Matrix, MatrixGate, StandardGate, matrix};

use crate::error::{CompileError, CompileResult};

/// A named catalog entry.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    /// Name the entry is listed under.
    pub alias: &'static str,
    /// The gate it resolves to.
    pub gate: StandardGate,
}

/// The gate catalog, in matching order.
///
/// Aliases resolve to the same gate, so the first listed wins but the
/// choice is not observable in the unitary.
pub const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        alias: "CNOT",
        gate: StandardGate::CX,
    },
    CatalogEntry {
        alias: "CX",
        gate: StandardGate::CX,
    },
    CatalogEntry {
        alias: "CZ",
        gate: StandardGate::CZ,
    },
    CatalogEntry {
        alias: "SWAP",
        gate: StandardGate::Swap,
    },
    CatalogEntry {
        alias: "ISWAP",
        gate: StandardGate::ISwap,
    },
    CatalogEntry {
        alias: "SYC",
        gate: StandardGate::Syc,
    },
    CatalogEntry {
        alias: "CCNOT",
        gate: StandardGate::CCX,
    },
    CatalogEntry {
        alias: "CCX",
        gate: StandardGate::CCX,
    },
    CatalogEntry {
        alias: "CCZ",
        gate: StandardGate::CCZ,
    },
    CatalogEntry {
        alias: "CSWAP",
        gate: StandardGate::CSwap,
    },
    CatalogEntry {
        alias: "FREDKIN",
        gate: StandardGate::CSwap,
    },
];

/// How a matrix is compared with catalog unitaries.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MatchPolicy {
    /// Element-wise equality.
    #[default]
    Exact,
    /// Equality up to a global phase, within `atol` per element.
    UpToGlobalPhase {
        /// Absolute tolerance.
        atol: f64,
    },
}

impl MatchPolicy {
    fn matches(self, candidate: &Matrix, reference: &Matrix) -> bool {
        match self {
            MatchPolicy::Exact => matrix::exactly_equal(candidate, reference),
            MatchPolicy::UpToGlobalPhase { atol } => {
                matrix::equal_up_to_global_phase(candidate, reference, atol)
            }
        }
    }
}

/// Result of matching a matrix.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchOutcome {
    /// A gate representing the matrix.
    Matched(Gate),
    /// No catalog gate matched and the matrix is too large to wrap.
    Unsupported,
}

impl MatchOutcome {
    /// Check if the matrix was not supported.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, MatchOutcome::Unsupported)
    }

    /// The matched gate, if any.
    pub fn gate(&self) -> Option<&Gate> {
        match self {
            MatchOutcome::Matched(gate) => Some(gate),
            MatchOutcome::Unsupported => None,
        }
    }
}

/// Largest arity wrapped as a [`MatrixGate`] when the catalog has no match.
pub const MAX_MATRIX_GATE_QUBITS: u32 = 2;

/// Matches unitaries against the gate catalog.
#[derive(Debug, Clone)]
pub struct GateMatcher {
    policy: MatchPolicy,
    /// Catalog entries with their unitaries, in matching order.
    entries: Vec<(&'static CatalogEntry, Matrix)>,
}

impl GateMatcher {
    /// Create a matcher using exact equality.
    pub fn new() -> Self {
        Self::with_policy(MatchPolicy::Exact)
    }

    /// Create a matcher with the given comparison policy.
    pub fn with_policy(policy: MatchPolicy) -> Self {
        Self {
            policy,
            entries: CATALOG
                .iter()
                .map(|entry| (entry, entry.gate.unitary()))
                .collect(),
        }
    }

    /// The comparison policy in use.
    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Identify `unitary` as a gate.
    ///
    /// Fails only when the matrix is not square with a power-of-two side of
    /// at least 2.
    pub fn match_unitary(&self, unitary: &Matrix) -> CompileResult<MatchOutcome> {
        let num_qubits = matrix::num_qubits_of(unitary).map_err(|e| match e {
            IrError::InvalidMatrix(reason) => CompileError::InvalidMatrix(reason),
            other => other.into(),
        })?;

        if self.policy.matches(unitary, &matrix::identity(num_qubits)) {
            debug!("Matched {num_qubits}-qubit identity");
            return Ok(MatchOutcome::Matched(Gate::standard(
                StandardGate::Identity(num_qubits),
            )));
        }

        let hit = self
            .entries
            .iter()
            .filter(|(entry, _)| entry.gate.num_qubits() == num_qubits)
            .find(|(_, reference)| self.policy.matches(unitary, reference));
        if let Some((entry, _)) = hit {
            debug!("Matched catalog gate {}", entry.alias);
            return Ok(MatchOutcome::Matched(
                Gate::standard(entry.gate.clone()).with_label(entry.alias),
            ));
        }

        if num_qubits <= MAX_MATRIX_GATE_QUBITS {
            debug!("No catalog match, wrapping {num_qubits}-qubit matrix gate");
            return Ok(MatchOutcome::Matched(Gate::matrix(MatrixGate::new(unitary)?)));
        }

        debug!("No catalog match for {num_qubits}-qubit matrix, unsupported");
        Ok(MatchOutcome::Unsupported)
    }
}

impl Default for GateMatcher {
    fn default() -> Self {
        Self::new()
    }
}
