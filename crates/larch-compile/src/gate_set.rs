//! Hardware-native gate vocabularies.

use serde::{Deserialize, Serialize};

use larch_ir::Operation;

/// Set of gate names a target executes natively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateSet {
    /// Human-readable name of the target.
    name: String,
    /// List of gate names in the set.
    gates: Vec<String>,
}

impl GateSet {
    /// Create a new gate set.
    pub fn new(
        name: impl Into<String>,
        gates: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            gates: gates.into_iter().map(std::convert::Into::into).collect(),
        }
    }

    /// Google Sycamore: `PhasedXZ` plus the Sycamore gate.
    pub fn sycamore() -> Self {
        Self::new("sycamore", ["phxz", "syc"])
    }

    /// Name of the target.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Check if a gate is in the set.
    pub fn contains(&self, gate: &str) -> bool {
        self.gates.iter().any(|g| g == gate)
    }

    /// Check if an operation's gate is in the set.
    pub fn accepts(&self, operation: &Operation) -> bool {
        self.contains(operation.name())
    }

    /// Get the gate names.
    pub fn gates(&self) -> &[String] {
        &self.gates
    }
}
