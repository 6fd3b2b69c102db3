//! The gate-set translator seam.

use larch_ir::Operation;

use crate::error::CompileResult;
use crate::gate_set::GateSet;

/// Rewrites operations into a target's native gate vocabulary.
///
/// A translator consumes one operation and returns an equivalent sequence
/// (equal unitary up to global phase) made only of gates in
/// [`GateSetTranslator::gate_set`]. Translators are stateless; the lowering
/// pipeline holds one behind a trait object so tests can substitute their own.
pub trait GateSetTranslator: Send + Sync {
    /// Get the name of this translator.
    fn name(&self) -> &str;

    /// The gates this translator emits.
    fn gate_set(&self) -> &GateSet;

    /// Translate one operation.
    ///
    /// Failures propagate to the caller unchanged.
    fn translate(&self, operation: &Operation) -> CompileResult<Vec<Operation>>;
}
