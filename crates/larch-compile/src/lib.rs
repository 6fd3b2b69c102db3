//! Larch Gate Matching and Lowering
//!
//! This crate turns a small unitary matrix into a circuit of hardware-native
//! operations. It matches the matrix against a fixed gate catalog, wraps
//! unmatched one- and two-qubit matrices as matrix gates, and hands the
//! resulting operation to a gate-set translator.
//!
//! # Architecture
//!
//! ```text
//! targets + matrix
//!       │
//!       ▼
//! ┌─────────────┐
//! │ GateMatcher │ ── Unsupported ──► (Unsupported, [])
//! └─────────────┘
//!       │ Gate
//!       ▼
//! ┌───────────────────┐
//! │ GateSetTranslator │ ◄── SycamoreTranslator (PhasedXZ + SYC)
//! └───────────────────┘
//!       │
//!       ├── optional verify_lowering
//!       ▼
//! (Circuit, [])
//! ```
//!
//! # Example
//!
//! ```rust
//! use larch_compile::{LoweringPipeline, MatchPolicy};
//! use larch_ir::{GridQubit, StandardGate};
//!
//! let pipeline = LoweringPipeline::builder()
//!     .with_policy(MatchPolicy::UpToGlobalPhase { atol: 1e-9 })
//!     .with_verification(1e-6)
//!     .build()
//!     .unwrap();
//!
//! let targets = GridQubit::line(0, 0, 2);
//! let lowered = pipeline.lower(&targets, &StandardGate::Swap.unitary()).unwrap();
//! assert_eq!(lowered.circuit().unwrap().count("syc"), 6);
//! ```
//!
//! # Custom Translators
//!
//! Implement [`GateSetTranslator`] to target another gate set:
//!
//! ```rust
//! use larch_compile::{CompileResult, GateSet, GateSetTranslator};
//! use larch_ir::Operation;
//!
//! struct Passthrough(GateSet);
//!
//! impl GateSetTranslator for Passthrough {
//!     fn name(&self) -> &str { "passthrough" }
//!     fn gate_set(&self) -> &GateSet { &self.0 }
//!
//!     fn translate(&self, op: &Operation) -> CompileResult<Vec<Operation>> {
//!         Ok(vec![op.clone()])
//!     }
//! }
//! ```

pub mod error;
pub mod gate_set;
pub mod lowering;
pub mod matcher;
pub mod sycamore;
pub mod translator;
pub mod unitary;
pub mod verification;

pub use error::{CompileError, CompileResult};
pub use gate_set::GateSet;
pub use lowering::{
    Lowered, LoweringOutcome, LoweringPipeline, LoweringPipelineBuilder,
    matrix_to_sycamore_operations,
};
pub use matcher::{CATALOG, CatalogEntry, GateMatcher, MatchOutcome, MatchPolicy};
pub use sycamore::SycamoreTranslator;
pub use translator::GateSetTranslator;
pub use unitary::Unitary2x2;
pub use verification::{VerificationReport, verify_lowering};
