//! Matrix-to-circuit lowering.

use std::sync::LazyLock;

use tracing::{debug, info, instrument, warn};

use larch_ir::{Circuit, GridQubit, IrError, Matrix, Operation, matrix};

use crate::error::{CompileError, CompileResult};
use crate::matcher::{GateMatcher, MatchOutcome, MatchPolicy};
use crate::sycamore::SycamoreTranslator;
use crate::translator::GateSetTranslator;
use crate::verification::verify_lowering;

/// What a lowering produced.
#[derive(Debug, Clone, PartialEq)]
pub enum LoweringOutcome {
    /// The lowered circuit.
    Circuit(Circuit),
    /// The matrix matched no gate; nothing was lowered.
    Unsupported,
}

/// A lowering result plus the ancilla qubits it allocated.
///
/// No lowering allocates ancillas, so `ancillas` is always empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Lowered {
    /// Circuit or the unsupported marker.
    pub outcome: LoweringOutcome,
    /// Qubits allocated beyond the targets.
    pub ancillas: Vec<GridQubit>,
}

impl Lowered {
    fn unsupported() -> Self {
        Self {
            outcome: LoweringOutcome::Unsupported,
            ancillas: vec![],
        }
    }

    /// Check if the matrix was not supported.
    pub fn is_unsupported(&self) -> bool {
        matches!(self.outcome, LoweringOutcome::Unsupported)
    }

    /// The lowered circuit, if any.
    pub fn circuit(&self) -> Option<&Circuit> {
        match &self.outcome {
            LoweringOutcome::Circuit(circuit) => Some(circuit),
            LoweringOutcome::Unsupported => None,
        }
    }

    /// Split into outcome and ancillas.
    pub fn into_parts(self) -> (LoweringOutcome, Vec<GridQubit>) {
        (self.outcome, self.ancillas)
    }
}

/// Matches a matrix to a gate and translates it into a native circuit.
pub struct LoweringPipeline {
    matcher: GateMatcher,
    translator: Box<dyn GateSetTranslator>,
    /// Tolerance for post-lowering verification, if enabled.
    verify_tolerance: Option<f64>,
}

impl LoweringPipeline {
    /// Exact matching, the Sycamore translator, and no verification.
    pub fn new() -> Self {
        Self {
            matcher: GateMatcher::new(),
            translator: Box::new(SycamoreTranslator::new()),
            verify_tolerance: None,
        }
    }

    /// Start configuring a pipeline.
    pub fn builder() -> LoweringPipelineBuilder {
        LoweringPipelineBuilder::new()
    }

    /// The matcher in use.
    pub fn matcher(&self) -> &GateMatcher {
        &self.matcher
    }

    /// The translator in use.
    pub fn translator(&self) -> &dyn GateSetTranslator {
        self.translator.as_ref()
    }

    /// Verification tolerance, when verification is enabled.
    pub fn verify_tolerance(&self) -> Option<f64> {
        self.verify_tolerance
    }

    /// Lower `unitary` onto `targets`.
    ///
    /// `targets[0]` is the most significant qubit of `unitary`. Returns an
    /// unsupported [`Lowered`] rather than an error when no gate matches.
    #[instrument(skip_all, fields(targets = targets.len()))]
    pub fn lower(&self, targets: &[GridQubit], unitary: &Matrix) -> CompileResult<Lowered> {
        check_targets(targets, unitary)?;

        let gate = match self.matcher.match_unitary(unitary)? {
            MatchOutcome::Matched(gate) => gate,
            MatchOutcome::Unsupported => {
                debug!("Unsupported {}x{} matrix, skipping", unitary.nrows(), unitary.ncols());
                return Ok(Lowered::unsupported());
            }
        };

        let gate_name = gate.label.clone().unwrap_or_else(|| gate.name().to_string());
        let operation = Operation::new(gate, targets.iter().copied())?;
        let ops = self.translator.translate(&operation)?;

        let mut circuit = Circuit::with_qubits(gate_name.clone(), targets.iter().copied());
        circuit.extend(ops)?;

        if let Some(atol) = self.verify_tolerance {
            let report = verify_lowering(
                &circuit,
                targets,
                unitary,
                self.translator.gate_set(),
                atol,
            )?;
            if let Some(reason) = report.failure_reason() {
                warn!("Lowering of {gate_name} failed verification: {reason}");
                return Err(CompileError::VerificationFailed {
                    gate: gate_name,
                    reason,
                });
            }
        }

        info!(
            "Lowered {gate_name} via {}: {} operations, {} two-qubit, depth {}",
            self.translator.name(),
            circuit.num_ops(),
            circuit.multi_qubit_count(),
            circuit.depth()
        );

        Ok(Lowered {
            outcome: LoweringOutcome::Circuit(circuit),
            ancillas: vec![],
        })
    }
}

impl Default for LoweringPipeline {
    fn default() -> Self {
        Self::new()
    }
}

fn check_targets(targets: &[GridQubit], unitary: &Matrix) -> CompileResult<()> {
    let expected = matrix::num_qubits_of(unitary).map_err(|e| match e {
        IrError::InvalidMatrix(reason) => CompileError::InvalidMatrix(reason),
        other => other.into(),
    })?;
    if targets.len() != expected as usize {
        return Err(CompileError::QubitCountMismatch {
            dim: unitary.nrows(),
            expected,
            got: targets.len(),
        });
    }
    for (i, q) in targets.iter().enumerate() {
        if targets[..i].contains(q) {
            return Err(IrError::DuplicateQubit {
                qubit: *q,
                gate_name: None,
            }
            .into());
        }
    }
    Ok(())
}

/// Builder for [`LoweringPipeline`].
pub struct LoweringPipelineBuilder {
    policy: MatchPolicy,
    translator: Option<Box<dyn GateSetTranslator>>,
    verify_tolerance: Option<f64>,
}

impl LoweringPipelineBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            policy: MatchPolicy::Exact,
            translator: None,
            verify_tolerance: None,
        }
    }

    /// Set the matching policy.
    #[must_use]
    pub fn with_policy(mut self, policy: MatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Use a custom translator instead of the Sycamore one.
    #[must_use]
    pub fn with_translator(mut self, translator: impl GateSetTranslator + 'static) -> Self {
        self.translator = Some(Box::new(translator));
        self
    }

    /// Verify every lowered circuit against its input within `atol`.
    #[must_use]
    pub fn with_verification(mut self, atol: f64) -> Self {
        self.verify_tolerance = Some(atol);
        self
    }

    /// Build the pipeline, rejecting negative or non-finite tolerances.
    pub fn build(self) -> CompileResult<LoweringPipeline> {
        if let MatchPolicy::UpToGlobalPhase { atol } = self.policy {
            check_tolerance("matching", atol)?;
        }
        if let Some(atol) = self.verify_tolerance {
            check_tolerance("verification", atol)?;
        }

        Ok(LoweringPipeline {
            matcher: GateMatcher::with_policy(self.policy),
            translator: self
                .translator
                .unwrap_or_else(|| Box::new(SycamoreTranslator::new())),
            verify_tolerance: self.verify_tolerance,
        })
    }
}

impl Default for LoweringPipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn check_tolerance(what: &str, atol: f64) -> CompileResult<()> {
    if atol.is_finite() && atol >= 0.0 {
        Ok(())
    } else {
        Err(CompileError::InvalidConfiguration(format!(
            "{what} tolerance must be a non-negative number, got {atol}"
        )))
    }
}

static DEFAULT_PIPELINE: LazyLock<LoweringPipeline> = LazyLock::new(LoweringPipeline::new);

/// Lower `unitary` onto `targets` with exact matching and the Sycamore
/// translator.
///
/// # Example
///
/// ```rust
/// use larch_compile::matrix_to_sycamore_operations;
/// use larch_ir::{GridQubit, StandardGate};
///
/// let targets = GridQubit::line(0, 0, 2);
/// let lowered = matrix_to_sycamore_operations(&targets, &StandardGate::CZ.unitary()).unwrap();
///
/// let circuit = lowered.circuit().unwrap();
/// assert_eq!(circuit.count("syc"), 2);
/// assert!(lowered.ancillas.is_empty());
/// ```
pub fn matrix_to_sycamore_operations(
    targets: &[GridQubit],
    unitary: &Matrix,
) -> CompileResult<Lowered> {
    DEFAULT_PIPELINE.lower(targets, unitary)
}
