//! Lower command implementation.
//!
//! `larch lower --input <matrices.json> [--output <report.json>] [--config <larch.yaml>] [--row R]`

use std::fs;

use anyhow::{Context, Result};
use console::style;
use serde::{Deserialize, Serialize};
use tracing::info;

use larch_compile::{LoweringOutcome, LoweringPipeline};
use larch_ir::{Circuit, GridQubit, matrix};

use crate::config::LarchConfig;
use crate::input::MatrixBatch;

/// JSON report written by `larch lower`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoweringReport {
    /// Matching policy in effect.
    pub policy: String,
    /// Whether circuits were verified against their input.
    pub verified: bool,
    /// Lowered matrices, in input order.
    pub circuits: Vec<LoweredEntry>,
    /// Names of matrices that matched nothing.
    pub unsupported: Vec<String>,
}

/// One lowered matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoweredEntry {
    pub name: String,
    pub num_qubits: u32,
    /// Gate the matrix matched, or its catalog alias.
    pub gate: String,
    pub syc_count: usize,
    pub depth: usize,
    pub circuit: Circuit,
}

impl LoweringReport {
    /// Total SYC gates across all circuits.
    pub fn total_syc(&self) -> usize {
        self.circuits.iter().map(|e| e.syc_count).sum()
    }
}

/// Execute the lower command.
pub fn execute(input: &str, output: Option<&str>, row: i32, config: &LarchConfig) -> Result<()> {
    eprintln!(
        "{} Lowering matrices from {} onto row {}",
        style("→").cyan().bold(),
        style(input).green(),
        style(row).yellow()
    );

    let batch = MatrixBatch::from_file(input)?;
    let pipeline = config.pipeline()?;
    let report = lower_batch(&pipeline, &batch, row, config)?;

    let json = serde_json::to_string_pretty(&report)?;
    if let Some(output_path) = output {
        fs::write(output_path, &json)
            .with_context(|| format!("Failed to write file: {output_path}"))?;
        eprintln!(
            "{} Report written to {}",
            style("OK").green().bold(),
            output_path
        );
    } else {
        println!("{json}");
    }

    eprintln!();
    eprintln!("{}", style("Lowering Summary").bold().underlined());
    eprintln!("  Policy:      {}", report.policy);
    eprintln!(
        "  Lowered:     {} of {} matrices",
        report.circuits.len(),
        batch.matrices.len()
    );
    for entry in &report.circuits {
        eprintln!(
            "    {} {:<12} {} qubits, {} SYC, depth {} ({})",
            style("✓").green(),
            entry.name,
            entry.num_qubits,
            entry.syc_count,
            entry.depth,
            entry.gate
        );
    }
    if !report.unsupported.is_empty() {
        eprintln!(
            "  Unsupported: {}",
            style(report.unsupported.join(", ")).yellow()
        );
    }
    eprintln!("  Total SYC:   {}", report.total_syc());

    Ok(())
}

/// Lower every matrix in `batch` onto `q(row, 0) .. q(row, n-1)`.
///
/// Unsupported matrices are recorded by name and skipped; any other
/// failure aborts the batch.
pub fn lower_batch(
    pipeline: &LoweringPipeline,
    batch: &MatrixBatch,
    row: i32,
    config: &LarchConfig,
) -> Result<LoweringReport> {
    let mut report = LoweringReport {
        policy: config.matching.policy.clone(),
        verified: pipeline.verify_tolerance().is_some(),
        circuits: Vec::new(),
        unsupported: Vec::new(),
    };

    for named in &batch.matrices {
        let unitary = named.to_matrix()?;
        let num_qubits =
            matrix::num_qubits_of(&unitary).with_context(|| format!("Matrix '{}'", named.name))?;
        let targets = GridQubit::line(row, 0, num_qubits);

        let lowered = pipeline
            .lower(&targets, &unitary)
            .with_context(|| format!("Failed to lower '{}'", named.name))?;

        match lowered.outcome {
            LoweringOutcome::Circuit(circuit) => {
                report.circuits.push(LoweredEntry {
                    name: named.name.clone(),
                    num_qubits,
                    gate: circuit.name().to_string(),
                    syc_count: circuit.count("syc"),
                    depth: circuit.depth(),
                    circuit,
                });
            }
            LoweringOutcome::Unsupported => {
                info!("Skipping unsupported matrix '{}'", named.name);
                report.unsupported.push(named.name.clone());
            }
        }
    }

    info!(
        "Lowered {} matrices, {} unsupported",
        report.circuits.len(),
        report.unsupported.len()
    );

    Ok(report)
}
