//! Catalog command implementation.

use console::style;

use larch_compile::{CATALOG, GateSet, matcher::MAX_MATRIX_GATE_QUBITS};

/// Execute the catalog command.
pub fn execute() {
    println!(
        "{} Gate catalog, in matching order:\n",
        style("Larch").cyan().bold()
    );

    println!("  {:>2}  {:<8} {:<6} {}", "#", "Alias", "Gate", "Qubits");
    for (i, entry) in CATALOG.iter().enumerate() {
        println!(
            "  {:>2}  {:<8} {:<6} {}",
            i + 1,
            style(entry.alias).bold(),
            entry.gate.name(),
            entry.gate.num_qubits()
        );
    }

    println!();
    println!("  Identity matrices match before the catalog.");
    println!(
        "  Unmatched matrices on up to {MAX_MATRIX_GATE_QUBITS} qubits are lowered as matrix gates."
    );
    println!(
        "  Target gate set: {}",
        style(GateSet::sycamore().gates().join(", ")).green()
    );
}
