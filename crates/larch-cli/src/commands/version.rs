//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - unitary matching and Sycamore lowering",
        style("Larch").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  larch-ir       Grid qubits, gates and circuits");
    println!("  larch-compile  Gate matching and gate-set translation");
    println!("  larch-cli      Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
