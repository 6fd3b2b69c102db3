//! Larch Circuit Intermediate Representation
//!
//! This crate provides the data structures shared by the Larch lowering
//! stack: grid-addressed qubits, gates with exact unitaries, operations that
//! bind gates to qubits, and circuits as ordered operation lists.
//!
//! # Core Components
//!
//! - **Qubits**: [`GridQubit`] addresses a qubit by `(row, col)` on a device grid
//! - **Gates**: [`StandardGate`] for the catalog and native gates, [`MatrixGate`]
//!   for gates given only by a unitary
//! - **Operations**: [`Operation`] binds a [`Gate`] to an ordered qubit tuple
//! - **Circuit**: [`Circuit`] keeps operations in application order
//! - **Matrices**: the [`matrix`] module holds the dense-unitary helpers used
//!   for matching and verification
//!
//! # Conventions
//!
//! Operand order is big-endian: the first qubit an operation names is the most
//! significant bit of its unitary's row and column index.
//!
//! # Example
//!
//! ```rust
//! use larch_ir::{Circuit, GridQubit, StandardGate, matrix};
//!
//! let (a, b) = (GridQubit::new(0, 0), GridQubit::new(0, 1));
//! let mut circuit = Circuit::with_qubits("cz", [a, b]);
//! circuit.cz(a, b).unwrap();
//!
//! assert_eq!(circuit.depth(), 1);
//! assert!(matrix::exactly_equal(&circuit.unitary(), &StandardGate::CZ.unitary()));
//! ```
//!
//! # Supported Gates
//!
//! | Gate | Qubits | Description |
//! |------|--------|-------------|
//! | `PhasedXZ` | 1 | `Z^z · Z^a · X^x · Z^-a` |
//! | `X`, `H` | 1 | Pauli-X and Hadamard |
//! | `T`, `Tdg` | 1 | π/4 phase and its inverse |
//! | `CX`, `CZ` | 2 | Controlled-NOT and controlled-Z |
//! | `Swap`, `ISwap` | 2 | SWAP and iSWAP |
//! | `Syc` | 2 | Sycamore `FSim(π/2, π/6)` |
//! | `CCX`, `CCZ` | 3 | Toffoli and doubly-controlled Z |
//! | `CSwap` | 3 | Fredkin gate |

pub mod circuit;
pub mod error;
pub mod gate;
pub mod matrix;
pub mod operation;
pub mod qubit;

pub use circuit::Circuit;
pub use error::{IrError, IrResult};
pub use gate::{Gate, GateKind, MatrixGate, StandardGate};
pub use matrix::Matrix;
pub use operation::Operation;
pub use qubit::GridQubit;
