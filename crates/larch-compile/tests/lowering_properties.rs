//! End-to-end properties of matching and lowering.
//!
//! Every lowered circuit must reproduce its input matrix up to a global
//! phase, use only Sycamore-native gates, and leave the ancilla list empty.

use larch_compile::{
    CATALOG, GateMatcher, GateSet, Lowered, LoweringOutcome, LoweringPipeline, MatchOutcome,
    Unitary2x2, matrix_to_sycamore_operations,
};
use larch_ir::matrix::{self, Matrix, equal_up_to_global_phase, phase_deviation};
use larch_ir::{GridQubit, StandardGate};
use num_complex::Complex64;
use proptest::prelude::*;

/// Helper: the lowered circuit, panicking on Unsupported.
fn circuit_of(lowered: &Lowered) -> &larch_ir::Circuit {
    lowered.circuit().expect("expected a circuit")
}

/// Helper: assert the circuit implements `u` on `targets` natively.
fn assert_faithful(targets: &[GridQubit], u: &Matrix) {
    let lowered = matrix_to_sycamore_operations(targets, u).unwrap();
    assert!(lowered.ancillas.is_empty());

    let circuit = circuit_of(&lowered);
    let gs = GateSet::sycamore();
    assert!(circuit.operations().iter().all(|op| gs.accepts(op)));

    let deviation = phase_deviation(&circuit.unitary_on(targets).unwrap(), u);
    assert!(deviation < 1e-6, "deviation {deviation}");
}

/// Random single-qubit unitary from Euler angles and a global phase.
fn arb_unitary_1q() -> impl Strategy<Value = Unitary2x2> {
    (-4.0f64..4.0, 0.05f64..3.1, -4.0f64..4.0, -4.0f64..4.0).prop_map(|(a, b, g, phase)| {
        let u = Unitary2x2::rz(a) * Unitary2x2::ry(b) * Unitary2x2::rz(g);
        let p = Complex64::from_polar(1.0, phase);
        Unitary2x2::new(u.data[0] * p, u.data[1] * p, u.data[2] * p, u.data[3] * p)
    })
}

/// Random two-qubit unitary: local layers around two different entanglers.
fn arb_unitary_2q() -> impl Strategy<Value = Matrix> {
    prop::collection::vec(arb_unitary_1q(), 6).prop_map(|locals| {
        let layer = |i: usize| matrix::kron(&locals[i].to_matrix(), &locals[i + 1].to_matrix());
        layer(4)
            .dot(&StandardGate::ISwap.unitary())
            .dot(&layer(2))
            .dot(&StandardGate::CX.unitary())
            .dot(&layer(0))
    })
}

// ============================================================================
// Catalog scenarios
// ============================================================================

#[test]
fn test_identity_matches_with_arity() {
    let matcher = GateMatcher::new();
    let MatchOutcome::Matched(gate) = matcher.match_unitary(&matrix::identity(2)).unwrap() else {
        panic!("identity did not match");
    };
    assert_eq!(gate.as_standard(), Some(&StandardGate::Identity(2)));
    assert_eq!(gate.num_qubits(), 2);
}

#[test]
fn test_identity_lowers_to_empty_circuit() {
    for n in 1..=3 {
        let targets = GridQubit::line(0, 0, n);
        let lowered = matrix_to_sycamore_operations(&targets, &matrix::identity(n)).unwrap();
        assert!(circuit_of(&lowered).is_empty());
    }
}

#[test]
fn test_cnot_matches_cx() {
    let matcher = GateMatcher::new();
    let outcome = matcher.match_unitary(&StandardGate::CX.unitary()).unwrap();
    assert_eq!(outcome.gate().unwrap().as_standard(), Some(&StandardGate::CX));
}

#[test]
fn test_every_catalog_entry_lowers_faithfully() {
    for entry in CATALOG {
        let n = entry.gate.num_qubits();
        assert_faithful(&GridQubit::line(4, 2, n), &entry.gate.unitary());
    }
}

#[test]
fn test_cz_scenario() {
    let targets = GridQubit::line(0, 0, 2);
    let lowered = matrix_to_sycamore_operations(&targets, &StandardGate::CZ.unitary()).unwrap();

    let (outcome, ancillas) = lowered.into_parts();
    assert!(ancillas.is_empty());
    let LoweringOutcome::Circuit(circuit) = outcome else {
        panic!("CZ should lower");
    };
    assert_eq!(circuit.count("syc"), 2);
    assert_eq!(circuit.count("syc") + circuit.count("phxz"), circuit.num_ops());
}

#[test]
fn test_swap_is_order_sensitive() {
    let (q0, q1) = (GridQubit::new(0, 0), GridQubit::new(0, 1));
    let swap = StandardGate::Swap.unitary();
    let lowered = matrix_to_sycamore_operations(&[q0, q1], &swap).unwrap();
    let circuit = circuit_of(&lowered);
    assert!(equal_up_to_global_phase(&circuit.unitary_on(&[q0, q1]).unwrap(), &swap, 1e-6));

    // CX is not symmetric: lowering onto reversed targets gives a different circuit.
    let cx = StandardGate::CX.unitary();
    let forward = matrix_to_sycamore_operations(&[q0, q1], &cx).unwrap();
    let reversed = matrix_to_sycamore_operations(&[q1, q0], &cx).unwrap();
    let forward_u = circuit_of(&forward).unitary_on(&[q0, q1]).unwrap();
    let reversed_u = circuit_of(&reversed).unitary_on(&[q0, q1]).unwrap();
    assert!(equal_up_to_global_phase(&forward_u, &cx, 1e-6));
    assert!(!equal_up_to_global_phase(&reversed_u, &cx, 1e-3));
}

#[test]
fn test_non_power_of_two_is_rejected() {
    let err = matrix_to_sycamore_operations(&GridQubit::line(0, 0, 2), &Matrix::eye(3));
    assert!(err.is_err());
}

#[test]
fn test_pipeline_is_shareable_across_threads() {
    let pipeline = std::sync::Arc::new(LoweringPipeline::new());
    let handles: Vec<_> = (0..4)
        .map(|row| {
            let pipeline = std::sync::Arc::clone(&pipeline);
            std::thread::spawn(move || {
                let targets = GridQubit::line(row, 0, 2);
                pipeline
                    .lower(&targets, &StandardGate::ISwap.unitary())
                    .unwrap()
            })
        })
        .collect();

    let counts: Vec<usize> = handles
        .into_iter()
        .map(|h| circuit_of(&h.join().unwrap()).count("syc"))
        .collect();
    assert!(counts.windows(2).all(|w| w[0] == w[1]));
}

// ============================================================================
// Random unitaries
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_one_qubit_lowering_is_faithful(u in arb_unitary_1q()) {
        let targets = [GridQubit::new(5, 5)];
        let m = u.to_matrix();
        let lowered = matrix_to_sycamore_operations(&targets, &m).unwrap();
        let circuit = lowered.circuit().unwrap();
        prop_assert!(circuit.num_ops() <= 1);
        prop_assert!(phase_deviation(&circuit.unitary(), &m) < 1e-9);
    }

    #[test]
    fn prop_two_qubit_lowering_is_faithful(u in arb_unitary_2q()) {
        let targets = GridQubit::line(1, 1, 2);
        let matcher = GateMatcher::new();
        let outcome = matcher.match_unitary(&u).unwrap();
        prop_assert_eq!(outcome.gate().map(|g| g.name()), Some("matrix"));

        let lowered = matrix_to_sycamore_operations(&targets, &u).unwrap();
        let circuit = lowered.circuit().unwrap();
        prop_assert!(circuit.operations().iter().all(|op| op.name() == "syc" || op.name() == "phxz"));
        prop_assert!(phase_deviation(&circuit.unitary(), &u) < 1e-6);
    }

    #[test]
    fn prop_non_catalog_three_qubit_is_unsupported(
        a in arb_unitary_1q(),
        b in arb_unitary_1q(),
        c in arb_unitary_1q(),
    ) {
        let u = matrix::kron(&a.to_matrix(), &matrix::kron(&b.to_matrix(), &c.to_matrix()))
            .dot(&StandardGate::CCZ.unitary());
        let lowered = matrix_to_sycamore_operations(&GridQubit::line(0, 0, 3), &u).unwrap();
        prop_assert!(lowered.is_unsupported());
        prop_assert!(lowered.ancillas.is_empty());
    }
}
