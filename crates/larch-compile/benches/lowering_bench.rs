//! Benchmarks for matching and Sycamore lowering
//!
//! Run with: cargo bench -p larch-compile

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use larch_compile::{GateMatcher, LoweringPipeline, MatchPolicy, Unitary2x2};
use larch_ir::{GridQubit, StandardGate, matrix};

/// Benchmark matching catalog and non-catalog matrices
fn bench_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("matching");
    let exact = GateMatcher::new();
    let loose = GateMatcher::with_policy(MatchPolicy::UpToGlobalPhase { atol: 1e-9 });

    for gate in [StandardGate::CX, StandardGate::Syc, StandardGate::CSwap] {
        let u = gate.unitary();
        group.bench_with_input(BenchmarkId::new("exact", gate.name()), &u, |b, u| {
            b.iter(|| exact.match_unitary(black_box(u)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("global_phase", gate.name()), &u, |b, u| {
            b.iter(|| loose.match_unitary(black_box(u)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark full lowering to the Sycamore gate set
fn bench_lowering(c: &mut Criterion) {
    let mut group = c.benchmark_group("lowering");
    let pipeline = LoweringPipeline::new();

    for gate in [
        StandardGate::CZ,
        StandardGate::Swap,
        StandardGate::ISwap,
        StandardGate::CCX,
    ] {
        let targets = GridQubit::line(0, 0, gate.num_qubits());
        let u = gate.unitary();
        group.bench_function(gate.name(), |b| {
            b.iter(|| pipeline.lower(black_box(&targets), black_box(&u)).unwrap());
        });
    }

    let generic = matrix::kron(
        &(Unitary2x2::rz(0.3) * Unitary2x2::ry(1.1)).to_matrix(),
        &Unitary2x2::h().to_matrix(),
    )
    .dot(&StandardGate::ISwap.unitary());
    let targets = GridQubit::line(0, 0, 2);
    group.bench_function("generic_2q", |b| {
        b.iter(|| pipeline.lower(black_box(&targets), black_box(&generic)).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_matching, bench_lowering);
criterion_main!(benches);
