//! # Gate Engine Benchmarks
//!
//! Measures gate application and Born-rule sampling across register widths.
//! Each gate touches every amplitude once: O(2^N).
//!
//! Run: `cargo bench --bench engine_bench`

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qsim_core::{CircuitBuilder, Gate, Simulator, SimulatorConfig, SingleQubitGate, StateVector, apply_gate};
use rand::SeedableRng;
use rand::rngs::StdRng;

const WIDTHS: [usize; 4] = [2, 6, 10, 14];

/// Benchmark single-qubit and controlled gates
fn bench_gates(c: &mut Criterion) {
    let mut group = c.benchmark_group("gate_apply");

    for n in WIDTHS {
        let hadamard = Gate::Single {
            gate: SingleQubitGate::Hadamard,
            target: n - 1,
        };
        let cnot = Gate::cnot(0, n - 1);

        group.bench_with_input(BenchmarkId::new("hadamard", n), &n, |b, &n| {
            let mut state = StateVector::new(n).unwrap();
            b.iter(|| apply_gate(black_box(&mut state), black_box(&hadamard)).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("cnot", n), &n, |b, &n| {
            let mut state = StateVector::new(n).unwrap();
            apply_gate(&mut state, &Gate::Single { gate: SingleQubitGate::Hadamard, target: 0 })
                .unwrap();
            b.iter(|| apply_gate(black_box(&mut state), black_box(&cnot)).unwrap())
        });
    }

    group.finish();
}

/// Benchmark a full GHZ preparation plus one measurement
fn bench_ghz_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("ghz_run");
    let sim = Simulator::with_config(SimulatorConfig::default());

    for n in WIDTHS {
        let mut builder = CircuitBuilder::new(n);
        builder.h(0);
        for q in 1..n {
            builder.cx(q - 1, q);
        }
        let measured: Vec<usize> = (0..n).collect();
        builder.measure(&measured);
        let circuit = builder.build().unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(n), &circuit, |b, circuit| {
            let mut rng = StdRng::seed_from_u64(42);
            b.iter(|| black_box(sim.run(circuit, &mut rng).unwrap()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_gates, bench_ghz_run);
criterion_main!(benches);
