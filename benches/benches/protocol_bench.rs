//! # Protocol Benchmarks
//!
//! Measures one full round (circuit build, evolve, measure, evaluate) of the
//! CHSH game and of superdense coding.
//!
//! Run: `cargo bench --bench protocol_bench`

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use qsim_core::{Simulator, SimulatorConfig};
use qsim_protocols::{ChshInputs, ChshStrategy, Message, run_chsh_with, run_superdense_with, win_probability};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn bench_chsh(c: &mut Criterion) {
    let mut group = c.benchmark_group("chsh");
    let sim = Simulator::with_config(SimulatorConfig::default());

    group.bench_function("round", |b| {
        let mut rng = StdRng::seed_from_u64(7);
        b.iter(|| {
            let inputs = ChshInputs::random(&mut rng);
            black_box(run_chsh_with(&sim, inputs, ChshStrategy::Optimal, &mut rng).unwrap())
        })
    });

    group.bench_function("exact_win_probability", |b| {
        b.iter(|| {
            for inputs in ChshInputs::all() {
                black_box(win_probability(&sim, inputs, ChshStrategy::AliceFlip).unwrap());
            }
        })
    });

    group.finish();
}

fn bench_superdense(c: &mut Criterion) {
    let sim = Simulator::with_config(SimulatorConfig::default());

    c.bench_function("superdense_round", |b| {
        let mut rng = StdRng::seed_from_u64(7);
        b.iter(|| {
            let message = Message::random(&mut rng);
            black_box(run_superdense_with(&sim, message, &mut rng).unwrap())
        })
    });
}

criterion_group!(benches, bench_chsh, bench_superdense);
criterion_main!(benches);
