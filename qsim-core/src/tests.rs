//! Testes integrados para qsim-core

use crate::*;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::f64::consts::PI;

fn bell_circuit() -> Circuit {
    let mut b = CircuitBuilder::new(2);
    b.h(0).cx(0, 1).measure(&[0, 1]);
    b.build().unwrap()
}

fn simulator() -> Simulator {
    Simulator::with_config(SimulatorConfig {
        check_every_gate: true,
        ..SimulatorConfig::default()
    })
}

#[test]
fn test_bell_pair_correlated() {
    let circuit = bell_circuit();
    let sim = simulator();
    let mut rng = StdRng::seed_from_u64(0x5EED);

    let mut ones = 0;
    for _ in 0..2000 {
        let outcome = sim.run(&circuit, &mut rng).unwrap();
        assert_eq!(outcome.bits()[0], outcome.bits()[1]);
        ones += outcome.bits()[0] as usize;
    }

    let ratio = ones as f64 / 2000.0;
    assert!((ratio - 0.5).abs() < 0.05, "ratio {ratio}");
}

#[test]
fn test_normalization_after_every_gate() {
    let mut b = CircuitBuilder::new(3);
    b.x(2)
        .h(0)
        .cx(0, 1)
        .ry(1, PI / 3.0)
        .cx(1, 2)
        .z(0)
        .ry(2, -PI / 7.0)
        .h(2)
        .measure(&[0, 1, 2]);
    let circuit = b.build().unwrap();

    let mut state = StateVector::new(3).unwrap();
    for gate in circuit.gates() {
        apply_gate(&mut state, gate).unwrap();
        assert!(state.is_normalized(1e-9), "drift after {gate}");
    }
}

#[test]
fn test_born_rule_frequencies() {
    // Ry(θ)|0⟩: P(1) = sin²(θ/2)
    let theta = PI / 3.0;
    let mut b = CircuitBuilder::new(1);
    b.ry(0, theta).measure(&[0]);
    let circuit = b.build().unwrap();

    let sim = simulator();
    let mut rng = StdRng::seed_from_u64(11);
    let runs = 10_000;
    let ones: usize = (0..runs)
        .map(|_| sim.run(&circuit, &mut rng).unwrap().bits()[0] as usize)
        .sum();

    let expected = (theta / 2.0).sin().powi(2);
    let observed = ones as f64 / runs as f64;
    assert!((observed - expected).abs() < 0.02, "observed {observed}");
}

#[test]
fn test_exact_distribution_matches_amplitudes() {
    let circuit = bell_circuit();
    let state = simulator().evolve(&circuit).unwrap();
    let distribution =
        outcome_distribution(&state, circuit.measured(), &SimulatorConfig::default()).unwrap();

    assert!((distribution[0] - 0.5).abs() < 1e-12);
    assert!(distribution[1].abs() < 1e-12);
    assert!(distribution[2].abs() < 1e-12);
    assert!((distribution[3] - 0.5).abs() < 1e-12);
}

#[test]
fn test_seeded_runs_reproducible() {
    let circuit = bell_circuit();
    let sim = simulator();

    let run = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..32)
            .map(|_| sim.run(&circuit, &mut rng).unwrap().register_value())
            .collect::<Vec<_>>()
    };

    assert_eq!(run(99), run(99));
}

#[test]
fn test_run_circuit_uses_default_simulator() {
    let mut b = CircuitBuilder::new(1);
    b.x(0).measure(&[0]);
    let circuit = b.build().unwrap();
    let mut rng = StdRng::seed_from_u64(1);

    let outcome = run_circuit(&circuit, &mut rng).unwrap();
    assert_eq!(outcome.bits(), &[1]);
}
