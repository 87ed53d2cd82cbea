//! Testes integrados para qsim-protocols

use crate::*;
use qsim_core::{Simulator, SimulatorConfig, apply_gate};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::rngs::mock::StepRng;

const RUNS: usize = 10_000;
const TOLERANCE: f64 = 0.02;

fn simulator() -> Simulator {
    Simulator::with_config(SimulatorConfig {
        check_every_gate: true,
        ..SimulatorConfig::default()
    })
}

fn observed_win_rate(inputs: ChshInputs, strategy: ChshStrategy, seed: u64) -> f64 {
    let sim = simulator();
    let mut rng = StdRng::seed_from_u64(seed);
    let wins = (0..RUNS)
        .filter(|_| run_chsh_with(&sim, inputs, strategy, &mut rng).unwrap().win)
        .count();
    wins as f64 / RUNS as f64
}

#[test]
fn test_chsh_optimal_angles_reach_quantum_bound() {
    let expected = chsh::quantum_win_rate();
    for (i, inputs) in ChshInputs::all().into_iter().enumerate() {
        let rate = observed_win_rate(inputs, ChshStrategy::Optimal, 1000 + i as u64);
        assert!(
            (rate - expected).abs() < TOLERANCE,
            "{inputs}: observed {rate}, expected {expected}"
        );
        assert!(rate > chsh::CLASSICAL_WIN_RATE);
    }
}

#[test]
fn test_chsh_alice_flip_rates() {
    let optimal = chsh::quantum_win_rate();
    for (i, inputs) in ChshInputs::all().into_iter().enumerate() {
        let rate = observed_win_rate(inputs, ChshStrategy::AliceFlip, 2000 + i as u64);
        let expected = if inputs.x.is_one() { 1.0 - optimal } else { optimal };
        assert!(
            (rate - expected).abs() < TOLERANCE,
            "{inputs}: observed {rate}, expected {expected}"
        );
    }
}

#[test]
fn test_chsh_x0_y0_low_draw_selects_00() {
    // Sorteio 0.0 cai no primeiro resultado possível: |00⟩
    let mut rng = StepRng::new(0, 0);
    let round = run_chsh_with(
        &simulator(),
        ChshInputs::new(Bit::Zero, Bit::Zero),
        ChshStrategy::AliceFlip,
        &mut rng,
    )
    .unwrap();

    assert_eq!(round.a, Bit::Zero);
    assert_eq!(round.b, Bit::Zero);
    assert!(round.win);
    assert_eq!(round.register, "00");
}

#[test]
fn test_run_chsh_default_entry_point() {
    let mut rng = StdRng::seed_from_u64(5);
    for inputs in ChshInputs::all() {
        let round = run_chsh(inputs.x, inputs.y, &mut rng).unwrap();
        assert_eq!(round.inputs, inputs);
        assert_eq!(round.win, chsh::wins(inputs, round.a, round.b));
    }
}

#[test]
fn test_chsh_register_matches_bits() {
    let mut rng = StdRng::seed_from_u64(21);
    let sim = simulator();
    for _ in 0..200 {
        let inputs = ChshInputs::random(&mut rng);
        let round = run_chsh_with(&sim, inputs, ChshStrategy::Optimal, &mut rng).unwrap();
        let (alice, bob) = readout::read_register_string(&round.register).unwrap();
        assert_eq!((alice, bob), (round.a, round.b));
    }
}

#[test]
fn test_superdense_always_decodes() {
    let sim = simulator();
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        for message in Message::all() {
            let round = run_superdense_with(&sim, message, &mut rng).unwrap();
            assert_eq!(round.received, message, "seed {seed}");
        }
    }
}

#[test]
fn test_superdense_c1_d0_decodes() {
    let mut rng = StdRng::seed_from_u64(10);
    for _ in 0..100 {
        let round = run_superdense(Bit::One, Bit::Zero, &mut rng).unwrap();
        assert_eq!(round.received.c, Bit::One);
        assert_eq!(round.received.d, Bit::Zero);
        assert_eq!(round.register, "01");
    }
}

#[test]
fn test_normalization_after_every_gate_in_both_protocols() {
    let mut circuits = Vec::new();
    for inputs in ChshInputs::all() {
        circuits.push(chsh_circuit_with(inputs, ChshStrategy::AliceFlip).unwrap());
        circuits.push(chsh_circuit_with(inputs, ChshStrategy::Optimal).unwrap());
    }
    for message in Message::all() {
        circuits.push(superdense_circuit(message).unwrap());
    }

    for circuit in circuits {
        let mut state = qsim_core::StateVector::new(circuit.num_qubits()).unwrap();
        for gate in circuit.gates() {
            apply_gate(&mut state, gate).unwrap();
            assert!(
                state.is_normalized(1e-9),
                "drift {} after {gate}",
                state.total_probability()
            );
        }
    }
}

#[test]
fn test_round_json_shape() {
    let mut rng = StepRng::new(0, 0);
    let round = run_superdense_with(&simulator(), Message::new(Bit::Zero, Bit::One), &mut rng)
        .unwrap();
    let json = serde_json::to_value(&round).unwrap();
    assert_eq!(json["sent"]["c"], 0);
    assert_eq!(json["sent"]["d"], 1);
    assert_eq!(json["register"], "10");
}

#[test]
fn test_prebuilt_circuit_matches_run_helpers() {
    let sim = simulator();

    for inputs in ChshInputs::all() {
        let circuit = chsh_circuit_with(inputs, ChshStrategy::Optimal).unwrap();
        let mut rng = StdRng::seed_from_u64(77);
        let outcome = sim.run(&circuit, &mut rng).unwrap();
        let manual = chsh::evaluate(inputs, &outcome).unwrap();

        let mut rng = StdRng::seed_from_u64(77);
        let helper = run_chsh_with(&sim, inputs, ChshStrategy::Optimal, &mut rng).unwrap();
        assert_eq!(manual, helper);

        let exact = circuit_win_probability(&sim, inputs, &circuit).unwrap();
        let rebuilt = win_probability(&sim, inputs, ChshStrategy::Optimal).unwrap();
        assert_eq!(exact, rebuilt);
    }

    for message in Message::all() {
        let circuit = superdense_circuit(message).unwrap();
        let outcome = sim.run(&circuit, &mut StepRng::new(0, 0)).unwrap();
        let manual = superdense::evaluate(message, &outcome).unwrap();

        let helper = run_superdense_with(&sim, message, &mut StepRng::new(0, 0)).unwrap();
        assert_eq!(manual, helper);
        assert!(manual.is_correct());
    }
}
