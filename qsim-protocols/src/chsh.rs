//! # CHSH — Jogo não-local
//!
//! Alice recebe `x`, Bob recebe `y`; respondem `a` e `b`. Vitória sse
//! `a ⊕ b = x ∧ y`. Estratégias clássicas vencem no máximo 75%; com um par
//! emaranhado e os ângulos ótimos a taxa chega a cos²(π/8) ≈ 0.8536.
//!
//! ## Circuito
//!
//! ```text
//! q0: ─[X se x=1]─[H]─●─[Ry(π/2) se x=1]─────── M
//! q1: ────────────────⊕─[Ry(±π/4), + se y=0]─── M
//! ```
//!
//! [`ChshStrategy::AliceFlip`] é o circuito acima. Como o X prévio troca o par
//! compartilhado para |Φ-⟩, as rodadas com `x = 1` vencem só com
//! probabilidade sin²(π/8). [`ChshStrategy::Optimal`] omite esse X e atinge
//! cos²(π/8) para qualquer `(x, y)`.

use qsim_core::{Circuit, CircuitBuilder, MeasurementOutcome, Simulator, outcome_distribution};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_8};
use std::fmt;
use tracing::debug;

use crate::bit::Bit;
use crate::error::ProtocolResult;
use crate::readout::{ALICE_QUBIT, BOB_QUBIT, MEASURED_QUBITS, read_pair};

/// Parâmetro de Ry aplicado a Alice quando `x = 1`
pub const ALICE_RY: f64 = FRAC_PI_2;

/// Módulo do parâmetro de Ry aplicado a Bob (`+` se `y = 0`, `-` se `y = 1`)
pub const BOB_RY: f64 = FRAC_PI_4;

/// Melhor taxa de vitória clássica
pub const CLASSICAL_WIN_RATE: f64 = 0.75;

/// Taxa de vitória quântica ótima, cos²(π/8)
pub fn quantum_win_rate() -> f64 {
    FRAC_PI_8.cos().powi(2)
}

/// Entradas do árbitro
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ChshInputs {
    /// Entrada de Alice
    pub x: Bit,
    /// Entrada de Bob
    pub y: Bit,
}

impl ChshInputs {
    pub fn new(x: Bit, y: Bit) -> Self {
        Self { x, y }
    }

    /// Entradas uniformes e independentes
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            x: Bit::random(rng),
            y: Bit::random(rng),
        }
    }

    /// As quatro combinações
    pub fn all() -> [ChshInputs; 4] {
        [
            Self::new(Bit::Zero, Bit::Zero),
            Self::new(Bit::Zero, Bit::One),
            Self::new(Bit::One, Bit::Zero),
            Self::new(Bit::One, Bit::One),
        ]
    }

    /// Paridade exigida: `x ∧ y`
    pub fn target_parity(&self) -> Bit {
        self.x & self.y
    }
}

impl fmt::Display for ChshInputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "x = {}, y = {}", self.x, self.y)
    }
}

/// Estratégia de preparação de Alice
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChshStrategy {
    /// X em q0 antes do par quando `x = 1`
    #[default]
    AliceFlip,
    /// Sempre |Φ+⟩; só as rotações dependem das entradas
    Optimal,
}

impl ChshStrategy {
    pub fn name(&self) -> &'static str {
        match self {
            Self::AliceFlip => "alice-flip",
            Self::Optimal => "optimal",
        }
    }
}

impl fmt::Display for ChshStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Resultado de uma rodada
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChshRound {
    pub inputs: ChshInputs,
    /// Saída de Alice (q0)
    pub a: Bit,
    /// Saída de Bob (q1)
    pub b: Bit,
    pub win: bool,
    /// Registrador bruto, little-endian
    pub register: String,
}

/// Predicado de vitória: `a ⊕ b = x ∧ y`
pub fn wins(inputs: ChshInputs, a: Bit, b: Bit) -> bool {
    (a ^ b) == inputs.target_parity()
}

/// Circuito CHSH com a estratégia padrão
pub fn chsh_circuit(inputs: ChshInputs) -> ProtocolResult<Circuit> {
    chsh_circuit_with(inputs, ChshStrategy::default())
}

/// Circuito CHSH para a estratégia dada
pub fn chsh_circuit_with(inputs: ChshInputs, strategy: ChshStrategy) -> ProtocolResult<Circuit> {
    let mut b = CircuitBuilder::new(2);

    if strategy == ChshStrategy::AliceFlip && inputs.x.is_one() {
        b.x(ALICE_QUBIT);
    }

    // Par emaranhado
    b.h(ALICE_QUBIT).cx(ALICE_QUBIT, BOB_QUBIT);

    // Base de Alice: identidade para x = 0
    if inputs.x.is_one() {
        b.ry(ALICE_QUBIT, ALICE_RY);
    }

    let bob_theta = if inputs.y.is_one() { -BOB_RY } else { BOB_RY };
    b.ry(BOB_QUBIT, bob_theta);

    b.measure(&MEASURED_QUBITS);
    Ok(b.build()?)
}

/// Interpreta o resultado da medição
pub fn evaluate(inputs: ChshInputs, outcome: &MeasurementOutcome) -> ProtocolResult<ChshRound> {
    let (a, b) = read_pair(outcome)?;
    Ok(ChshRound {
        inputs,
        a,
        b,
        win: wins(inputs, a, b),
        register: outcome.register_string(),
    })
}

/// Uma rodada com a estratégia padrão e a configuração do ambiente
pub fn run_chsh<R: Rng + ?Sized>(x: Bit, y: Bit, rng: &mut R) -> ProtocolResult<ChshRound> {
    run_chsh_with(
        &Simulator::new(),
        ChshInputs::new(x, y),
        ChshStrategy::default(),
        rng,
    )
}

/// Uma rodada com simulador e estratégia explícitos
pub fn run_chsh_with<R: Rng + ?Sized>(
    simulator: &Simulator,
    inputs: ChshInputs,
    strategy: ChshStrategy,
    rng: &mut R,
) -> ProtocolResult<ChshRound> {
    let circuit = chsh_circuit_with(inputs, strategy)?;
    let outcome = simulator.run(&circuit, rng)?;
    let round = evaluate(inputs, &outcome)?;

    debug!(
        %inputs,
        %strategy,
        a = %round.a,
        b = %round.b,
        win = round.win,
        "chsh round"
    );
    Ok(round)
}

/// Probabilidade exata de vitória, sem amostragem
pub fn win_probability(
    simulator: &Simulator,
    inputs: ChshInputs,
    strategy: ChshStrategy,
) -> ProtocolResult<f64> {
    let circuit = chsh_circuit_with(inputs, strategy)?;
    circuit_win_probability(simulator, inputs, &circuit)
}

/// Probabilidade exata de vitória de um circuito já montado
pub fn circuit_win_probability(
    simulator: &Simulator,
    inputs: ChshInputs,
    circuit: &Circuit,
) -> ProtocolResult<f64> {
    let state = simulator.evolve(circuit)?;
    let distribution = outcome_distribution(&state, circuit.measured(), simulator.config())?;

    let probability: f64 = distribution
        .iter()
        .enumerate()
        .filter(|&(value, _)| {
            let outcome = MeasurementOutcome::from_register(circuit.measured(), value);
            matches!(read_pair(&outcome), Ok((a, b)) if wins(inputs, a, b))
        })
        .map(|(_, p)| p)
        .sum();
    Ok(probability)
}
