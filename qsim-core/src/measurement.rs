//! Measurement sampler: regra de Born, um sorteio, colapso
//!
//! ## Convenção de registrador
//!
//! O bit `k` do valor do registrador corresponde ao `k`-ésimo qubit declarado
//! para medição. A string do registrador é little-endian: a posição 0 da
//! string é o ÚLTIMO qubit declarado e a posição final é o primeiro.
//! Medindo `[q0, q1]` com q0=1, q1=0 a string é `"01"`.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

use crate::circuit::validate_measured;
use crate::config::SimulatorConfig;
use crate::error::{QuantumError, QuantumResult};
use crate::state::{MAX_QUBITS, StateVector};

/// Resultado clássico de uma medição
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "OutcomeData")]
pub struct MeasurementOutcome {
    /// Qubits medidos, em ordem de declaração
    qubits: Vec<usize>,
    /// Um bit (0 ou 1) por qubit medido, mesma ordem
    bits: Vec<u8>,
}

/// Forma serializada, ainda não validada
#[derive(Deserialize)]
struct OutcomeData {
    qubits: Vec<usize>,
    bits: Vec<u8>,
}

impl TryFrom<OutcomeData> for MeasurementOutcome {
    type Error = QuantumError;

    fn try_from(data: OutcomeData) -> QuantumResult<Self> {
        // Qubits distintos abaixo de MAX_QUBITS limitam o tamanho do registrador
        validate_measured(&data.qubits, MAX_QUBITS)?;

        if data.bits.len() != data.qubits.len() {
            return Err(QuantumError::InvalidMeasurement(format!(
                "{} bits for {} measured qubits",
                data.bits.len(),
                data.qubits.len()
            )));
        }
        if let Some(bad) = data.bits.iter().find(|&&bit| bit > 1) {
            return Err(QuantumError::InvalidMeasurement(format!(
                "non-binary bit {bad}"
            )));
        }

        Ok(Self {
            qubits: data.qubits,
            bits: data.bits,
        })
    }
}

impl MeasurementOutcome {
    /// Monta resultado a partir do valor do registrador
    pub fn from_register(qubits: &[usize], value: usize) -> Self {
        let bits = (0..qubits.len()).map(|k| ((value >> k) & 1) as u8).collect();
        Self {
            qubits: qubits.to_vec(),
            bits,
        }
    }

    /// Qubits medidos
    pub fn qubits(&self) -> &[usize] {
        &self.qubits
    }

    /// Bits em ordem de declaração
    pub fn bits(&self) -> &[u8] {
        &self.bits
    }

    /// Número de bits
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Bit na posição de medição `position`
    pub fn bit(&self, position: usize) -> Option<u8> {
        self.bits.get(position).copied()
    }

    /// Bit do qubit `qubit`, se ele foi medido
    pub fn bit_for_qubit(&self, qubit: usize) -> Option<u8> {
        self.qubits
            .iter()
            .position(|&q| q == qubit)
            .and_then(|pos| self.bits.get(pos).copied())
    }

    /// Valor do registrador: bit `k` = `k`-ésimo qubit declarado
    pub fn register_value(&self) -> usize {
        self.bits
            .iter()
            .enumerate()
            .fold(0, |acc, (k, &bit)| acc | ((bit as usize) << k))
    }

    /// String little-endian: posição 0 = último qubit declarado
    pub fn register_string(&self) -> String {
        self.bits
            .iter()
            .rev()
            .map(|&bit| if bit == 1 { '1' } else { '0' })
            .collect()
    }
}

impl fmt::Display for MeasurementOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.register_string())
    }
}

/// Mede `qubits` e colapsa o estado
///
/// Único ponto não determinístico do simulador: consome exatamente um
/// sorteio uniforme de `rng`.
pub fn measure<R: Rng + ?Sized>(
    state: &mut StateVector,
    qubits: &[usize],
    rng: &mut R,
    config: &SimulatorConfig,
) -> QuantumResult<MeasurementOutcome> {
    validate_measured(qubits, state.num_qubits())?;

    let distribution = outcome_distribution(state, qubits, config)?;
    let draw: f64 = rng.gen_range(0.0..1.0);
    let value = select_outcome(&distribution, draw);

    debug!(
        outcome = value,
        probability = distribution[value],
        draw,
        "measurement sampled"
    );

    collapse(state, qubits, value)?;
    Ok(MeasurementOutcome::from_register(qubits, value))
}

/// Probabilidade de cada valor do registrador, já saneada
///
/// Configurações dos qubits não medidos que compartilham o mesmo padrão
/// nos qubits medidos são somadas.
pub fn outcome_distribution(
    state: &StateVector,
    qubits: &[usize],
    config: &SimulatorConfig,
) -> QuantumResult<Vec<f64>> {
    let mut distribution = vec![0.0; 1 << qubits.len()];
    for (index, amp) in state.amplitudes().iter().enumerate() {
        distribution[project(index, qubits)] += amp.norm_sqr().clamp(0.0, 1.0);
    }
    for p in distribution.iter_mut() {
        *p = p.clamp(0.0, 1.0);
    }

    normalize_distribution(&mut distribution, config)?;
    Ok(distribution)
}

/// Renormaliza uma vez se a soma sair de [1-ε, 1+ε]; falha acima do teto
pub(crate) fn normalize_distribution(
    distribution: &mut [f64],
    config: &SimulatorConfig,
) -> QuantumResult<()> {
    let total: f64 = distribution.iter().sum();
    let drift = (total - 1.0).abs();

    if !total.is_finite() || drift > config.drift_ceiling {
        return Err(QuantumError::Normalization(total));
    }

    if drift > config.normalization_epsilon {
        warn!(total, drift, "probability drift, renormalizing");
        for p in distribution.iter_mut() {
            *p /= total;
        }
    }

    Ok(())
}

/// Projeta índice da base sobre os bits medidos
#[inline]
fn project(index: usize, qubits: &[usize]) -> usize {
    qubits
        .iter()
        .enumerate()
        .fold(0, |acc, (k, &q)| acc | (((index >> q) & 1) << k))
}

/// Primeiro valor cuja probabilidade acumulada passa de `draw`
fn select_outcome(distribution: &[f64], draw: f64) -> usize {
    let mut cumulative = 0.0;
    let mut last_possible = 0;

    for (value, &p) in distribution.iter().enumerate() {
        if p <= 0.0 {
            continue;
        }
        cumulative += p;
        last_possible = value;
        if draw < cumulative {
            return value;
        }
    }

    // arredondamento no topo do intervalo
    last_possible
}

/// Zera amplitudes incompatíveis com o resultado e renormaliza
fn collapse(state: &mut StateVector, qubits: &[usize], value: usize) -> QuantumResult<()> {
    let amps = state.amplitudes_mut();

    let mut kept = 0.0;
    for (index, amp) in amps.iter_mut().enumerate() {
        if project(index, qubits) == value {
            kept += amp.norm_sqr();
        } else {
            *amp = num_complex::Complex64::new(0.0, 0.0);
        }
    }

    if kept <= 0.0 {
        return Err(QuantumError::Normalization(kept));
    }

    let scale = kept.sqrt().recip();
    for amp in amps.iter_mut() {
        *amp *= scale;
    }
    Ok(())
}
