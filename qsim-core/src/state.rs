//! Vetor de estado complexo
//!
//! Índice da base computacional: bit `i` do índice = estado do qubit `i`.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_DRIFT_CEILING;
use crate::error::{QuantumError, QuantumResult};

/// Largura máxima aceita pelo simulador
pub const MAX_QUBITS: usize = 16;

/// Amplitudes de um sistema de N qubits
///
/// Desserialização passa por [`StateVector::from_amplitudes`]: largura,
/// dimensão e normalização são verificadas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StateVectorData")]
pub struct StateVector {
    num_qubits: usize,
    amplitudes: Vec<Complex64>,
}

/// Forma serializada, ainda não validada
#[derive(Deserialize)]
struct StateVectorData {
    num_qubits: usize,
    amplitudes: Vec<Complex64>,
}

impl TryFrom<StateVectorData> for StateVector {
    type Error = QuantumError;

    fn try_from(data: StateVectorData) -> QuantumResult<Self> {
        Self::from_amplitudes(data.num_qubits, data.amplitudes)
    }
}

impl StateVector {
    /// Cria |0…0⟩ com `2^n` amplitudes
    pub fn new(num_qubits: usize) -> QuantumResult<Self> {
        if num_qubits == 0 || num_qubits > MAX_QUBITS {
            return Err(QuantumError::InvalidWidth(num_qubits));
        }

        let mut amplitudes = vec![Complex64::new(0.0, 0.0); 1 << num_qubits];
        amplitudes[0] = Complex64::new(1.0, 0.0);

        Ok(Self {
            num_qubits,
            amplitudes,
        })
    }

    /// Cria estado a partir de amplitudes explícitas
    ///
    /// Exige `2^n` amplitudes com Σ|amp|² dentro de [`DEFAULT_DRIFT_CEILING`].
    pub fn from_amplitudes(num_qubits: usize, amplitudes: Vec<Complex64>) -> QuantumResult<Self> {
        if num_qubits == 0 || num_qubits > MAX_QUBITS {
            return Err(QuantumError::InvalidWidth(num_qubits));
        }

        let expected = 1usize << num_qubits;
        if amplitudes.len() != expected {
            return Err(QuantumError::DimensionMismatch {
                expected,
                found: amplitudes.len(),
            });
        }

        let state = Self {
            num_qubits,
            amplitudes,
        };
        let total = state.total_probability();
        if !total.is_finite() || (total - 1.0).abs() > DEFAULT_DRIFT_CEILING {
            return Err(QuantumError::Normalization(total));
        }
        Ok(state)
    }

    /// Número de qubits
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Dimensão do espaço (`2^n`)
    pub fn dimension(&self) -> usize {
        self.amplitudes.len()
    }

    /// Amplitude no índice da base
    ///
    /// # Panics
    ///
    /// Se `index >= 2^n`.
    pub fn amplitude(&self, index: usize) -> Complex64 {
        match self.amplitudes.get(index) {
            Some(amp) => *amp,
            None => panic!(
                "basis index {index} out of range for {} amplitudes",
                self.amplitudes.len()
            ),
        }
    }

    /// Amplitude no índice, ou `None` fora do intervalo
    pub fn get(&self, index: usize) -> Option<Complex64> {
        self.amplitudes.get(index).copied()
    }

    /// Todas as amplitudes, em ordem de índice
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// Acesso mutável restrito ao engine e ao sampler
    pub(crate) fn amplitudes_mut(&mut self) -> &mut [Complex64] {
        &mut self.amplitudes
    }

    /// Probabilidade |amp|² de cada índice
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Σ|amp|²
    pub fn total_probability(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Invariante de normalização
    pub fn is_normalized(&self, tolerance: f64) -> bool {
        (self.total_probability() - 1.0).abs() <= tolerance
    }

    /// Volta para |0…0⟩
    pub fn reset(&mut self) {
        self.amplitudes.fill(Complex64::new(0.0, 0.0));
        self.amplitudes[0] = Complex64::new(1.0, 0.0);
    }

    /// Compara estados ignorando fase global
    pub fn approx_eq_up_to_phase(&self, other: &StateVector, tolerance: f64) -> bool {
        if self.num_qubits != other.num_qubits {
            return false;
        }

        // ⟨self|other⟩ tem módulo 1 sse os estados diferem só por fase
        let overlap: Complex64 = self
            .amplitudes
            .iter()
            .zip(&other.amplitudes)
            .map(|(a, b)| a.conj() * b)
            .sum();
        if overlap.norm() < tolerance {
            return false;
        }
        let phase = overlap / overlap.norm();

        self.amplitudes
            .iter()
            .zip(&other.amplitudes)
            .all(|(a, b)| (a * phase - b).norm() <= tolerance)
    }

    /// Estado da base |index⟩ (usado para comparações)
    pub fn basis(num_qubits: usize, index: usize) -> QuantumResult<Self> {
        let mut state = Self::new(num_qubits)?;
        if index >= state.dimension() {
            return Err(QuantumError::BasisIndexOutOfRange {
                index,
                dimension: state.dimension(),
            });
        }
        state.amplitudes[0] = Complex64::new(0.0, 0.0);
        state.amplitudes[index] = Complex64::new(1.0, 0.0);
        Ok(state)
    }
}
