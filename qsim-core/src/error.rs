//! Tipos de erro para qsim-core

use thiserror::Error;

/// Resultado customizado para operações quânticas
pub type QuantumResult<T> = Result<T, QuantumError>;

/// Erros que podem ocorrer em operações quânticas
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuantumError {
    #[error("Qubit {qubit} out of range for a {num_qubits}-qubit circuit")]
    QubitOutOfRange { qubit: usize, num_qubits: usize },

    #[error("Control and target must differ, both are qubit {0}")]
    ControlEqualsTarget(usize),

    #[error("Invalid register width: {0} qubits")]
    InvalidWidth(usize),

    #[error("Invalid measurement: {0}")]
    InvalidMeasurement(String),

    #[error("Normalization drift: total probability {0}")]
    Normalization(f64),

    #[error("Basis index {index} out of range for dimension {dimension}")]
    BasisIndexOutOfRange { index: usize, dimension: usize },

    #[error("Expected {expected} amplitudes, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
}
