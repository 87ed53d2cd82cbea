//! Tipos de erro para qsim-protocols

use qsim_core::QuantumError;
use thiserror::Error;

/// Resultado customizado para execução de protocolos
pub type ProtocolResult<T> = Result<T, ProtocolError>;

/// Erros que podem ocorrer ao executar um protocolo
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProtocolError {
    #[error("Simulator error: {0}")]
    Quantum(#[from] QuantumError),

    #[error("Unexpected readout: {0}")]
    UnexpectedReadout(String),

    #[error("Invalid bit value: {0}")]
    InvalidBit(u8),

    #[error("Invalid bit {0:?}, expected 0 or 1")]
    ParseBit(String),
}
