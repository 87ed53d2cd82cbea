//! # 🔗 qsim-protocols — CHSH & Superdense Coding
//!
//! Protocolos de dois qubits executados sobre `qsim-core`: o jogo não-local
//! CHSH e a codificação superdensa. Cada execução é uma única passada:
//! circuito → simulador → uma medição → avaliação.
//!
//! ## Arquitetura
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │         Protocol (params: x,y | c,d)            │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  Circuit construction                     │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  qsim-core Simulator (single shot)        │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  Readout convention + Evaluator           │  │
//! │  └───────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! ## Exemplo
//!
//! ```
//! use qsim_protocols::{Bit, run_superdense};
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let round = run_superdense(Bit::One, Bit::Zero, &mut rng).unwrap();
//! assert!(round.is_correct());
//! ```

pub mod bit;
pub mod chsh;
pub mod error;
pub mod readout;
pub mod superdense;

pub use bit::Bit;
pub use chsh::{
    ChshInputs, ChshRound, ChshStrategy, chsh_circuit, chsh_circuit_with,
    circuit_win_probability, run_chsh, run_chsh_with, win_probability,
};
pub use error::{ProtocolError, ProtocolResult};
pub use superdense::{Message, SuperdenseRound, run_superdense, run_superdense_with, superdense_circuit};

#[cfg(test)]
mod tests;
