//! # ⚛️ qsim-core — State-Vector Simulator
//!
//! Simulador local de circuitos quânticos pequenos: vetor de estado complexo,
//! aplicação de portas unitárias e amostragem pela regra de Born.
//!
//! ## Computational Complexity
//!
//! **Gate — O(2^N):**
//! - Single-qubit: `2^(N-1)` pares independentes
//! - Controlada: `2^(N-2)` pares (bit de controle = 1, bit alvo = 0)
//!
//! **Measurement — O(2^N):**
//! - Uma passada para as probabilidades, uma para o colapso
//! - Um único sorteio uniforme por execução
//!
//! **Scalability:**
//! - Protocolos de 2 qubits: ✓ alvo principal
//! - Até `MAX_QUBITS` (16): ✓ suportado
//!
//! ## Arquitetura
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │          Simulator                              │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  Circuit (gates + measured qubits)        │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  Gate Engine → StateVector |0…0⟩          │  │
//! │  └───────────────────────────────────────────┘  │
//! │  ┌───────────────────────────────────────────┐  │
//! │  │  Measurement Sampler (Born rule, collapse)│  │
//! │  └───────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────┘
//! ```
//!
//! ## Exemplo
//!
//! ```
//! use qsim_core::{CircuitBuilder, Simulator, SimulatorConfig};
//! use rand::SeedableRng;
//!
//! let mut builder = CircuitBuilder::new(2);
//! builder.h(0).cx(0, 1).measure(&[0, 1]);
//! let circuit = builder.build().unwrap();
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let outcome = Simulator::with_config(SimulatorConfig::default())
//!     .run(&circuit, &mut rng)
//!     .unwrap();
//!
//! // Par de Bell: os dois bits sempre coincidem
//! assert_eq!(outcome.bits()[0], outcome.bits()[1]);
//! ```

pub mod circuit;
pub mod config;
pub mod engine;
pub mod error;
pub mod gates;
pub mod measurement;
pub mod simulator;
pub mod state;

pub use circuit::{Circuit, CircuitBuilder};
pub use config::{SIMULATOR_CONFIG, SimulatorConfig};
pub use engine::{apply_all, apply_gate};
pub use error::{QuantumError, QuantumResult};
pub use gates::{Gate, Matrix2x2, SingleQubitGate};
pub use measurement::{MeasurementOutcome, measure, outcome_distribution};
pub use num_complex::Complex64;
pub use simulator::{Simulator, run_circuit};
pub use state::{MAX_QUBITS, StateVector};

#[cfg(test)]
mod tests;
