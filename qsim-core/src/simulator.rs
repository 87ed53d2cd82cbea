//! Simulador: circuito → estado → medição

use rand::Rng;
use tracing::debug;

use crate::circuit::Circuit;
use crate::config::{SIMULATOR_CONFIG, SimulatorConfig};
use crate::engine::apply_gate;
use crate::error::{QuantumError, QuantumResult};
use crate::measurement::{MeasurementOutcome, measure};
use crate::state::StateVector;

/// Executa circuitos sobre um vetor de estado novo a cada chamada
#[derive(Debug, Clone)]
pub struct Simulator {
    /// Configuração
    config: SimulatorConfig,
}

impl Simulator {
    /// Cria simulador com a configuração do ambiente
    pub fn new() -> Self {
        Self::with_config(*SIMULATOR_CONFIG)
    }

    /// Cria simulador com configuração customizada
    pub fn with_config(config: SimulatorConfig) -> Self {
        Self { config }
    }

    /// Configuração em uso
    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    /// Estado após todas as portas, antes da medição
    pub fn evolve(&self, circuit: &Circuit) -> QuantumResult<StateVector> {
        let mut state = StateVector::new(circuit.num_qubits())?;

        for gate in circuit.gates() {
            apply_gate(&mut state, gate)?;

            if self.config.check_every_gate
                && !state.is_normalized(self.config.normalization_epsilon)
            {
                return Err(QuantumError::Normalization(state.total_probability()));
            }
        }

        Ok(state)
    }

    /// Executa o circuito e mede uma vez
    pub fn run<R: Rng + ?Sized>(
        &self,
        circuit: &Circuit,
        rng: &mut R,
    ) -> QuantumResult<MeasurementOutcome> {
        let mut state = self.evolve(circuit)?;
        let outcome = measure(&mut state, circuit.measured(), rng, &self.config)?;

        debug!(
            gates = circuit.len(),
            register = %outcome,
            "circuit run complete"
        );
        Ok(outcome)
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Executa `circuit` com a configuração do ambiente
pub fn run_circuit<R: Rng + ?Sized>(
    circuit: &Circuit,
    rng: &mut R,
) -> QuantumResult<MeasurementOutcome> {
    Simulator::new().run(circuit, rng)
}
