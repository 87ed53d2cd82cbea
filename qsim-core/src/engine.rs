//! Gate engine: aplica operações ao vetor de estado, in place
//!
//! Single-qubit no alvo `q`: o estado se divide em `2^(n-1)` pares
//! independentes `(i0, i1)` que diferem apenas no bit `q`.
//!
//! Controlada `(c, t)`: apenas pares com bit `c` = 1; cada par é visitado
//! uma única vez, a partir do índice com bit `t` = 0.

use tracing::trace;

use crate::circuit::check_qubit;
use crate::error::{QuantumError, QuantumResult};
use crate::gates::{Gate, Matrix2x2};
use crate::state::StateVector;

/// Aplica uma operação ao estado
pub fn apply_gate(state: &mut StateVector, gate: &Gate) -> QuantumResult<()> {
    let num_qubits = state.num_qubits();
    for qubit in gate.qubits() {
        check_qubit(qubit, num_qubits)?;
    }

    trace!(%gate, "apply");

    match *gate {
        Gate::Single { gate, target } => {
            if !gate.is_identity() {
                apply_single(state, &gate.matrix(), target);
            }
        }
        Gate::Controlled {
            gate,
            control,
            target,
        } => {
            if control == target {
                return Err(QuantumError::ControlEqualsTarget(control));
            }
            if !gate.is_identity() {
                apply_controlled(state, &gate.matrix(), control, target);
            }
        }
    }

    Ok(())
}

/// Aplica todas as operações em ordem
pub fn apply_all<'a, I>(state: &mut StateVector, gates: I) -> QuantumResult<()>
where
    I: IntoIterator<Item = &'a Gate>,
{
    for gate in gates {
        apply_gate(state, gate)?;
    }
    Ok(())
}

fn apply_single(state: &mut StateVector, matrix: &Matrix2x2, target: usize) {
    let bit = 1usize << target;
    let amps = state.amplitudes_mut();

    for i0 in 0..amps.len() {
        if i0 & bit != 0 {
            continue;
        }
        let i1 = i0 | bit;
        let [a0, a1] = matrix.apply([amps[i0], amps[i1]]);
        amps[i0] = a0;
        amps[i1] = a1;
    }
}

fn apply_controlled(state: &mut StateVector, matrix: &Matrix2x2, control: usize, target: usize) {
    let control_bit = 1usize << control;
    let target_bit = 1usize << target;
    let amps = state.amplitudes_mut();

    for i0 in 0..amps.len() {
        if i0 & control_bit == 0 || i0 & target_bit != 0 {
            continue;
        }
        let i1 = i0 | target_bit;
        let [a0, a1] = matrix.apply([amps[i0], amps[i1]]);
        amps[i0] = a0;
        amps[i1] = a1;
    }
}
