//! Convenção de leitura do registrador clássico de 2 bits
//!
//! Os dois protocolos medem `[q0, q1]`. O registrador é lido como string
//! little-endian `"c1c0"`: a posição 1 da string carrega q0 (Alice / primeiro
//! bit da mensagem) e a posição 0 carrega q1 (Bob / segundo bit).
//!
//! ```text
//! string:   "c1 c0"
//! posição:   0  1
//! qubit:     q1 q0
//! ```

use qsim_core::MeasurementOutcome;

use crate::bit::Bit;
use crate::error::{ProtocolError, ProtocolResult};

/// Qubit de Alice
pub const ALICE_QUBIT: usize = 0;

/// Qubit de Bob
pub const BOB_QUBIT: usize = 1;

/// Ordem de medição dos dois protocolos
pub const MEASURED_QUBITS: [usize; 2] = [ALICE_QUBIT, BOB_QUBIT];

/// Posição do bit de q0 na string do registrador
pub const ALICE_STRING_POS: usize = 1;

/// Posição do bit de q1 na string do registrador
pub const BOB_STRING_POS: usize = 0;

/// Lê `(bit de q0, bit de q1)` de um resultado tipado
pub fn read_pair(outcome: &MeasurementOutcome) -> ProtocolResult<(Bit, Bit)> {
    if outcome.qubits() != MEASURED_QUBITS {
        return Err(ProtocolError::UnexpectedReadout(format!(
            "expected qubits {:?}, got {:?}",
            MEASURED_QUBITS,
            outcome.qubits()
        )));
    }

    let first = bit_at(outcome, ALICE_QUBIT)?;
    let second = bit_at(outcome, BOB_QUBIT)?;
    Ok((first, second))
}

/// Lê `(bit de q0, bit de q1)` de uma string de registrador `"c1c0"`
pub fn read_register_string(register: &str) -> ProtocolResult<(Bit, Bit)> {
    let chars: Vec<char> = register.chars().collect();
    if chars.len() != MEASURED_QUBITS.len() {
        return Err(ProtocolError::UnexpectedReadout(format!(
            "expected a 2-bit register, got {register:?}"
        )));
    }

    let parse = |c: char| -> ProtocolResult<Bit> {
        match c {
            '0' => Ok(Bit::Zero),
            '1' => Ok(Bit::One),
            _ => Err(ProtocolError::UnexpectedReadout(format!(
                "non-binary register {register:?}"
            ))),
        }
    };

    Ok((parse(chars[ALICE_STRING_POS])?, parse(chars[BOB_STRING_POS])?))
}

fn bit_at(outcome: &MeasurementOutcome, qubit: usize) -> ProtocolResult<Bit> {
    let raw = outcome.bit_for_qubit(qubit).ok_or_else(|| {
        ProtocolError::UnexpectedReadout(format!("qubit {qubit} was not measured"))
    })?;
    Ok(Bit::try_from(raw)?)
}
