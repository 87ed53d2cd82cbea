//! # Superdense Coding — Dois bits por um qubit
//!
//! Alice e Bob compartilham |Φ+⟩. Alice codifica `(c, d)` no seu qubit
//! (X se `d = 1`, depois Z se `c = 1`) e o envia; Bob desfaz o par com
//! CNOT + H e mede: q0 devolve `c`, q1 devolve `d`.
//!
//! ```text
//! q0: ─[H]─●─[X se d=1]─[Z se c=1]─●─[H]─ M → c
//! q1: ─────⊕───────────────────────⊕───── M → d
//! ```
//!
//! O circuito é determinístico: com o simulador correto a mensagem sempre
//! volta intacta, apesar de passar pelo sampler probabilístico.

use qsim_core::{Circuit, CircuitBuilder, MeasurementOutcome, Simulator, StateVector};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, error};

use crate::bit::Bit;
use crate::error::{ProtocolError, ProtocolResult};
use crate::readout::{ALICE_QUBIT, BOB_QUBIT, MEASURED_QUBITS, read_pair};

/// Mensagem de dois bits
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Message {
    /// Bit mais significativo, codificado com Z
    pub c: Bit,
    /// Bit menos significativo, codificado com X
    pub d: Bit,
}

impl Message {
    pub fn new(c: Bit, d: Bit) -> Self {
        Self { c, d }
    }

    /// Mensagem uniforme
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            c: Bit::random(rng),
            d: Bit::random(rng),
        }
    }

    /// As quatro mensagens, em ordem de valor
    pub fn all() -> [Message; 4] {
        [
            Self::new(Bit::Zero, Bit::Zero),
            Self::new(Bit::Zero, Bit::One),
            Self::new(Bit::One, Bit::Zero),
            Self::new(Bit::One, Bit::One),
        ]
    }

    /// Valor 0..=3 com `c` como MSB
    pub fn value(&self) -> u8 {
        (self.c.as_u8() << 1) | self.d.as_u8()
    }

    /// Inverso de [`Message::value`]
    pub fn from_value(value: u8) -> ProtocolResult<Self> {
        if value > 3 {
            return Err(ProtocolError::InvalidBit(value));
        }
        Ok(Self {
            c: Bit::from(value & 0b10 != 0),
            d: Bit::from(value & 0b01 != 0),
        })
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.c, self.d)
    }
}

/// Resultado de uma transmissão
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuperdenseRound {
    /// Mensagem de Alice
    pub sent: Message,
    /// Mensagem decodificada por Bob
    pub received: Message,
    /// Registrador bruto, little-endian
    pub register: String,
}

impl SuperdenseRound {
    /// Mensagem recuperada sem erro
    pub fn is_correct(&self) -> bool {
        self.sent == self.received
    }
}

/// Circuito de codificação + decodificação
pub fn superdense_circuit(message: Message) -> ProtocolResult<Circuit> {
    let mut b = CircuitBuilder::new(2);

    // Par compartilhado
    b.h(ALICE_QUBIT).cx(ALICE_QUBIT, BOB_QUBIT);

    // Codificação de Alice
    if message.d.is_one() {
        b.x(ALICE_QUBIT);
    }
    if message.c.is_one() {
        b.z(ALICE_QUBIT);
    }

    // Decodificação de Bob
    b.cx(ALICE_QUBIT, BOB_QUBIT).h(ALICE_QUBIT);

    b.measure(&MEASURED_QUBITS);
    Ok(b.build()?)
}

/// Decodifica `(c, d)`: `c` vem de q0, `d` de q1
pub fn decode(outcome: &MeasurementOutcome) -> ProtocolResult<Message> {
    let (c, d) = read_pair(outcome)?;
    Ok(Message::new(c, d))
}

/// Estado de Bob antes da medição
pub fn pre_measurement_state(simulator: &Simulator, message: Message) -> ProtocolResult<StateVector> {
    let circuit = superdense_circuit(message)?;
    Ok(simulator.evolve(&circuit)?)
}

/// Uma transmissão com a configuração do ambiente
pub fn run_superdense<R: Rng + ?Sized>(
    c: Bit,
    d: Bit,
    rng: &mut R,
) -> ProtocolResult<SuperdenseRound> {
    run_superdense_with(&Simulator::new(), Message::new(c, d), rng)
}

/// Uma transmissão com simulador explícito
pub fn run_superdense_with<R: Rng + ?Sized>(
    simulator: &Simulator,
    message: Message,
    rng: &mut R,
) -> ProtocolResult<SuperdenseRound> {
    let circuit = superdense_circuit(message)?;
    let outcome = simulator.run(&circuit, rng)?;
    evaluate(message, &outcome)
}

/// Compara o resultado da medição com a mensagem enviada
pub fn evaluate(sent: Message, outcome: &MeasurementOutcome) -> ProtocolResult<SuperdenseRound> {
    let round = SuperdenseRound {
        sent,
        received: decode(outcome)?,
        register: outcome.register_string(),
    };

    if round.is_correct() {
        debug!(sent = %round.sent, register = %round.register, "superdense round");
    } else {
        error!(
            sent = %round.sent,
            received = %round.received,
            "superdense message corrupted by simulator"
        );
    }
    Ok(round)
}
