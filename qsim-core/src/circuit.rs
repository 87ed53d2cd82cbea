//! Circuito: sequência ordenada de portas + largura + qubits medidos

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::error::{QuantumError, QuantumResult};
use crate::gates::{Gate, SingleQubitGate};
use crate::state::MAX_QUBITS;

/// Circuito imutável, produzido por [`CircuitBuilder::build`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CircuitBuilder")]
pub struct Circuit {
    num_qubits: usize,
    gates: Vec<Gate>,
    measured: Vec<usize>,
}

impl TryFrom<CircuitBuilder> for Circuit {
    type Error = QuantumError;

    fn try_from(builder: CircuitBuilder) -> QuantumResult<Self> {
        builder.build()
    }
}

impl Circuit {
    /// Número de qubits declarado
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Portas, em ordem de aplicação
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Qubits medidos, em ordem de medição
    pub fn measured(&self) -> &[usize] {
        &self.measured
    }

    /// Retorna número de portas
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Verifica se circuito está vazio
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "circuit[{} qubits]", self.num_qubits)?;
        for (i, gate) in self.gates.iter().enumerate() {
            writeln!(f, "  {i:>2}: {gate}")?;
        }
        let measured: Vec<String> = self.measured.iter().map(|q| format!("q{q}")).collect();
        write!(f, "  measure [{}]", measured.join(", "))
    }
}

/// Construtor fluente de circuitos
///
/// Nada é executado aqui; a validação acontece em [`CircuitBuilder::build`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CircuitBuilder {
    num_qubits: usize,
    gates: Vec<Gate>,
    measured: Vec<usize>,
}

impl CircuitBuilder {
    /// Cria builder para `num_qubits` qubits
    pub fn new(num_qubits: usize) -> Self {
        Self {
            num_qubits,
            gates: Vec::new(),
            measured: Vec::new(),
        }
    }

    /// Adiciona operação ao circuito
    pub fn gate(&mut self, gate: Gate) -> &mut Self {
        self.gates.push(gate);
        self
    }

    /// Adiciona porta single-qubit
    pub fn single(&mut self, gate: SingleQubitGate, target: usize) -> &mut Self {
        self.gate(Gate::Single { gate, target })
    }

    pub fn x(&mut self, target: usize) -> &mut Self {
        self.single(SingleQubitGate::PauliX, target)
    }

    pub fn z(&mut self, target: usize) -> &mut Self {
        self.single(SingleQubitGate::PauliZ, target)
    }

    pub fn h(&mut self, target: usize) -> &mut Self {
        self.single(SingleQubitGate::Hadamard, target)
    }

    pub fn ry(&mut self, target: usize, theta: f64) -> &mut Self {
        self.single(SingleQubitGate::RotationY { theta }, target)
    }

    /// CNOT(control → target)
    pub fn cx(&mut self, control: usize, target: usize) -> &mut Self {
        self.gate(Gate::cnot(control, target))
    }

    /// Declara qubits medidos (substitui declaração anterior)
    pub fn measure(&mut self, qubits: &[usize]) -> &mut Self {
        self.measured = qubits.to_vec();
        self
    }

    /// Valida e congela o circuito
    pub fn build(&self) -> QuantumResult<Circuit> {
        if self.num_qubits == 0 || self.num_qubits > MAX_QUBITS {
            return Err(QuantumError::InvalidWidth(self.num_qubits));
        }

        for gate in &self.gates {
            for qubit in gate.qubits() {
                check_qubit(qubit, self.num_qubits)?;
            }
            if let Gate::Controlled {
                control, target, ..
            } = *gate
            {
                if control == target {
                    return Err(QuantumError::ControlEqualsTarget(control));
                }
            }
        }

        validate_measured(&self.measured, self.num_qubits)?;

        Ok(Circuit {
            num_qubits: self.num_qubits,
            gates: self.gates.clone(),
            measured: self.measured.clone(),
        })
    }
}

pub(crate) fn check_qubit(qubit: usize, num_qubits: usize) -> QuantumResult<()> {
    if qubit >= num_qubits {
        return Err(QuantumError::QubitOutOfRange { qubit, num_qubits });
    }
    Ok(())
}

/// Lista de medição: não vazia, dentro da largura, sem repetição
pub(crate) fn validate_measured(measured: &[usize], num_qubits: usize) -> QuantumResult<()> {
    if measured.is_empty() {
        return Err(QuantumError::InvalidMeasurement(
            "no qubits declared for measurement".into(),
        ));
    }

    let mut seen = HashSet::with_capacity(measured.len());
    for &qubit in measured {
        check_qubit(qubit, num_qubits)?;
        if !seen.insert(qubit) {
            return Err(QuantumError::InvalidMeasurement(format!(
                "qubit {qubit} measured twice"
            )));
        }
    }
    Ok(())
}
