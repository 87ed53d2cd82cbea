//! # Quantum Gates — Portas Quânticas
//!
//! Vocabulário fechado de portas usado pelos protocolos.
//!
//! ## Gates Implementadas
//!
//! - **Single-qubit**: I, X, Z (Pauli), H (Hadamard)
//! - **Rotation**: Ry(θ)
//! - **Controlled**: qualquer single-qubit com um qubit de controle (CNOT = C-X)

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_1_SQRT_2;
use std::fmt;

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);

/// Matriz 2x2 complexa para gates single-qubit
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix2x2 {
    /// Elementos: [[a, b], [c, d]]
    pub elements: [[Complex64; 2]; 2],
}

impl Matrix2x2 {
    /// Cria matriz a partir de elementos reais
    pub fn real(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self {
            elements: [
                [Complex64::new(a, 0.0), Complex64::new(b, 0.0)],
                [Complex64::new(c, 0.0), Complex64::new(d, 0.0)],
            ],
        }
    }

    /// Cria matriz identidade
    pub fn identity() -> Self {
        Self {
            elements: [[ONE, ZERO], [ZERO, ONE]],
        }
    }

    /// Aplica a um par de amplitudes [alpha, beta]
    #[inline]
    pub fn apply(&self, pair: [Complex64; 2]) -> [Complex64; 2] {
        let [alpha, beta] = pair;
        let [[a, b], [c, d]] = self.elements;

        [a * alpha + b * beta, c * alpha + d * beta]
    }

    /// Multiplicação de matrizes
    pub fn mul(&self, other: &Matrix2x2) -> Matrix2x2 {
        let [[a, b], [c, d]] = self.elements;
        let [[e, f], [g, h]] = other.elements;

        Matrix2x2 {
            elements: [
                [a * e + b * g, a * f + b * h],
                [c * e + d * g, c * f + d * h],
            ],
        }
    }

    /// Transposta conjugada (dagger)
    pub fn dagger(&self) -> Matrix2x2 {
        let [[a, b], [c, d]] = self.elements;
        Matrix2x2 {
            elements: [[a.conj(), c.conj()], [b.conj(), d.conj()]],
        }
    }

    /// Verifica M·M† = I dentro da tolerância
    pub fn is_unitary(&self, tolerance: f64) -> bool {
        let [[a, b], [c, d]] = self.mul(&self.dagger()).elements;
        (a - ONE).norm() < tolerance
            && b.norm() < tolerance
            && c.norm() < tolerance
            && (d - ONE).norm() < tolerance
    }
}

/// Portas single-qubit suportadas
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum SingleQubitGate {
    Identity,
    PauliX,
    PauliZ,
    Hadamard,
    /// Rotação em Y; `theta` é o parâmetro da porta (a matriz usa θ/2)
    RotationY { theta: f64 },
}

impl SingleQubitGate {
    /// Nome da porta
    pub fn name(&self) -> &'static str {
        match self {
            Self::Identity => "I",
            Self::PauliX => "X",
            Self::PauliZ => "Z",
            Self::Hadamard => "H",
            Self::RotationY { .. } => "Ry",
        }
    }

    /// Matriz da porta
    pub fn matrix(&self) -> Matrix2x2 {
        match *self {
            Self::Identity => Matrix2x2::identity(),
            Self::PauliX => Matrix2x2::real(0.0, 1.0, 1.0, 0.0),
            Self::PauliZ => Matrix2x2::real(1.0, 0.0, 0.0, -1.0),
            Self::Hadamard => {
                let h = FRAC_1_SQRT_2;
                Matrix2x2::real(h, h, h, -h)
            }
            Self::RotationY { theta } => {
                let c = (theta / 2.0).cos();
                let s = (theta / 2.0).sin();
                Matrix2x2::real(c, -s, s, c)
            }
        }
    }

    /// Identidade pode ser omitida pelo engine
    pub fn is_identity(&self) -> bool {
        match *self {
            Self::Identity => true,
            Self::RotationY { theta } => theta == 0.0,
            _ => false,
        }
    }
}

impl fmt::Display for SingleQubitGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RotationY { theta } => write!(f, "Ry({theta:.4})"),
            other => write!(f, "{}", other.name()),
        }
    }
}

/// Operação de porta dentro de um circuito
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Gate {
    /// Porta single-qubit num alvo
    Single { gate: SingleQubitGate, target: usize },
    /// Porta controlada: aplica `gate` ao alvo quando o controle é |1⟩
    Controlled {
        gate: SingleQubitGate,
        control: usize,
        target: usize,
    },
}

impl Gate {
    /// CNOT (controlled-X)
    pub fn cnot(control: usize, target: usize) -> Self {
        Self::Controlled {
            gate: SingleQubitGate::PauliX,
            control,
            target,
        }
    }

    /// Qubits tocados pela operação
    pub fn qubits(&self) -> impl Iterator<Item = usize> + use<> {
        let (first, second) = match *self {
            Self::Single { target, .. } => (target, None),
            Self::Controlled { control, target, .. } => (control, Some(target)),
        };
        std::iter::once(first).chain(second)
    }

    /// Porta single-qubit subjacente
    pub fn base(&self) -> SingleQubitGate {
        match *self {
            Self::Single { gate, .. } | Self::Controlled { gate, .. } => gate,
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single { gate, target } => write!(f, "{gate} q{target}"),
            Self::Controlled {
                gate: SingleQubitGate::PauliX,
                control,
                target,
            } => write!(f, "CX q{control} -> q{target}"),
            Self::Controlled {
                gate,
                control,
                target,
            } => write!(f, "C-{gate} q{control} -> q{target}"),
        }
    }
}

// =============================================================================
// Testes
// =============================================================================
