//! Bit clássico usado como entrada e saída dos protocolos

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitXor};
use std::str::FromStr;

use crate::error::ProtocolError;

/// Bit clássico
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum Bit {
    #[default]
    Zero = 0,
    One = 1,
}

impl Bit {
    /// Ambos os valores, em ordem
    pub const ALL: [Bit; 2] = [Bit::Zero, Bit::One];

    /// Converte para 0/1
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn is_one(self) -> bool {
        self == Bit::One
    }

    /// Bit uniforme
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::from(rng.gen_bool(0.5))
    }
}

impl From<bool> for Bit {
    fn from(value: bool) -> Self {
        if value { Bit::One } else { Bit::Zero }
    }
}

impl From<Bit> for bool {
    fn from(bit: Bit) -> Self {
        bit.is_one()
    }
}

impl From<Bit> for u8 {
    fn from(bit: Bit) -> Self {
        bit.as_u8()
    }
}

impl TryFrom<u8> for Bit {
    type Error = ProtocolError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Bit::Zero),
            1 => Ok(Bit::One),
            other => Err(ProtocolError::InvalidBit(other)),
        }
    }
}

impl FromStr for Bit {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" => Ok(Bit::Zero),
            "1" => Ok(Bit::One),
            other => Err(ProtocolError::ParseBit(other.to_string())),
        }
    }
}

impl BitXor for Bit {
    type Output = Bit;

    fn bitxor(self, rhs: Bit) -> Bit {
        Bit::from(self.is_one() ^ rhs.is_one())
    }
}

impl BitAnd for Bit {
    type Output = Bit;

    fn bitand(self, rhs: Bit) -> Bit {
        Bit::from(self.is_one() && rhs.is_one())
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}
