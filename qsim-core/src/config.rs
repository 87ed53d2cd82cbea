//! Configuração do simulador
//!
//! Valores vêm de `.env` ou de variáveis de ambiente, com defaults
//! seguros quando ausentes ou inválidos.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use tracing::warn;

// Carrega .env na primeira leitura de configuração
static DOTENV_INIT: Lazy<()> = Lazy::new(|| {
    let _ = dotenv::dotenv();
});

#[inline]
fn ensure_loaded() {
    let _ = &*DOTENV_INIT;
}

/// Tolerância padrão da soma das probabilidades
pub const DEFAULT_NORMALIZATION_EPSILON: f64 = 1e-9;

/// Deriva máxima recuperável por renormalização
pub const DEFAULT_DRIFT_CEILING: f64 = 1e-3;

/// Configuração do simulador
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Fora de [1-ε, 1+ε] a distribuição é renormalizada
    pub normalization_epsilon: f64,
    /// Acima deste desvio a medição falha
    pub drift_ceiling: f64,
    /// Verifica normalização após cada porta
    pub check_every_gate: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            normalization_epsilon: DEFAULT_NORMALIZATION_EPSILON,
            drift_ceiling: DEFAULT_DRIFT_CEILING,
            check_every_gate: false,
        }
    }
}

impl SimulatorConfig {
    /// Lê `QSIM_NORMALIZATION_EPSILON`, `QSIM_DRIFT_CEILING` e `QSIM_CHECK_EVERY_GATE`
    pub fn from_env() -> Self {
        ensure_loaded();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Monta a configuração a partir de uma fonte de variáveis
    ///
    /// Valores ausentes ou inválidos caem no default. ε nunca passa do teto.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let positive = |key: &str| lookup(key).as_deref().and_then(parse_positive);

        let drift_ceiling = positive("QSIM_DRIFT_CEILING").unwrap_or(defaults.drift_ceiling);
        let mut normalization_epsilon =
            positive("QSIM_NORMALIZATION_EPSILON").unwrap_or(defaults.normalization_epsilon);

        if normalization_epsilon > drift_ceiling {
            warn!(
                normalization_epsilon,
                drift_ceiling, "normalization epsilon above drift ceiling, clamping"
            );
            normalization_epsilon = drift_ceiling;
        }

        Self {
            normalization_epsilon,
            drift_ceiling,
            check_every_gate: lookup("QSIM_CHECK_EVERY_GATE")
                .as_deref()
                .and_then(parse_flag)
                .unwrap_or(defaults.check_every_gate),
        }
    }
}

/// Configuração global, lida uma vez
pub static SIMULATOR_CONFIG: Lazy<SimulatorConfig> = Lazy::new(SimulatorConfig::from_env);

fn parse_positive(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
