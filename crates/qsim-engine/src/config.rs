//! Simulator configuration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{EngineError, EngineResult};

/// What measurement does when a state's total probability has drifted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftPolicy {
    /// Fail with [`EngineError::NumericalInstability`].
    #[default]
    Error,
    /// Log a warning and sample from the renormalised distribution.
    Renormalize,
}

impl fmt::Display for DriftPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriftPolicy::Error => write!(f, "error"),
            DriftPolicy::Renormalize => write!(f, "renormalize"),
        }
    }
}

impl FromStr for DriftPolicy {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "error" => Ok(DriftPolicy::Error),
            "renormalize" | "renormalise" => Ok(DriftPolicy::Renormalize),
            other => Err(EngineError::InvalidOperand(format!(
                "unknown drift policy '{other}'"
            ))),
        }
    }
}

/// Numerical settings shared by every simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Largest accepted `|Σ|a|² - 1|` before the drift policy kicks in.
    #[serde(default = "default_normalization_tolerance")]
    pub normalization_tolerance: f64,

    /// Behaviour when the tolerance is exceeded.
    #[serde(default)]
    pub drift_policy: DriftPolicy,
}

fn default_normalization_tolerance() -> f64 {
    1e-6
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            normalization_tolerance: default_normalization_tolerance(),
            drift_policy: DriftPolicy::default(),
        }
    }
}

impl SimConfig {
    /// Check that the tolerance is a positive finite number.
    pub fn validate(&self) -> EngineResult<()> {
        if !(self.normalization_tolerance.is_finite() && self.normalization_tolerance > 0.0) {
            return Err(EngineError::InvalidOperand(format!(
                "normalization_tolerance must be positive, got {}",
                self.normalization_tolerance
            )));
        }
        Ok(())
    }
}
