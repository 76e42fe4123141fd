//! Configuration for the qsim CLI.
//!
//! Supports loading configuration from:
//! 1. A configuration file (YAML)
//! 2. Environment variables (with QSIM_ prefix)
//!
//! Configuration precedence (highest to lowest):
//! 1. Command-line flags
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values

use qsim_algos::MAX_REGISTER_QUBITS;
use qsim_engine::{DriftPolicy, SimConfig, SimulatorKind};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Simulator selection and numerical settings
    #[serde(default)]
    pub simulator: SimulatorSettings,

    /// Resource limits
    #[serde(default)]
    pub limits: Limits,

    /// Seed for every random choice (fresh entropy when absent)
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Which simulator to run and how.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulatorSettings {
    /// Implementation: "matrix" or "bitwise"
    #[serde(default)]
    pub kind: SimulatorKind,

    /// Engine settings (normalization_tolerance, drift_policy)
    #[serde(flatten)]
    pub engine: SimConfig,
}

/// Resource limits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Limits {
    /// Widest register a command may allocate
    #[serde(default = "default_max_qubits")]
    pub max_qubits: usize,
}

fn default_max_qubits() -> usize {
    MAX_REGISTER_QUBITS
}

impl Default for Limits {
    fn default() -> Self {
        Limits {
            max_qubits: default_max_qubits(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from YAML text.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        serde_yaml_ng::from_str(contents).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load configuration with the following precedence:
    /// 1. Load from file if provided
    /// 2. Apply environment variable overrides
    pub fn load(config_file: Option<&str>) -> Result<Self, ConfigError> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Config::default(),
        };

        let config = config.merge_env();
        config.validate()?;
        Ok(config)
    }

    /// Merge `QSIM_*` environment variables into this configuration.
    fn merge_env(self) -> Self {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Override fields from variables returned by `lookup`.
    ///
    /// Absent variables leave the fields unchanged; unparsable ones are
    /// logged and ignored.
    fn merge_vars(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup("QSIM_SIMULATOR") {
            match v.parse() {
                Ok(kind) => self.simulator.kind = kind,
                Err(e) => warn!("ignoring QSIM_SIMULATOR: {e}"),
            }
        }
        if let Some(v) = lookup("QSIM_TOLERANCE") {
            match v.parse() {
                Ok(val) => self.simulator.engine.normalization_tolerance = val,
                Err(_) => warn!("ignoring QSIM_TOLERANCE: '{v}' is not a number"),
            }
        }
        if let Some(v) = lookup("QSIM_DRIFT_POLICY") {
            match v.parse::<DriftPolicy>() {
                Ok(policy) => self.simulator.engine.drift_policy = policy,
                Err(e) => warn!("ignoring QSIM_DRIFT_POLICY: {e}"),
            }
        }
        if let Some(v) = lookup("QSIM_MAX_QUBITS") {
            match v.parse() {
                Ok(val) => self.limits.max_qubits = val,
                Err(_) => warn!("ignoring QSIM_MAX_QUBITS: '{v}' is not a count"),
            }
        }
        if let Some(v) = lookup("QSIM_SEED") {
            match v.parse() {
                Ok(val) => self.seed = Some(val),
                Err(_) => warn!("ignoring QSIM_SEED: '{v}' is not an integer"),
            }
        }
        self
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.simulator
            .engine
            .validate()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

        if self.limits.max_qubits == 0 {
            return Err(ConfigError::ValidationError(
                "max_qubits must be greater than 0".to_string(),
            ));
        }
        if self.limits.max_qubits > MAX_REGISTER_QUBITS {
            return Err(ConfigError::ValidationError(format!(
                "max_qubits must not exceed {MAX_REGISTER_QUBITS}, got {}",
                self.limits.max_qubits
            )));
        }

        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}
