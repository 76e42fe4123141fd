//! Error types for the engine crate.

use thiserror::Error;

/// Errors produced by gate application and measurement.
///
/// All of these are caller errors detected before any work is done.
#[derive(Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum EngineError {
    /// Bad qubit list or malformed operator matrix.
    #[error("Invalid operand: {0}")]
    InvalidOperand(String),

    /// State vector is not a power of two long, or too small for the
    /// requested qubits.
    #[error("Dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// The gate has no known operator.
    #[error("Unsupported gate: {0}")]
    UnsupportedGate(String),

    /// Total probability of a state drifted away from 1.
    #[error("Numerical instability: total probability {total} deviates from 1 by more than {tolerance}")]
    NumericalInstability {
        /// Sum of squared amplitude magnitudes.
        total: f64,
        /// Configured tolerance.
        tolerance: f64,
    },
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
