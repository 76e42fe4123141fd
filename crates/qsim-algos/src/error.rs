//! Error types for the algorithms crate.

use qsim_engine::EngineError;
use qsim_ir::IrError;
use thiserror::Error;

/// Errors produced by the algorithm drivers.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AlgoError {
    /// The simulator rejected a gate or a measurement.
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// A composite gate could not be built.
    #[error("Circuit IR error: {0}")]
    Ir(#[from] IrError),

    /// A driver parameter is out of range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Shor was asked to factor a prime or a number below 3.
    #[error("{0} is not a composite number")]
    NotComposite(u64),

    /// The state vector would not fit the qubit limit.
    #[error("Register of {qubits} qubits exceeds the limit of {max}")]
    RegisterTooLarge {
        /// Qubits the driver would need.
        qubits: usize,
        /// Configured maximum.
        max: usize,
    },

    /// Every attempt ended on an odd or trivial period.
    #[error("Failed to factorise {n} after {attempts} attempts")]
    FactorisationFailed {
        /// The number being factorised.
        n: u64,
        /// Attempts made.
        attempts: usize,
    },
}

/// Result type for algorithm drivers.
pub type AlgoResult<T> = Result<T, AlgoError>;
