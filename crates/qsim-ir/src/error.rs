//! Error types for the IR crate.

use crate::qubit::QubitId;
use thiserror::Error;

/// Errors raised while constructing circuits.
#[derive(Debug, Error, PartialEq)]
#[non_exhaustive]
pub enum IrError {
    /// A multi-controlled gate was requested with no control qubits.
    #[error("At least one control qubit is required{}", format_gate_context(.gate_name))]
    EmptyControls {
        /// Optional gate name for context.
        gate_name: Option<String>,
    },

    /// The same qubit appears twice in one operation.
    #[error("Duplicate qubit {qubit} in operation{}", format_gate_context(.gate_name))]
    DuplicateQubit {
        /// The duplicate qubit.
        qubit: QubitId,
        /// Optional gate name for context.
        gate_name: Option<String>,
    },
}

#[allow(clippy::ref_option)]
fn format_gate_context(gate_name: &Option<String>) -> String {
    match gate_name {
        Some(name) => format!(" (gate: {name})"),
        None => String::new(),
    }
}

/// Result type for IR operations.
pub type IrResult<T> = Result<T, IrError>;
