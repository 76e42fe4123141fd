//! Primitive gate model.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::qubit::QubitId;

/// A primitive quantum gate together with the qubits it acts on.
///
/// Gates are plain immutable values. Every composite operation in this
/// workspace (CNOT, Toffoli, QFT, ...) is a [`Circuit`](crate::Circuit) of
/// these two primitives.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum Gate {
    /// Single-qubit Hadamard gate.
    Hadamard(QubitId),
    /// Two-qubit controlled-phase gate.
    ///
    /// Multiplies the amplitude by `e^{i·2π·turns}` when both `control` and
    /// `target` are in state 1. One turn is 2π radians.
    ControlledPhase {
        /// Control qubit (bit 0 of the 4x4 operator basis).
        control: QubitId,
        /// Phase qubit (bit 1 of the 4x4 operator basis).
        target: QubitId,
        /// Phase in turns.
        turns: f64,
    },
}

impl Gate {
    /// Create a Hadamard gate.
    pub fn hadamard(qubit: impl Into<QubitId>) -> Self {
        Gate::Hadamard(qubit.into())
    }

    /// Create a controlled-phase gate.
    pub fn controlled_phase(
        control: impl Into<QubitId>,
        target: impl Into<QubitId>,
        turns: f64,
    ) -> Self {
        Gate::ControlledPhase {
            control: control.into(),
            target: target.into(),
            turns,
        }
    }

    /// Short lowercase name of this gate.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Gate::Hadamard(_) => "h",
            Gate::ControlledPhase { .. } => "cp",
        }
    }

    /// Number of qubits this gate operates on.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        match self {
            Gate::Hadamard(_) => 1,
            Gate::ControlledPhase { .. } => 2,
        }
    }

    /// The ordered operand list.
    ///
    /// The order matches the operator basis used by the simulator: operand
    /// `m` maps to bit `m` of the gate matrix index.
    pub fn operands(&self) -> Vec<QubitId> {
        match *self {
            Gate::Hadamard(q) => vec![q],
            Gate::ControlledPhase {
                control, target, ..
            } => vec![control, target],
        }
    }

    /// Highest qubit index touched by this gate.
    pub fn max_qubit(&self) -> QubitId {
        match *self {
            Gate::Hadamard(q) => q,
            Gate::ControlledPhase {
                control, target, ..
            } => control.max(target),
        }
    }

    /// The inverse gate.
    #[must_use]
    pub fn inverse(&self) -> Self {
        match *self {
            Gate::Hadamard(q) => Gate::Hadamard(q),
            Gate::ControlledPhase {
                control,
                target,
                turns,
            } => Gate::ControlledPhase {
                control,
                target,
                turns: -turns,
            },
        }
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gate::Hadamard(q) => write!(f, "Hadamard({})", q.0),
            Gate::ControlledPhase {
                control,
                target,
                turns,
            } => write!(f, "Controlled-Phase({}, {}, {turns})", control.0, target.0),
        }
    }
}
