//! qsim Circuit Model
//!
//! Gate and circuit values for the qsim state-vector simulator.
//!
//! # Overview
//!
//! Only two primitive gates exist: [`Gate::Hadamard`] and
//! [`Gate::ControlledPhase`]. Everything else (CNOT, multi-controlled
//! phase/NOT, Toffoli, adders, QFT) is a [`Circuit`] composed from them.
//! Circuits are immutable, cheaply cloneable values; concatenation and
//! repetition build new circuits and never alias.
//!
//! # Example
//!
//! ```rust
//! use qsim_ir::{Circuit, composite, hadamard};
//!
//! // Hadamard on both qubits, then a CNOT from qubit 0 to qubit 1
//! let circuit: Circuit = hadamard(0u32) | hadamard(1u32) | composite::c_not(0u32, 1u32);
//!
//! assert_eq!(circuit.len(), 5);
//! assert_eq!(circuit.num_qubits(), 2);
//! ```
//!
//! # Phase convention
//!
//! Phases are measured in *turns*: `1.0` is a full `2π` rotation, so a
//! controlled-phase of `0.5` is a controlled-Z.

pub mod circuit;
pub mod composite;
pub mod error;
pub mod gate;
pub mod qasm;
pub mod qubit;

pub use circuit::{Circuit, concat, controlled_phase, hadamard, repeat};
pub use error::{IrError, IrResult};
pub use gate::Gate;
pub use qubit::QubitId;
