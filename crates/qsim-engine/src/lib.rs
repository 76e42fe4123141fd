//! qsim State-Vector Engine
//!
//! Evolves dense state vectors under [`qsim_ir`] circuits and samples
//! measurement outcomes.
//!
//! # Overview
//!
//! The heart of the crate is [`apply_operator`]: a `k`-qubit operator is
//! applied to an `n`-qubit register by *basis reduction*. Every output
//! amplitude reads only the `2^k` input amplitudes that agree with it on the
//! untouched qubits, located with the [`bits::gather`] and
//! [`bits::scatter`] index maps. Gates are resolved to operators by
//! [`resolve`], and whole circuits are folded left to right.
//!
//! # Example
//!
//! ```rust
//! use qsim_engine::{MatrixSimulator, Simulator, Statevector};
//! use qsim_ir::hadamard;
//!
//! let sim = MatrixSimulator::new();
//! let state = sim
//!     .apply_circuit(&(hadamard(0u32) | hadamard(1u32)), &Statevector::zero(2).unwrap())
//!     .unwrap();
//!
//! for amp in state.amplitudes() {
//!     assert!((amp.re - 0.5).abs() < 1e-12);
//! }
//! ```
//!
//! # Randomness
//!
//! Measurement never owns a random source. Callers pass any
//! [`rand::RngCore`], so a seeded generator makes every run reproducible.

pub mod apply;
pub mod bits;
pub mod config;
pub mod error;
pub mod measure;
pub mod operator;
pub mod resolve;
pub mod simulator;
pub mod statevector;

pub use apply::{apply_operator, expand_operator};
pub use config::{DriftPolicy, SimConfig};
pub use error::{EngineError, EngineResult};
pub use measure::{Counts, measure, measure_with, sample_counts};
pub use operator::Operator;
pub use resolve::{apply_circuit, apply_gate};
pub use simulator::{BitwiseSimulator, MatrixSimulator, Simulator, SimulatorKind};
pub use statevector::Statevector;
