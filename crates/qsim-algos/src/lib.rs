//! `qsim-algos`: quantum algorithm drivers on top of the qsim engine.
//!
//! - [`grover`]: Grover's unstructured search with a fixed iteration policy
//! - [`qft`]: swap-free quantum Fourier transform circuits
//! - [`shor`]: quantum period finding and Shor's factorisation
//!
//! Every driver takes its [`Simulator`](qsim_engine::Simulator) and random
//! source as arguments.
//!
//! # Quick start
//!
//! ```rust
//! use qsim_algos::grover::Grover;
//! use qsim_engine::MatrixSimulator;
//!
//! let sim = MatrixSimulator::new();
//! let mut search = Grover::new(&sim, 3, 5).unwrap();
//! search.run().unwrap();
//!
//! let state = search.state().unwrap();
//! assert!(state[5].norm_sqr() > 0.9);
//! ```

pub mod error;
pub mod grover;
pub mod qft;
pub mod shor;

pub use error::{AlgoError, AlgoResult};
pub use grover::{GROVER_ITERATION_POLICY, Grover, IterationPolicy, required_iterations};
pub use qft::{bit_reverse, qft};
pub use shor::{Factorisation, PeriodFinder, Shor};

/// Widest register any driver will allocate.
pub const MAX_REGISTER_QUBITS: usize = 24;
