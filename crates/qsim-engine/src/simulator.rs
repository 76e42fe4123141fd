//! Simulator implementations.
//!
//! Algorithm drivers receive a [`Simulator`] explicitly; there is no global
//! default. Two implementations are provided:
//!
//! - [`MatrixSimulator`] resolves every gate to its operator and runs it
//!   through the basis-reduction engine.
//! - [`BitwiseSimulator`] applies each primitive directly by testing bits of
//!   the basis index, without ever materialising an operator.
//!
//! Both return fresh state vectors and must agree to numerical precision.

use num_complex::Complex64;
use qsim_ir::{Circuit, Gate};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_1_SQRT_2, PI};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, instrument};

use crate::bits::is_bit_set;
use crate::config::SimConfig;
use crate::error::{EngineError, EngineResult};
use crate::measure::measure_with;
use crate::resolve;
use crate::statevector::Statevector;

/// Something that can evolve and sample state vectors.
pub trait Simulator {
    /// Short identifier used in logs and CLI output.
    fn name(&self) -> &str;

    /// Numerical configuration.
    fn config(&self) -> &SimConfig;

    /// Apply one gate, returning the new state.
    fn apply_gate(&self, gate: &Gate, state: &Statevector) -> EngineResult<Statevector>;

    /// Apply `circuit` gate by gate, left to right.
    fn apply_circuit(&self, circuit: &Circuit, state: &Statevector) -> EngineResult<Statevector> {
        debug!(simulator = self.name(), gates = circuit.len(), "applying circuit");
        circuit
            .iter()
            .try_fold(state.clone(), |current, gate| self.apply_gate(gate, &current))
    }

    /// Sample a basis-state index from `state`.
    fn measure(&self, state: &Statevector, rng: &mut dyn RngCore) -> EngineResult<usize> {
        measure_with(state, rng, self.config())
    }
}

/// Simulator backed by [`apply_operator`](crate::apply::apply_operator).
#[derive(Debug, Clone, Default)]
pub struct MatrixSimulator {
    config: SimConfig,
}

impl MatrixSimulator {
    /// Create a simulator with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a simulator with the given configuration.
    pub fn with_config(config: SimConfig) -> Self {
        Self { config }
    }
}

impl Simulator for MatrixSimulator {
    fn name(&self) -> &str {
        "matrix"
    }

    fn config(&self) -> &SimConfig {
        &self.config
    }

    fn apply_gate(&self, gate: &Gate, state: &Statevector) -> EngineResult<Statevector> {
        resolve::apply_gate(gate, state)
    }

    #[instrument(skip(self, circuit, state), fields(gates = circuit.len()))]
    fn apply_circuit(&self, circuit: &Circuit, state: &Statevector) -> EngineResult<Statevector> {
        resolve::apply_circuit(circuit, state)
    }
}

/// Matrix-free simulator working directly on basis-index bits.
#[derive(Debug, Clone, Default)]
pub struct BitwiseSimulator {
    config: SimConfig,
}

impl BitwiseSimulator {
    /// Create a simulator with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a simulator with the given configuration.
    pub fn with_config(config: SimConfig) -> Self {
        Self { config }
    }

    fn check_qubit(qubit: usize, state: &Statevector) -> EngineResult<()> {
        if qubit >= state.num_qubits() {
            return Err(EngineError::DimensionMismatch(format!(
                "qubit {qubit} is outside a {}-qubit register",
                state.num_qubits()
            )));
        }
        Ok(())
    }

    fn apply_h(qubit: usize, state: &Statevector) -> EngineResult<Statevector> {
        Self::check_qubit(qubit, state)?;
        let mut amplitudes = state.amplitudes().to_vec();
        for i in 0..amplitudes.len() {
            if !is_bit_set(i, qubit) {
                let j = i | (1 << qubit);
                let a = amplitudes[i];
                let b = amplitudes[j];
                amplitudes[i] = FRAC_1_SQRT_2 * (a + b);
                amplitudes[j] = FRAC_1_SQRT_2 * (a - b);
            }
        }
        Statevector::from_amplitudes(amplitudes)
    }

    fn apply_cp(
        control: usize,
        target: usize,
        turns: f64,
        state: &Statevector,
    ) -> EngineResult<Statevector> {
        Self::check_qubit(control, state)?;
        Self::check_qubit(target, state)?;
        if control == target {
            return Err(EngineError::InvalidOperand(format!(
                "qubit {control} listed more than once"
            )));
        }
        let phase = Complex64::from_polar(1.0, 2.0 * PI * turns);
        let amplitudes = state
            .amplitudes()
            .iter()
            .enumerate()
            .map(|(i, &a)| {
                if is_bit_set(i, control) && is_bit_set(i, target) {
                    a * phase
                } else {
                    a
                }
            })
            .collect();
        Statevector::from_amplitudes(amplitudes)
    }
}

impl Simulator for BitwiseSimulator {
    fn name(&self) -> &str {
        "bitwise"
    }

    fn config(&self) -> &SimConfig {
        &self.config
    }

    fn apply_gate(&self, gate: &Gate, state: &Statevector) -> EngineResult<Statevector> {
        match *gate {
            Gate::Hadamard(q) => Self::apply_h(q.index(), state),
            Gate::ControlledPhase {
                control,
                target,
                turns,
            } => Self::apply_cp(control.index(), target.index(), turns, state),
            _ => Err(EngineError::UnsupportedGate(gate.to_string())),
        }
    }
}

/// Selects a simulator implementation by name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SimulatorKind {
    /// [`MatrixSimulator`].
    #[default]
    Matrix,
    /// [`BitwiseSimulator`].
    Bitwise,
}

impl SimulatorKind {
    /// Instantiate the selected simulator.
    pub fn build(self, config: SimConfig) -> Box<dyn Simulator> {
        match self {
            SimulatorKind::Matrix => Box::new(MatrixSimulator::with_config(config)),
            SimulatorKind::Bitwise => Box::new(BitwiseSimulator::with_config(config)),
        }
    }
}

impl fmt::Display for SimulatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimulatorKind::Matrix => write!(f, "matrix"),
            SimulatorKind::Bitwise => write!(f, "bitwise"),
        }
    }
}

impl FromStr for SimulatorKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "matrix" => Ok(SimulatorKind::Matrix),
            "bitwise" => Ok(SimulatorKind::Bitwise),
            other => Err(EngineError::InvalidOperand(format!(
                "unknown simulator '{other}' (expected matrix or bitwise)"
            ))),
        }
    }
}
