//! Grover's search.
//!
//! The search register is qubits `0..n`. An extra qubit `n` is prepared in
//! |1⟩ and kept there, so a NOT on any search qubit can be written as a CNOT
//! controlled by it. The reported state is the half of the full register in
//! which that qubit is set.

use qsim_engine::{Simulator, Statevector};
use qsim_ir::{Circuit, QubitId, composite, hadamard};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::{debug, instrument};

use crate::MAX_REGISTER_QUBITS;
use crate::error::{AlgoError, AlgoResult};

/// How the real-valued optimum `(π/4)·√(2^n)` becomes an iteration count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IterationPolicy {
    /// Round to nearest.
    Round,
    /// Drop the fractional part.
    Truncate,
    /// Round up.
    Ceil,
}

impl IterationPolicy {
    fn apply(self, value: f64) -> usize {
        let rounded = match self {
            IterationPolicy::Round => value.round(),
            IterationPolicy::Truncate => value.trunc(),
            IterationPolicy::Ceil => value.ceil(),
        };
        rounded as usize
    }
}

/// Iteration policy used by [`Grover::new`].
pub const GROVER_ITERATION_POLICY: IterationPolicy = IterationPolicy::Truncate;

/// Number of Grover iterates for an `n`-qubit search space.
pub fn required_iterations(n_qubits: usize, policy: IterationPolicy) -> usize {
    let optimum = PI / 4.0 * 2f64.powf(n_qubits as f64 / 2.0);
    policy.apply(optimum)
}

/// Hadamard on every search qubit.
fn hadamard_all(n_qubits: u32) -> Circuit {
    (0..n_qubits).map(hadamard).collect()
}

/// Reflection about the basis state `direction`, up to global phase.
///
/// Search qubits whose bit in `direction` is 0 are flipped, a phase of -1 is
/// applied to the all-ones state, and the flips are undone.
fn reflection(n_qubits: u32, direction: usize) -> AlgoResult<Circuit> {
    let ancilla = QubitId(n_qubits);
    let nots: Circuit = (0..n_qubits)
        .filter(|&q| direction & (1 << q) == 0)
        .map(|q| composite::c_not(ancilla, q))
        .collect();
    let controls: Vec<QubitId> = (1..n_qubits).map(QubitId).collect();
    let phase = composite::cn_phase(&controls, QubitId(0), 0.5)?;
    Ok(&nots | &phase | nots)
}

/// One Grover iterate: oracle for `target`, then the diffusion operator.
pub fn iterate_circuit(n_qubits: usize, target: usize) -> AlgoResult<Circuit> {
    check_arguments(n_qubits, target)?;
    let n = n_qubits as u32;
    Ok(reflection(n, target)? | hadamard_all(n) | reflection(n, 0)? | hadamard_all(n))
}

fn check_arguments(n_qubits: usize, target: usize) -> AlgoResult<()> {
    if n_qubits < 2 {
        return Err(AlgoError::InvalidArgument(format!(
            "Grover search needs at least 2 qubits, got {n_qubits}"
        )));
    }
    if n_qubits >= MAX_REGISTER_QUBITS {
        return Err(AlgoError::RegisterTooLarge {
            qubits: n_qubits.saturating_add(1),
            max: MAX_REGISTER_QUBITS,
        });
    }
    if target >= 1 << n_qubits {
        return Err(AlgoError::InvalidArgument(format!(
            "target {target} does not fit in {n_qubits} qubits"
        )));
    }
    Ok(())
}

/// Grover search driver bound to a simulator.
pub struct Grover<'a, S: Simulator + ?Sized> {
    sim: &'a S,
    n_qubits: usize,
    target: usize,
    iterate: Circuit,
    register: Statevector,
    iterations: usize,
    required: usize,
}

impl<'a, S: Simulator + ?Sized> Grover<'a, S> {
    /// Prepare a search for `target` among `2^n_qubits` states.
    ///
    /// # Errors
    ///
    /// [`AlgoError::InvalidArgument`] if `n_qubits < 2` or the target does
    /// not fit, [`AlgoError::RegisterTooLarge`] past the qubit limit.
    pub fn new(sim: &'a S, n_qubits: usize, target: usize) -> AlgoResult<Self> {
        Self::with_policy(sim, n_qubits, target, GROVER_ITERATION_POLICY)
    }

    /// Like [`Grover::new`] with an explicit iteration policy.
    #[instrument(skip(sim), fields(simulator = sim.name()))]
    pub fn with_policy(
        sim: &'a S,
        n_qubits: usize,
        target: usize,
        policy: IterationPolicy,
    ) -> AlgoResult<Self> {
        let iterate = iterate_circuit(n_qubits, target)?;
        let start = Statevector::basis(n_qubits + 1, 1 << n_qubits)?;
        let register = sim.apply_circuit(&hadamard_all(n_qubits as u32), &start)?;
        let required = required_iterations(n_qubits, policy);
        debug!(iterate_gates = iterate.len(), required, "prepared Grover search");

        Ok(Self {
            sim,
            n_qubits,
            target,
            iterate,
            register,
            iterations: 0,
            required,
        })
    }

    /// Width of the search register.
    pub fn n_qubits(&self) -> usize {
        self.n_qubits
    }

    /// The value being searched for.
    pub fn target(&self) -> usize {
        self.target
    }

    /// Iterates applied so far.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Iterates needed to finish.
    pub fn required(&self) -> usize {
        self.required
    }

    /// Whether the required number of iterates has been applied.
    pub fn is_done(&self) -> bool {
        self.iterations >= self.required
    }

    /// Current state of the `n`-qubit search register.
    pub fn state(&self) -> AlgoResult<Statevector> {
        let half = 1 << self.n_qubits;
        Ok(Statevector::from_amplitudes(
            self.register.amplitudes()[half..].to_vec(),
        )?)
    }

    /// Apply a single iterate.
    pub fn step(&mut self) -> AlgoResult<()> {
        self.register = self.sim.apply_circuit(&self.iterate, &self.register)?;
        self.iterations += 1;
        debug!(iteration = self.iterations, "Grover iterate applied");
        Ok(())
    }

    /// Iterate until done, returning the search-register state before the
    /// first iterate and after each one.
    pub fn run(&mut self) -> AlgoResult<Vec<Statevector>> {
        let mut history = vec![self.state()?];
        while !self.is_done() {
            self.step()?;
            history.push(self.state()?);
        }
        Ok(history)
    }

    /// Sample the search register.
    pub fn measure(&self, rng: &mut dyn RngCore) -> AlgoResult<usize> {
        Ok(self.sim.measure(&self.state()?, rng)?)
    }

    /// Probability of reading the target from the current state.
    pub fn success_probability(&self) -> AlgoResult<f64> {
        Ok(self.state()?[self.target].norm_sqr())
    }
}
