//! Dense state vector.

use num_complex::Complex64;
use std::ops::Index;

use crate::error::{EngineError, EngineResult};

/// The amplitudes of an n-qubit register.
///
/// Engine operations take a `&Statevector` and return a new one; a value
/// is never modified after construction, so earlier states can be kept as
/// snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers).
    amplitudes: Vec<Complex64>,
    /// Number of qubits.
    num_qubits: usize,
}

impl Statevector {
    /// Create a statevector initialized to |0...0⟩.
    ///
    /// # Errors
    ///
    /// [`EngineError::DimensionMismatch`] if `2^num_qubits` does not fit in
    /// a `usize`.
    pub fn zero(num_qubits: usize) -> EngineResult<Self> {
        Self::basis(num_qubits, 0)
    }

    /// Create the computational basis state `|index⟩`.
    pub fn basis(num_qubits: usize, index: usize) -> EngineResult<Self> {
        let dim = dimension(num_qubits)?;
        if index >= dim {
            return Err(EngineError::DimensionMismatch(format!(
                "basis index {index} does not fit in {num_qubits} qubits"
            )));
        }
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); dim];
        amplitudes[index] = Complex64::new(1.0, 0.0);
        Ok(Self {
            amplitudes,
            num_qubits,
        })
    }

    /// Wrap raw amplitudes. The length must be a power of two.
    ///
    /// Normalisation is not checked here; measurement reports drift.
    pub fn from_amplitudes(amplitudes: Vec<Complex64>) -> EngineResult<Self> {
        let len = amplitudes.len();
        if !len.is_power_of_two() {
            return Err(EngineError::DimensionMismatch(format!(
                "state vector length {len} is not a power of two"
            )));
        }
        Ok(Self {
            num_qubits: len.trailing_zeros() as usize,
            amplitudes,
        })
    }

    /// Get the number of qubits.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Number of amplitudes (`2^n`).
    #[inline]
    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    /// Always false: a register has at least one amplitude.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    /// The amplitudes, indexed by basis state.
    #[inline]
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    /// `|a_i|²` per basis state, with tiny negative values clamped to 0.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes
            .iter()
            .map(|a| a.norm_sqr().max(0.0))
            .collect()
    }

    /// Sum of all probabilities; 1 for a normalised state.
    pub fn total_probability(&self) -> f64 {
        self.amplitudes.iter().map(Complex64::norm_sqr).sum()
    }

    /// Element-wise comparison within `tol`.
    pub fn approx_eq(&self, other: &Statevector, tol: f64) -> bool {
        self.len() == other.len()
            && self
                .amplitudes
                .iter()
                .zip(&other.amplitudes)
                .all(|(a, b)| (a - b).norm() <= tol)
    }
}

/// `2^num_qubits`, or an error when it overflows `usize`.
fn dimension(num_qubits: usize) -> EngineResult<usize> {
    u32::try_from(num_qubits)
        .ok()
        .and_then(|n| 1usize.checked_shl(n))
        .ok_or_else(|| {
            EngineError::DimensionMismatch(format!(
                "a {num_qubits}-qubit register does not fit in memory"
            ))
        })
}

impl Index<usize> for Statevector {
    type Output = Complex64;

    fn index(&self, index: usize) -> &Complex64 {
        &self.amplitudes[index]
    }
}
