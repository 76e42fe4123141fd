//! Small square operator matrices.

use ndarray::{Array2, ArrayView2};
use num_complex::Complex64;
use std::f64::consts::{FRAC_1_SQRT_2, PI};

use crate::error::{EngineError, EngineResult};

/// A `2^k x 2^k` complex matrix acting on `k` qubits.
///
/// Row and column indices are reduced-basis indices: bit `m` of the index
/// belongs to the `m`-th qubit in the operand list the operator is applied
/// with.
#[derive(Debug, Clone, PartialEq)]
pub struct Operator {
    matrix: Array2<Complex64>,
    num_qubits: usize,
}

impl Operator {
    /// Wrap a matrix, checking that it is square with a power-of-two side.
    pub fn new(matrix: Array2<Complex64>) -> EngineResult<Self> {
        let (rows, cols) = matrix.dim();
        if rows != cols {
            return Err(EngineError::InvalidOperand(format!(
                "operator matrix must be square, got {rows}x{cols}"
            )));
        }
        if !rows.is_power_of_two() {
            return Err(EngineError::InvalidOperand(format!(
                "operator side {rows} is not a power of two"
            )));
        }
        Ok(Self {
            num_qubits: rows.trailing_zeros() as usize,
            matrix,
        })
    }

    /// Build from a row-major element list of length `side * side`.
    pub fn from_rows(side: usize, elements: Vec<Complex64>) -> EngineResult<Self> {
        let matrix = Array2::from_shape_vec((side, side), elements)
            .map_err(|e| EngineError::InvalidOperand(format!("bad operator shape: {e}")))?;
        Self::new(matrix)
    }

    /// Identity on `k` qubits.
    pub fn identity(num_qubits: usize) -> Self {
        Self {
            matrix: Array2::eye(1 << num_qubits),
            num_qubits,
        }
    }

    /// The Hadamard matrix `(1/√2)·[[1, 1], [1, -1]]`.
    pub fn hadamard() -> Self {
        let s = Complex64::new(FRAC_1_SQRT_2, 0.0);
        Self {
            matrix: Array2::from_shape_fn((2, 2), |(r, c)| if r & c == 1 { -s } else { s }),
            num_qubits: 1,
        }
    }

    /// Controlled-phase: identity except entry `(3, 3) = e^{i·2π·turns}`.
    ///
    /// Basis bit 0 is the control and bit 1 the target, so index 3 is the
    /// only state with both set.
    pub fn controlled_phase(turns: f64) -> Self {
        let mut op = Self::identity(2);
        op.matrix[[3, 3]] = Complex64::from_polar(1.0, 2.0 * PI * turns);
        op
    }

    /// Number of qubits this operator acts on.
    #[inline]
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Side length of the matrix (`2^k`).
    #[inline]
    pub fn dim(&self) -> usize {
        self.matrix.nrows()
    }

    /// The underlying matrix.
    #[inline]
    pub fn matrix(&self) -> ArrayView2<'_, Complex64> {
        self.matrix.view()
    }

    /// Matrix entry at `(row, col)`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.matrix[[row, col]]
    }

    /// Kronecker product `self ⊗ other`.
    ///
    /// `other` occupies the low bits of the result's basis index, matching
    /// an operand list `[other's qubits..., self's qubits...]`.
    #[must_use]
    pub fn kron(&self, other: &Operator) -> Operator {
        let (a, b) = (self.dim(), other.dim());
        let matrix = Array2::from_shape_fn((a * b, a * b), |(r, c)| {
            self.matrix[[r / b, c / b]] * other.matrix[[r % b, c % b]]
        });
        Operator {
            matrix,
            num_qubits: self.num_qubits + other.num_qubits,
        }
    }

    /// Conjugate transpose.
    #[must_use]
    pub fn adjoint(&self) -> Operator {
        Operator {
            matrix: self.matrix.t().mapv(|z| z.conj()),
            num_qubits: self.num_qubits,
        }
    }

    /// Whether `U†U` is the identity within `tol` element-wise.
    pub fn is_unitary(&self, tol: f64) -> bool {
        let product = self.adjoint().matrix.dot(&self.matrix);
        let eye: Array2<Complex64> = Array2::eye(self.dim());
        product
            .iter()
            .zip(eye.iter())
            .all(|(a, b)| (a - b).norm() <= tol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn test_rejects_non_square() {
        let m = Array2::<Complex64>::zeros((2, 4));
        assert!(matches!(
            Operator::new(m),
            Err(EngineError::InvalidOperand(_))
        ));
    }

    #[test]
    fn test_rejects_non_power_of_two() {
        let m = Array2::<Complex64>::eye(3);
        assert!(matches!(
            Operator::new(m),
            Err(EngineError::InvalidOperand(_))
        ));
        assert!(Operator::from_rows(2, vec![c(1.0, 0.0); 3]).is_err());
    }

    #[test]
    fn test_qubit_count() {
        assert_eq!(Operator::identity(0).num_qubits(), 0);
        assert_eq!(Operator::hadamard().num_qubits(), 1);
        assert_eq!(Operator::controlled_phase(0.1).num_qubits(), 2);
        assert_eq!(Operator::new(Array2::eye(8)).unwrap().num_qubits(), 3);
    }

    #[test]
    fn test_standard_operators_are_unitary() {
        assert!(Operator::hadamard().is_unitary(1e-12));
        assert!(Operator::controlled_phase(0.37).is_unitary(1e-12));
        let not_unitary = Operator::from_rows(2, vec![c(1.0, 0.0); 4]).unwrap();
        assert!(!not_unitary.is_unitary(1e-6));
    }

    #[test]
    fn test_controlled_phase_entry() {
        let op = Operator::controlled_phase(0.5);
        assert!((op.get(3, 3) - c(-1.0, 0.0)).norm() < 1e-12);
        assert!((op.get(0, 0) - c(1.0, 0.0)).norm() < 1e-12);
        assert!((op.get(2, 2) - c(1.0, 0.0)).norm() < 1e-12);

        let quarter = Operator::controlled_phase(0.25);
        assert!((quarter.get(3, 3) - c(0.0, 1.0)).norm() < 1e-12);
    }

    #[test]
    fn test_kron_layout() {
        // I ⊗ X flips the low bit
        let x = Operator::from_rows(2, vec![c(0.0, 0.0), c(1.0, 0.0), c(1.0, 0.0), c(0.0, 0.0)])
            .unwrap();
        let ix = Operator::identity(1).kron(&x);
        assert_eq!(ix.num_qubits(), 2);
        assert_eq!(ix.get(1, 0), c(1.0, 0.0));
        assert_eq!(ix.get(0, 1), c(1.0, 0.0));
        assert_eq!(ix.get(3, 2), c(1.0, 0.0));
        assert_eq!(ix.get(2, 0), c(0.0, 0.0));
    }
}
