//! Basis-reduction gate application.
//!
//! An operator on `k` qubits of an `n`-qubit register acts as the identity
//! on the other `n - k` qubits. For each output index `i`, only the `2^k`
//! input amplitudes that agree with `i` outside the operand qubits can
//! contribute, and the operator row to use is `i`'s reduced index. That
//! turns the `2^n x 2^n` product into `2^n · 2^k` multiply-adds without
//! ever building the full operator.

use ndarray::Array2;
use num_complex::Complex64;
use tracing::trace;

use crate::bits::{gather, mask, scatter};
use crate::error::{EngineError, EngineResult};
use crate::operator::Operator;
use crate::statevector::Statevector;

/// Apply `operator` to the ordered `qubits` of `state`.
///
/// Operand `m` of `qubits` maps to bit `m` of the operator's row/column
/// index. The input is left untouched and a new state is returned.
///
/// # Errors
///
/// - [`EngineError::InvalidOperand`] if the number of qubits does not match
///   the operator size, or a qubit is listed twice.
/// - [`EngineError::DimensionMismatch`] if a qubit lies outside the register.
pub fn apply_operator(
    operator: &Operator,
    state: &Statevector,
    qubits: &[usize],
) -> EngineResult<Statevector> {
    validate_operands(operator, state.num_qubits(), qubits)?;

    let dim = operator.dim();
    let operand_mask = mask(qubits);
    // Full-basis offset of every reduced column, computed once.
    let column_offsets: Vec<usize> = (0..dim).map(|c| scatter(c, qubits)).collect();
    let input = state.amplitudes();

    trace!(qubits = ?qubits, size = input.len(), "apply_operator");

    let output: Vec<Complex64> = (0..input.len())
        .map(|i| {
            let row = gather(i, qubits);
            let base = i & !operand_mask;
            // Columns in increasing order keep the summation reproducible.
            column_offsets
                .iter()
                .enumerate()
                .fold(Complex64::new(0.0, 0.0), |acc, (col, &offset)| {
                    acc + operator.get(row, col) * input[base | offset]
                })
        })
        .collect();

    Statevector::from_amplitudes(output)
}

/// Build the full `2^n x 2^n` matrix of `operator` acting on `qubits`.
///
/// Exponential in `n`; meant for cross-checking [`apply_operator`] and for
/// inspecting small circuits.
///
/// # Errors
///
/// Same conditions as [`apply_operator`].
pub fn expand_operator(
    operator: &Operator,
    qubits: &[usize],
    num_qubits: usize,
) -> EngineResult<Operator> {
    validate_operands(operator, num_qubits, qubits)?;

    let size = 1usize << num_qubits;
    let operand_mask = mask(qubits);
    let full = Array2::from_shape_fn((size, size), |(i, j)| {
        if i & !operand_mask == j & !operand_mask {
            operator.get(gather(i, qubits), gather(j, qubits))
        } else {
            Complex64::new(0.0, 0.0)
        }
    });
    Operator::new(full)
}

fn validate_operands(operator: &Operator, num_qubits: usize, qubits: &[usize]) -> EngineResult<()> {
    if qubits.len() != operator.num_qubits() {
        return Err(EngineError::InvalidOperand(format!(
            "operator acts on {} qubits but {} were given",
            operator.num_qubits(),
            qubits.len()
        )));
    }

    let mut seen = 0usize;
    for &q in qubits {
        if q >= num_qubits {
            return Err(EngineError::DimensionMismatch(format!(
                "qubit {q} is outside a {num_qubits}-qubit register"
            )));
        }
        if seen & (1 << q) != 0 {
            return Err(EngineError::InvalidOperand(format!(
                "qubit {q} listed more than once"
            )));
        }
        seen |= 1 << q;
    }
    Ok(())
}
