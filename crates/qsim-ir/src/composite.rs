//! Composite gates built from Hadamard and controlled-phase.
//!
//! None of these introduce new simulation logic. They are fixed circuits
//! over the two primitives, so any simulator that implements [`Gate`]
//! runs them unchanged.
//!
//! Convention: for every multi-controlled gate the first control is the
//! recursion head, and the remaining controls form the tail.

use crate::circuit::{Circuit, controlled_phase, hadamard};
use crate::error::{IrError, IrResult};
use crate::gate::Gate;
use crate::qubit::QubitId;

/// Controlled-NOT: `H(target) | CP(control, target, 1/2) | H(target)`.
pub fn c_not(control: impl Into<QubitId>, target: impl Into<QubitId>) -> Circuit {
    let target = target.into();
    hadamard(target) | controlled_phase(control, target, 0.5) | hadamard(target)
}

/// Phase gate with an arbitrary number of control qubits.
///
/// With a single control this is a plain [`Gate::ControlledPhase`]. With
/// more, the phase is halved across the head control and the tail is
/// recursed into:
///
/// ```text
/// CP(head, t, φ/2) | C^k-NOT(tail → head) | CP(head, t, -φ/2)
///                  | C^k-NOT(tail → head) | C^k-Phase(tail, t, φ/2)
/// ```
///
/// # Errors
///
/// Returns [`IrError::EmptyControls`] if `controls` is empty and
/// [`IrError::DuplicateQubit`] if a qubit appears twice among the controls
/// and target.
pub fn cn_phase(controls: &[QubitId], target: QubitId, turns: f64) -> IrResult<Circuit> {
    check_operands("cn_phase", controls, target)?;
    Ok(cn_phase_unchecked(controls, target, turns))
}

/// NOT gate with an arbitrary number of control qubits.
///
/// # Errors
///
/// Same conditions as [`cn_phase`].
pub fn cn_not(controls: &[QubitId], target: QubitId) -> IrResult<Circuit> {
    check_operands("cn_not", controls, target)?;
    Ok(cn_not_unchecked(controls, target))
}

/// Toffoli (CCNOT) gate.
///
/// # Errors
///
/// Returns [`IrError::DuplicateQubit`] if any two operands coincide.
pub fn toffoli(
    control_1: impl Into<QubitId>,
    control_2: impl Into<QubitId>,
    target: impl Into<QubitId>,
) -> IrResult<Circuit> {
    cn_not(&[control_1.into(), control_2.into()], target.into())
}

/// Half adder: writes `x AND y` into `carry` and `x XOR y` into `y`.
///
/// # Errors
///
/// Returns [`IrError::DuplicateQubit`] if any two operands coincide.
pub fn adder(
    x: impl Into<QubitId>,
    y: impl Into<QubitId>,
    carry: impl Into<QubitId>,
) -> IrResult<Circuit> {
    let (x, y) = (x.into(), y.into());
    Ok(toffoli(x, y, carry)? | c_not(x, y))
}

fn cn_phase_unchecked(controls: &[QubitId], target: QubitId, turns: f64) -> Circuit {
    match controls {
        [] => Circuit::new(),
        [control] => Circuit::single(Gate::controlled_phase(*control, target, turns)),
        [head, tail @ ..] => {
            let half = turns / 2.0;
            let flip = cn_not_unchecked(tail, *head);
            controlled_phase(*head, target, half)
                | &flip
                | controlled_phase(*head, target, -half)
                | &flip
                | cn_phase_unchecked(tail, target, half)
        }
    }
}

fn cn_not_unchecked(controls: &[QubitId], target: QubitId) -> Circuit {
    hadamard(target) | cn_phase_unchecked(controls, target, 0.5) | hadamard(target)
}

fn check_operands(gate_name: &str, controls: &[QubitId], target: QubitId) -> IrResult<()> {
    if controls.is_empty() {
        return Err(IrError::EmptyControls {
            gate_name: Some(gate_name.to_string()),
        });
    }
    let mut seen = vec![target];
    for &q in controls {
        if seen.contains(&q) {
            return Err(IrError::DuplicateQubit {
                qubit: q,
                gate_name: Some(gate_name.to_string()),
            });
        }
        seen.push(q);
    }
    Ok(())
}
