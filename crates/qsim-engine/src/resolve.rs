//! Gate to operator resolution and circuit evaluation.

use qsim_ir::{Circuit, Gate};
use tracing::{debug, instrument, trace};

use crate::apply::apply_operator;
use crate::error::{EngineError, EngineResult};
use crate::operator::Operator;
use crate::statevector::Statevector;

/// Resolve a gate into its operator and ordered operand qubits.
pub fn resolve(gate: &Gate) -> EngineResult<(Operator, Vec<usize>)> {
    match *gate {
        Gate::Hadamard(q) => Ok((Operator::hadamard(), vec![q.index()])),
        Gate::ControlledPhase {
            control,
            target,
            turns,
        } => Ok((
            Operator::controlled_phase(turns),
            vec![control.index(), target.index()],
        )),
        _ => Err(EngineError::UnsupportedGate(gate.to_string())),
    }
}

/// Apply a single gate, returning the new state.
pub fn apply_gate(gate: &Gate, state: &Statevector) -> EngineResult<Statevector> {
    let (operator, qubits) = resolve(gate)?;
    trace!(gate = %gate, "apply_gate");
    apply_operator(&operator, state, &qubits)
}

/// Apply every gate of `circuit` in order.
///
/// An empty circuit returns a copy of `state`.
#[instrument(skip(circuit, state), fields(gates = circuit.len(), qubits = state.num_qubits()))]
pub fn apply_circuit(circuit: &Circuit, state: &Statevector) -> EngineResult<Statevector> {
    debug!("applying circuit");
    circuit
        .iter()
        .try_fold(state.clone(), |current, gate| apply_gate(gate, &current))
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;
    use qsim_ir::{composite, controlled_phase, hadamard};

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    #[test]
    fn test_resolve_operands() {
        let (op, qubits) = resolve(&Gate::controlled_phase(3u32, 1u32, 0.25)).unwrap();
        assert_eq!(qubits, vec![3, 1]);
        assert_eq!(op, Operator::controlled_phase(0.25));

        let (op, qubits) = resolve(&Gate::hadamard(2u32)).unwrap();
        assert_eq!(qubits, vec![2]);
        assert_eq!(op, Operator::hadamard());
    }

    #[test]
    fn test_empty_circuit_is_identity() {
        let sv = Statevector::basis(2, 3).unwrap();
        let out = apply_circuit(&Circuit::new(), &sv).unwrap();
        assert_eq!(out, sv);
    }

    #[test]
    fn test_hadamard_both_qubits() {
        let circuit = hadamard(0u32) | hadamard(1u32);
        let out = apply_circuit(&circuit, &Statevector::zero(2).unwrap()).unwrap();
        for amp in out.amplitudes() {
            assert!(approx_eq(*amp, Complex64::new(0.5, 0.0)));
        }
    }

    #[test]
    fn test_c_not_on_basis_states() {
        // control 0, target 1: |q0=1,q1=0⟩ (index 1) -> index 3
        let cnot = composite::c_not(0u32, 1u32);
        let out = apply_circuit(&cnot, &Statevector::basis(2, 1).unwrap()).unwrap();
        assert!(approx_eq(out[3], Complex64::new(1.0, 0.0)));
        let out = apply_circuit(&cnot, &Statevector::basis(2, 2).unwrap()).unwrap();
        assert!(approx_eq(out[2], Complex64::new(1.0, 0.0)));
    }

    #[test]
    fn test_gate_outside_register_fails() {
        let err = apply_circuit(&controlled_phase(0u32, 4u32, 0.5), &Statevector::zero(2).unwrap())
            .unwrap_err();
        assert!(matches!(err, EngineError::DimensionMismatch(_)));
    }
}
