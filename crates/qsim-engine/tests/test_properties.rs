//! Property-based tests for gate application.
//!
//! The basis-reduction engine is checked against a dense oracle: permute the
//! register so the operand qubits become the low bits, multiply by
//! `I ⊗ M`, and permute back.

use ndarray::Array1;
use num_complex::Complex64;
use proptest::prelude::*;
use qsim_engine::{
    BitwiseSimulator, MatrixSimulator, Operator, Simulator, Statevector, apply_operator,
};
use qsim_ir::{Circuit, Gate, QubitId, composite, controlled_phase, hadamard};

const TOL: f64 = 1e-9;

fn c(re: f64) -> Complex64 {
    Complex64::new(re, 0.0)
}

fn arb_complex() -> impl Strategy<Value = Complex64> {
    (-1.0f64..1.0, -1.0f64..1.0).prop_map(|(re, im)| Complex64::new(re, im))
}

/// Random normalised state on `num_qubits` qubits.
fn arb_state(num_qubits: usize) -> impl Strategy<Value = Statevector> {
    prop::collection::vec(arb_complex(), 1 << num_qubits).prop_filter_map(
        "state must have non-zero norm",
        |amps| {
            let norm = amps.iter().map(Complex64::norm_sqr).sum::<f64>().sqrt();
            (norm > 1e-3).then(|| {
                Statevector::from_amplitudes(amps.into_iter().map(|a| a / norm).collect()).unwrap()
            })
        },
    )
}

/// Random (not necessarily unitary) operator on `k` qubits.
fn arb_operator(k: usize) -> impl Strategy<Value = Operator> {
    let side = 1 << k;
    prop::collection::vec(arb_complex(), side * side)
        .prop_map(move |elements| Operator::from_rows(side, elements).unwrap())
}

/// Register size, state, ordered operand subset and operator.
fn arb_application() -> impl Strategy<Value = (Statevector, Vec<usize>, Operator)> {
    (2usize..=6)
        .prop_flat_map(|n| (Just(n), 1usize..=n.min(3)))
        .prop_flat_map(|(n, k)| {
            let subset = Just((0..n).collect::<Vec<_>>())
                .prop_shuffle()
                .prop_map(move |mut qubits| {
                    qubits.truncate(k);
                    qubits
                });
            (arb_state(n), subset, arb_operator(k))
        })
}

/// Dense reference: apply `I ⊗ op` after moving `qubits` to the low bits.
fn dense_oracle(op: &Operator, state: &Statevector, qubits: &[usize]) -> Vec<Complex64> {
    let n = state.num_qubits();
    let k = qubits.len();
    let mut order = qubits.to_vec();
    order.extend((0..n).filter(|q| !qubits.contains(q)));

    // permuted index: bit m <- bit order[m] of the input index
    let to_permuted = |i: usize| {
        (0..n).fold(0, |acc, m| acc | (((i >> order[m]) & 1) << m))
    };

    let mut permuted = vec![c(0.0); state.len()];
    for i in 0..state.len() {
        permuted[to_permuted(i)] = state[i];
    }

    let full = Operator::identity(n - k).kron(op);
    let result = full.matrix().dot(&Array1::from(permuted));

    (0..state.len()).map(|i| result[to_permuted(i)]).collect()
}

fn arb_gate(num_qubits: u32) -> impl Strategy<Value = Gate> {
    prop_oneof![
        (0..num_qubits).prop_map(Gate::hadamard),
        (0..num_qubits, 0..num_qubits, -1.0f64..1.0)
            .prop_filter("control and target must differ", |(c, t, _)| c != t)
            .prop_map(|(c, t, turns)| Gate::controlled_phase(c, t, turns)),
    ]
}

fn arb_circuit() -> impl Strategy<Value = (usize, Circuit)> {
    (2u32..=5).prop_flat_map(|n| {
        (
            Just(n as usize),
            prop::collection::vec(arb_gate(n), 0..=20).prop_map(Circuit::from_gates),
        )
    })
}

proptest! {
    #[test]
    fn test_apply_operator_matches_dense_oracle((state, qubits, op) in arb_application()) {
        let fast = apply_operator(&op, &state, &qubits).unwrap();
        let oracle = dense_oracle(&op, &state, &qubits);
        for (a, b) in fast.amplitudes().iter().zip(&oracle) {
            prop_assert!((a - b).norm() < TOL, "{} != {}", a, b);
        }
    }

    #[test]
    fn test_hadamard_is_self_inverse(
        (state, q) in (1usize..=6).prop_flat_map(|n| (arb_state(n), 0..n))
    ) {
        let twice = hadamard(q as u32) | hadamard(q as u32);
        let out = MatrixSimulator::new().apply_circuit(&twice, &state).unwrap();
        prop_assert!(out.approx_eq(&state, 1e-7));
    }

    #[test]
    fn test_controlled_phases_add(
        state in arb_state(3),
        p1 in -1.0f64..1.0,
        p2 in -1.0f64..1.0,
    ) {
        let sim = MatrixSimulator::new();
        let split = controlled_phase(2u32, 0u32, p1) | controlled_phase(2u32, 0u32, p2);
        let joined = controlled_phase(2u32, 0u32, p1 + p2);
        let a = sim.apply_circuit(&split, &state).unwrap();
        let b = sim.apply_circuit(&joined, &state).unwrap();
        prop_assert!(a.approx_eq(&b, TOL));
    }

    #[test]
    fn test_c_not_is_canonical_permutation(state in arb_state(2)) {
        // control 0, target 1 swaps |q0=1,q1=0⟩ and |q0=1,q1=1⟩
        let out = MatrixSimulator::new()
            .apply_circuit(&composite::c_not(0u32, 1u32), &state)
            .unwrap();
        let expected = Statevector::from_amplitudes(vec![state[0], state[3], state[2], state[1]])
            .unwrap();
        prop_assert!(out.approx_eq(&expected, TOL));
    }

    #[test]
    fn test_simulators_agree((n, circuit) in arb_circuit(), seed_index in 0usize..32) {
        let start = Statevector::basis(n, seed_index % (1 << n)).unwrap();
        let start = MatrixSimulator::new()
            .apply_circuit(&Circuit::from_gates((0..n as u32).map(Gate::hadamard)), &start)
            .unwrap();
        let a = MatrixSimulator::new().apply_circuit(&circuit, &start).unwrap();
        let b = BitwiseSimulator::new().apply_circuit(&circuit, &start).unwrap();
        prop_assert!(a.approx_eq(&b, 1e-10));
    }

    #[test]
    fn test_unitary_circuits_preserve_norm((n, circuit) in arb_circuit()) {
        let out = MatrixSimulator::new()
            .apply_circuit(&circuit, &Statevector::zero(n).unwrap())
            .unwrap();
        prop_assert!((out.total_probability() - 1.0).abs() < TOL);
    }
}

#[test]
fn test_hadamard_everywhere_gives_uniform_state() {
    for n in 1..=6u32 {
        let circuit: Circuit = (0..n).map(Gate::hadamard).collect();
        let out = MatrixSimulator::new()
            .apply_circuit(&circuit, &Statevector::zero(n as usize).unwrap())
            .unwrap();
        let expected = 1.0 / f64::from(1u32 << n).sqrt();
        for amp in out.amplitudes() {
            assert!((amp - c(expected)).norm() < 1e-12);
        }
    }
}

#[test]
fn test_two_hadamards_on_zero_state() {
    let start = Statevector::from_amplitudes(vec![c(1.0), c(0.0), c(0.0), c(0.0)]).unwrap();
    let out = qsim_engine::apply_circuit(&(hadamard(0u32) | hadamard(1u32)), &start).unwrap();
    for amp in out.amplitudes() {
        assert!((amp - c(0.5)).norm() < 1e-12);
    }
}

#[test]
fn test_conjugated_phase_swaps_upper_pair() {
    // H(0) CP(1, 0, 1/2) H(0) is a NOT on qubit 0 controlled by qubit 1
    let r0: Vec<Complex64> = [0.1, 0.2, 0.3, 0.4]
        .iter()
        .zip([0.5, -0.1, 0.0, 0.2])
        .map(|(&re, im)| Complex64::new(re, im))
        .collect();
    let start = Statevector::from_amplitudes(r0.clone()).unwrap();
    let circuit = hadamard(0u32) | controlled_phase(1u32, 0u32, 0.5) | hadamard(0u32);
    let out = qsim_engine::apply_circuit(&circuit, &start).unwrap();
    let expected = [r0[0], r0[1], r0[3], r0[2]];
    for (a, b) in out.amplitudes().iter().zip(&expected) {
        assert!((a - b).norm() < 1e-12);
    }
}

#[test]
fn test_multi_controlled_not_flips_only_when_all_set() {
    let controls = [QubitId(0), QubitId(1), QubitId(2)];
    let circuit = composite::cn_not(&controls, QubitId(3)).unwrap();
    let sim = BitwiseSimulator::new();
    for index in 0..16usize {
        let out = sim
            .apply_circuit(&circuit, &Statevector::basis(4, index).unwrap())
            .unwrap();
        let expected = if index & 0b0111 == 0b0111 { index ^ 0b1000 } else { index };
        assert!((out[expected] - c(1.0)).norm() < 1e-9, "input {index:04b}");
    }
}
