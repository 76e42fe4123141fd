//! Immutable circuit values and combinators.

use std::fmt;
use std::ops::{BitOr, Mul};
use std::sync::Arc;

use crate::gate::Gate;
use crate::qubit::QubitId;

/// An ordered sequence of gates.
///
/// Circuits are persistent values: the gate list is a shared, immutable
/// slice, so cloning is cheap and combinators such as [`Circuit::concat`]
/// and [`Circuit::repeat`] always produce a new value. No circuit can
/// observe changes made through another one.
///
/// Gates apply left to right.
#[derive(Clone, Default, PartialEq)]
pub struct Circuit {
    gates: Arc<[Gate]>,
}

impl Circuit {
    /// Create an empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a circuit from a gate sequence.
    pub fn from_gates(gates: impl IntoIterator<Item = Gate>) -> Self {
        Self {
            gates: gates.into_iter().collect(),
        }
    }

    /// A circuit holding a single gate.
    pub fn single(gate: Gate) -> Self {
        Self::from_gates([gate])
    }

    /// The gates of this circuit, in application order.
    #[inline]
    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    /// Iterate over the gates in application order.
    pub fn iter(&self) -> std::slice::Iter<'_, Gate> {
        self.gates.iter()
    }

    /// Number of gates.
    #[inline]
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Whether the circuit has no gates.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.gates.is_empty()
    }

    /// Minimum register width needed to run this circuit.
    ///
    /// This is one more than the highest operand index across all gates,
    /// or zero for the empty circuit.
    pub fn num_qubits(&self) -> usize {
        self.gates
            .iter()
            .map(|g| g.max_qubit().index() + 1)
            .max()
            .unwrap_or(0)
    }

    /// All distinct qubits touched by this circuit, in ascending order.
    pub fn qubits(&self) -> Vec<QubitId> {
        let mut qubits: Vec<QubitId> = self.gates.iter().flat_map(Gate::operands).collect();
        qubits.sort_unstable();
        qubits.dedup();
        qubits
    }

    /// Append `other` after `self`, returning a new circuit.
    #[must_use]
    pub fn concat(&self, other: &Circuit) -> Circuit {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }
        Circuit::from_gates(self.gates.iter().chain(other.gates.iter()).copied())
    }

    /// Repeat this circuit `times` times, returning a new circuit.
    #[must_use]
    pub fn repeat(&self, times: usize) -> Circuit {
        match times {
            0 => Circuit::new(),
            1 => self.clone(),
            _ => Circuit::from_gates(
                std::iter::repeat_n(self.gates.iter().copied(), times).flatten(),
            ),
        }
    }

    /// The inverse circuit: gates reversed and individually inverted.
    #[must_use]
    pub fn inverse(&self) -> Circuit {
        Circuit::from_gates(self.gates.iter().rev().map(Gate::inverse))
    }
}

/// Hadamard on `qubit`.
pub fn hadamard(qubit: impl Into<QubitId>) -> Circuit {
    Circuit::single(Gate::hadamard(qubit))
}

/// Controlled-phase of `turns` on (`control`, `target`).
pub fn controlled_phase(
    control: impl Into<QubitId>,
    target: impl Into<QubitId>,
    turns: f64,
) -> Circuit {
    Circuit::single(Gate::controlled_phase(control, target, turns))
}

/// `a` followed by `b`.
pub fn concat(a: &Circuit, b: &Circuit) -> Circuit {
    a.concat(b)
}

/// `circuit` repeated `times` times.
pub fn repeat(circuit: &Circuit, times: usize) -> Circuit {
    circuit.repeat(times)
}

impl BitOr<&Circuit> for &Circuit {
    type Output = Circuit;

    fn bitor(self, rhs: &Circuit) -> Circuit {
        self.concat(rhs)
    }
}

impl BitOr<Circuit> for Circuit {
    type Output = Circuit;

    fn bitor(self, rhs: Circuit) -> Circuit {
        self.concat(&rhs)
    }
}

impl BitOr<&Circuit> for Circuit {
    type Output = Circuit;

    fn bitor(self, rhs: &Circuit) -> Circuit {
        self.concat(rhs)
    }
}

impl Mul<usize> for &Circuit {
    type Output = Circuit;

    fn mul(self, times: usize) -> Circuit {
        self.repeat(times)
    }
}

impl Mul<usize> for Circuit {
    type Output = Circuit;

    fn mul(self, times: usize) -> Circuit {
        self.repeat(times)
    }
}

impl FromIterator<Gate> for Circuit {
    fn from_iter<I: IntoIterator<Item = Gate>>(iter: I) -> Self {
        Circuit::from_gates(iter)
    }
}

impl FromIterator<Circuit> for Circuit {
    fn from_iter<I: IntoIterator<Item = Circuit>>(iter: I) -> Self {
        let mut gates = Vec::new();
        for circuit in iter {
            gates.extend_from_slice(circuit.gates());
        }
        Circuit::from_gates(gates)
    }
}

impl<'a> IntoIterator for &'a Circuit {
    type Item = &'a Gate;
    type IntoIter = std::slice::Iter<'a, Gate>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.gates.iter()).finish()
    }
}

impl fmt::Display for Circuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, gate) in self.gates.iter().enumerate() {
            if i > 0 {
                writeln!(f, " |")?;
            }
            write!(f, "{gate}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_circuit() {
        let c = Circuit::new();
        assert!(c.is_empty());
        assert_eq!(c.num_qubits(), 0);
        assert_eq!(c.to_string(), "");
    }

    #[test]
    fn test_num_qubits_inference() {
        let c = hadamard(0u32) | controlled_phase(5u32, 2u32, 0.5);
        assert_eq!(c.num_qubits(), 6);
        assert_eq!(c.qubits(), vec![QubitId(0), QubitId(2), QubitId(5)]);
    }

    #[test]
    fn test_concat_preserves_order() {
        let a = hadamard(0u32);
        let b = controlled_phase(0u32, 1u32, 0.25);
        let c = concat(&a, &b);
        assert_eq!(
            c.gates(),
            &[Gate::hadamard(0u32), Gate::controlled_phase(0u32, 1u32, 0.25)]
        );
    }

    #[test]
    fn test_concat_does_not_alias() {
        let a = hadamard(0u32);
        let b = hadamard(1u32);
        let ab = &a | &b;
        let abb = &ab | &b;

        // Building `abb` must not change `a` or `ab`.
        assert_eq!(a.len(), 1);
        assert_eq!(ab.len(), 2);
        assert_eq!(abb.len(), 3);
    }

    #[test]
    fn test_repeat() {
        let c = controlled_phase(0u32, 1u32, 0.1);
        assert!(repeat(&c, 0).is_empty());
        assert_eq!(repeat(&c, 1), c);
        let r = &c * 3;
        assert_eq!(r.len(), 3);
        assert!(r.iter().all(|g| *g == Gate::controlled_phase(0u32, 1u32, 0.1)));
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_inverse() {
        let c = hadamard(0u32) | controlled_phase(0u32, 1u32, 0.25);
        let inv = c.inverse();
        assert_eq!(
            inv.gates(),
            &[
                Gate::controlled_phase(0u32, 1u32, -0.25),
                Gate::hadamard(0u32)
            ]
        );
    }

    #[test]
    fn test_collect_circuits() {
        let all_h: Circuit = (0..4u32).map(hadamard).collect();
        assert_eq!(all_h.len(), 4);
        assert_eq!(all_h.num_qubits(), 4);
    }

    #[test]
    fn test_display() {
        let c = hadamard(0u32) | controlled_phase(0u32, 1u32, 0.5);
        assert_eq!(c.to_string(), "Hadamard(0) |\nControlled-Phase(0, 1, 0.5)");
    }
}
