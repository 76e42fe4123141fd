//! qasm2circ text export.
//!
//! Emits the small qasm dialect understood by the `qasm2circ` diagram
//! tool. Hadamard is a builtin there; controlled-phase is declared once as
//! a custom controlled operation labelled `\phi`.

use std::fmt::Write;

use crate::circuit::Circuit;
use crate::gate::Gate;

/// Emit `circuit` as qasm2circ source.
pub fn emit(circuit: &Circuit) -> String {
    let mut out = String::new();

    out.push_str("\tdef\tc-P,1,'\\phi'\n");

    for i in 0..circuit.num_qubits() {
        let _ = writeln!(out, "\tqubit\tq{i}");
    }

    for gate in circuit {
        match gate {
            Gate::Hadamard(q) => {
                let _ = writeln!(out, "\th\tq{}", q.0);
            }
            Gate::ControlledPhase {
                control, target, ..
            } => {
                let _ = writeln!(out, "\tc-P\tq{},q{}", control.0, target.0);
            }
        }
    }

    out
}
