//! Quantum Fourier transform.

use qsim_ir::{Circuit, controlled_phase, hadamard};

pub use qsim_engine::bits::reverse_bits as bit_reverse;

/// QFT on qubits `0..width`, most significant qubit first.
///
/// The closing swap network is omitted, so the transform of `|x⟩` comes out
/// with its bits reversed: measure, then apply [`bit_reverse`]. With
/// `inverse` every phase is negated, which yields the inverse transform
/// under the same bit-reversed output convention.
pub fn qft(width: u32, inverse: bool) -> Circuit {
    let sign = if inverse { -1.0 } else { 1.0 };
    (0..width)
        .rev()
        .map(|target| {
            (0..target)
                .rev()
                .map(|control| {
                    let turns = sign / 2f64.powi((target - control + 1) as i32);
                    controlled_phase(control, target, turns)
                })
                .fold(hadamard(target), |acc, cp| acc | cp)
        })
        .collect()
}
