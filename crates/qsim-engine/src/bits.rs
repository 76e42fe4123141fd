//! Index arithmetic between the full register basis and a reduced basis.
//!
//! A basis-state index `i` of an n-qubit register stores qubit `q` in bit
//! `q`. For an ordered list of `k` qubits, the *reduced* index of `i` is the
//! k-bit number whose bit `m` is bit `qubits[m]` of `i`.

/// Whether `bit` of `i` is set.
#[inline]
pub fn is_bit_set(i: usize, bit: usize) -> bool {
    (i >> bit) & 1 != 0
}

/// Project the full index `i` onto the reduced basis of `qubits`.
#[inline]
pub fn gather(i: usize, qubits: &[usize]) -> usize {
    qubits
        .iter()
        .enumerate()
        .fold(0, |j, (m, &q)| j | (usize::from(is_bit_set(i, q)) << m))
}

/// Inverse of [`gather`]: place bit `m` of `j` at bit `qubits[m]`.
///
/// Bits of the result outside `qubits` are zero.
#[inline]
pub fn scatter(j: usize, qubits: &[usize]) -> usize {
    qubits
        .iter()
        .enumerate()
        .fold(0, |i, (m, &q)| i | (((j >> m) & 1) << q))
}

/// Bit mask with every bit in `qubits` set.
#[inline]
pub fn mask(qubits: &[usize]) -> usize {
    qubits.iter().fold(0, |acc, &q| acc | (1 << q))
}

/// Reverse the lowest `width` bits of `value`.
#[inline]
pub fn reverse_bits(value: usize, width: usize) -> usize {
    (0..width).fold(0, |acc, b| acc | (((value >> b) & 1) << (width - 1 - b)))
}
