//! Shor's factorisation.
//!
//! [`PeriodFinder`] is the quantum part: it estimates a multiple of
//! `2^w / r`, where `r` is the order of `a` modulo `N`. [`Shor`] wraps it in
//! the classical reduction from factoring to order finding.

use num_complex::Complex64;
use qsim_engine::{Simulator, Statevector};
use qsim_ir::{Circuit, hadamard};
use rand::{Rng, RngCore};
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::MAX_REGISTER_QUBITS;
use crate::error::{AlgoError, AlgoResult};
use crate::qft::{bit_reverse, qft};

/// Attempts made by [`Shor::factor`] before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 32;

/// Quantum order-finding routine for a fixed modulus.
///
/// The register holds two words of `w = ceil(log2 N)` qubits: the low word
/// is the exponent `x`, the high word receives `a^x mod N`.
pub struct PeriodFinder<'a, S: Simulator + ?Sized> {
    sim: &'a S,
    n: u64,
    word_qubits: usize,
}

impl<'a, S: Simulator + ?Sized> PeriodFinder<'a, S> {
    /// Create a period finder for modulus `n`.
    ///
    /// # Errors
    ///
    /// [`AlgoError::InvalidArgument`] if `n < 2`, and
    /// [`AlgoError::RegisterTooLarge`] if `2·w` exceeds the qubit limit.
    pub fn new(sim: &'a S, n: u64) -> AlgoResult<Self> {
        if n < 2 {
            return Err(AlgoError::InvalidArgument(format!(
                "period finding needs a modulus above 1, got {n}"
            )));
        }
        let word_qubits = (u64::BITS - (n - 1).leading_zeros()) as usize;
        if 2 * word_qubits > MAX_REGISTER_QUBITS {
            return Err(AlgoError::RegisterTooLarge {
                qubits: 2 * word_qubits,
                max: MAX_REGISTER_QUBITS,
            });
        }
        Ok(Self {
            sim,
            n,
            word_qubits,
        })
    }

    /// Qubits per word.
    pub fn word_qubits(&self) -> usize {
        self.word_qubits
    }

    /// Total register width.
    pub fn register_qubits(&self) -> usize {
        2 * self.word_qubits
    }

    fn low_mask(&self) -> usize {
        (1 << self.word_qubits) - 1
    }

    /// `|x, 0⟩ → |x, a^x mod N⟩`, computed classically on the basis states.
    fn modular_exponentiation(&self, base: u64, state: &Statevector) -> AlgoResult<Statevector> {
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); state.len()];
        for (i, &amp) in state.amplitudes().iter().enumerate() {
            let x = i & self.low_mask();
            let fx = mod_pow(base, x as u64, self.n) as usize;
            amplitudes[x | (fx << self.word_qubits)] += amp;
        }
        Ok(Statevector::from_amplitudes(amplitudes)?)
    }

    /// Estimate `y ≈ k·2^w / r` for a random `k`.
    ///
    /// The returned value is already corrected for the bit reversal of the
    /// swap-free QFT.
    #[instrument(skip(self, rng), fields(n = self.n))]
    pub fn estimate_frequency(&self, base: u64, rng: &mut dyn RngCore) -> AlgoResult<usize> {
        let w = self.word_qubits;
        let uniform: Circuit = (0..w as u32).map(hadamard).collect();
        let state = self
            .sim
            .apply_circuit(&uniform, &Statevector::zero(self.register_qubits())?)?;
        let state = self.modular_exponentiation(base, &state)?;
        let state = self.sim.apply_circuit(&qft(w as u32, true), &state)?;

        let outcome = self.sim.measure(&state, rng)?;
        let frequency = bit_reverse(outcome & self.low_mask(), w);
        debug!(outcome, frequency, "measured frequency");
        Ok(frequency)
    }
}

/// Outcome of a successful factorisation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Factorisation {
    /// The factored number.
    pub n: u64,
    /// Smaller non-trivial factor.
    pub p: u64,
    /// Larger non-trivial factor.
    pub q: u64,
    /// Base that produced the factors.
    pub base: u64,
    /// Order of the base, or `None` when the base already shared a factor.
    pub period: Option<u64>,
    /// Attempts used, including the successful one.
    pub attempts: usize,
}

impl Factorisation {
    fn new(n: u64, a: u64, b: u64, base: u64, period: Option<u64>, attempts: usize) -> Self {
        Self {
            n,
            p: a.min(b),
            q: a.max(b),
            base,
            period,
            attempts,
        }
    }
}

/// Shor's algorithm for a fixed composite number.
#[derive(Debug, Clone)]
pub struct Shor {
    n: u64,
    max_attempts: usize,
}

impl Shor {
    /// Prepare to factor `n`.
    ///
    /// # Errors
    ///
    /// [`AlgoError::NotComposite`] if `n < 3` or `n` is prime.
    pub fn new(n: u64) -> AlgoResult<Self> {
        if n <= 2 || is_prime(n) {
            return Err(AlgoError::NotComposite(n));
        }
        Ok(Self {
            n,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        })
    }

    /// Override the attempt limit.
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// The number being factored.
    pub fn n(&self) -> u64 {
        self.n
    }

    /// Attempt limit.
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Factor `n` using `sim` for the period finding.
    ///
    /// # Errors
    ///
    /// [`AlgoError::FactorisationFailed`] once `max_attempts` bases have been
    /// tried without success. Simulator errors are propagated.
    #[instrument(skip(self, sim, rng), fields(n = self.n, simulator = sim.name()))]
    pub fn factor<S: Simulator + ?Sized>(
        &self,
        sim: &S,
        rng: &mut dyn RngCore,
    ) -> AlgoResult<Factorisation> {
        let n = self.n;
        let finder = PeriodFinder::new(sim, n)?;
        let binary_modulus = (1u64 << (u64::BITS - 1 - n.leading_zeros())) + 1;

        for attempt in 1..=self.max_attempts {
            let base = rng.gen_range(2..n);
            let shared = gcd(base, n);
            if shared != 1 {
                info!(base, factor = shared, "base shares a factor with n");
                return Ok(Factorisation::new(n, shared, n / shared, base, None, attempt));
            }

            let frequency = finder.estimate_frequency(base, &mut *rng)? as u64;
            let fraction = frequency as f64 / f64::from(1u32 << finder.word_qubits());
            let period_base = denominator(fraction, binary_modulus);
            let Some(period) = find_period(base, n, period_base, binary_modulus) else {
                debug!(attempt, base, frequency, "no period among multiples");
                continue;
            };
            debug!(attempt, base, frequency, period, "found period");

            if period % 2 == 1 {
                continue;
            }
            let x = mod_pow(base, period / 2, n);
            if x == 1 || x == n - 1 {
                continue;
            }

            let (a, b) = (gcd(x + 1, n), gcd(x - 1, n));
            if a == 1 || b == 1 || a == n || b == n {
                continue;
            }
            info!(base, period, p = a.min(b), q = a.max(b), "factorised");
            return Ok(Factorisation::new(n, a, b, base, Some(period), attempt));
        }

        Err(AlgoError::FactorisationFailed {
            n,
            attempts: self.max_attempts,
        })
    }
}

/// Smallest multiple of `period_base` below `limit` with `base^r ≡ 1 (mod n)`.
fn find_period(base: u64, n: u64, period_base: u64, limit: u64) -> Option<u64> {
    (1..)
        .map(|k| k * period_base)
        .take_while(|&r| r < limit)
        .find(|&r| mod_pow(base, r, n) == 1)
}

/// Deterministic primality test by 6k ± 1 trial division.
pub fn is_prime(x: u64) -> bool {
    match x {
        0 | 1 => false,
        2 | 3 => true,
        _ if x % 2 == 0 || x % 3 == 0 => false,
        _ => {
            let mut i = 5u64;
            while i.saturating_mul(i) <= x {
                if x % i == 0 || x % (i + 2) == 0 {
                    return false;
                }
                i += 6;
            }
            true
        }
    }
}

/// Greatest common divisor.
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// `base^exp mod modulus` by square-and-multiply.
pub fn mod_pow(base: u64, mut exp: u64, modulus: u64) -> u64 {
    if modulus == 1 {
        return 0;
    }
    let m = u128::from(modulus);
    let mut result = 1u128;
    let mut b = u128::from(base) % m;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result * b % m;
        }
        b = b * b % m;
        exp >>= 1;
    }
    result as u64
}

/// Denominator `q < qmax` of the best continued-fraction approximation of
/// `x`.
///
/// Expansion stops once the fractional remainder drops below `1/(2·qmax²)`
/// or the next convergent's denominator would reach `qmax`.
pub fn denominator(x: f64, qmax: u64) -> u64 {
    let threshold = 0.5 / (qmax as f64 * qmax as f64);
    let (mut q0, mut q1) = (0u64, 1u64);
    let mut y = x;
    loop {
        let z = y - y.floor();
        if z < threshold {
            return q1;
        }
        y = 1.0 / z;
        let q2 = (y.floor() as u64).saturating_mul(q1).saturating_add(q0);
        if q2 >= qmax {
            return q1;
        }
        (q0, q1) = (q1, q2);
    }
}
