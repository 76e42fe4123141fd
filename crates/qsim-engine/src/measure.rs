//! Computational-basis measurement.
//!
//! Measurement samples an outcome from `|a_i|²` and leaves the state as it
//! was; collapse is left to the caller, which can prepare the post-measurement
//! basis state itself if it needs one.

use rand::{Rng, RngCore};
use rustc_hash::FxHashMap;
use tracing::{instrument, warn};

use crate::config::{DriftPolicy, SimConfig};
use crate::error::{EngineError, EngineResult};
use crate::simulator::Simulator;
use crate::statevector::Statevector;

/// Sample a basis-state index with the default [`SimConfig`].
pub fn measure(state: &Statevector, rng: &mut dyn RngCore) -> EngineResult<usize> {
    measure_with(state, rng, &SimConfig::default())
}

/// Sample a basis-state index, checking normalisation against `config`.
///
/// # Errors
///
/// [`EngineError::NumericalInstability`] if the total probability is zero,
/// or deviates from 1 beyond the tolerance under [`DriftPolicy::Error`].
pub fn measure_with(
    state: &Statevector,
    rng: &mut dyn RngCore,
    config: &SimConfig,
) -> EngineResult<usize> {
    let probabilities = state.probabilities();
    let total: f64 = probabilities.iter().sum();
    let tolerance = config.normalization_tolerance;

    if total <= 0.0 || !total.is_finite() {
        return Err(EngineError::NumericalInstability { total, tolerance });
    }
    if (total - 1.0).abs() > tolerance {
        match config.drift_policy {
            DriftPolicy::Error => {
                return Err(EngineError::NumericalInstability { total, tolerance });
            }
            DriftPolicy::Renormalize => {
                warn!(total, tolerance, "renormalising drifted state before sampling");
            }
        }
    }

    let threshold = rng.r#gen::<f64>() * total;
    let mut cumulative = 0.0;
    for (index, &p) in probabilities.iter().enumerate() {
        cumulative += p;
        if cumulative > threshold {
            return Ok(index);
        }
    }

    // Rounding left the threshold past the final partial sum
    Ok(probabilities.iter().rposition(|&p| p > 0.0).unwrap_or(0))
}

/// Histogram of measurement outcomes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counts {
    counts: FxHashMap<usize, u64>,
    shots: u64,
}

impl Counts {
    /// Create an empty histogram.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of `outcome`.
    pub fn record(&mut self, outcome: usize) {
        *self.counts.entry(outcome).or_insert(0) += 1;
        self.shots += 1;
    }

    /// How often `outcome` was seen.
    pub fn get(&self, outcome: usize) -> u64 {
        self.counts.get(&outcome).copied().unwrap_or(0)
    }

    /// Total number of recorded shots.
    pub fn total(&self) -> u64 {
        self.shots
    }

    /// Number of distinct outcomes.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Fraction of shots that produced `outcome`.
    pub fn frequency(&self, outcome: usize) -> f64 {
        if self.shots == 0 {
            0.0
        } else {
            self.get(outcome) as f64 / self.shots as f64
        }
    }

    /// The outcome seen most often, ties broken by the smaller index.
    pub fn most_frequent(&self) -> Option<usize> {
        self.sorted().first().map(|&(outcome, _)| outcome)
    }

    /// Outcomes by descending count, then ascending index.
    pub fn sorted(&self) -> Vec<(usize, u64)> {
        let mut entries: Vec<_> = self.counts.iter().map(|(&k, &v)| (k, v)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        entries
    }
}

impl FromIterator<usize> for Counts {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut counts = Counts::new();
        for outcome in iter {
            counts.record(outcome);
        }
        counts
    }
}

/// Measure the same `state` `shots` times.
#[instrument(skip(sim, state, rng), fields(simulator = sim.name(), qubits = state.num_qubits()))]
pub fn sample_counts<S: Simulator + ?Sized>(
    sim: &S,
    state: &Statevector,
    shots: u64,
    rng: &mut dyn RngCore,
) -> EngineResult<Counts> {
    (0..shots).map(|_| sim.measure(state, &mut *rng)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex64;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn state(amplitudes: &[f64]) -> Statevector {
        Statevector::from_amplitudes(amplitudes.iter().map(|&a| Complex64::new(a, 0.0)).collect())
            .unwrap()
    }

    #[test]
    fn test_basis_state_is_certain() {
        let sv = Statevector::basis(3, 6).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(measure(&sv, &mut rng).unwrap(), 6);
        }
    }

    #[test]
    fn test_zero_probability_outcomes_never_drawn() {
        let sv = state(&[0.0, 0.6, 0.0, 0.8]);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let outcome = measure(&sv, &mut rng).unwrap();
            assert!(outcome == 1 || outcome == 3);
        }
    }

    #[test]
    fn test_same_seed_same_outcomes() {
        let sv = state(&[0.5, 0.5, 0.5, 0.5]);
        let draw = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..16)
                .map(|_| measure(&sv, &mut rng).unwrap())
                .collect::<Vec<_>>()
        };
        assert_eq!(draw(42), draw(42));
    }

    #[test]
    fn test_drift_is_an_error_by_default() {
        let sv = state(&[1.0, 1.0]);
        let mut rng = StdRng::seed_from_u64(1);
        let err = measure(&sv, &mut rng).unwrap_err();
        assert!(matches!(err, EngineError::NumericalInstability { total, .. } if (total - 2.0).abs() < 1e-12));
    }

    #[test]
    fn test_renormalize_policy_samples() {
        let sv = state(&[0.0, 2.0]);
        let config = SimConfig {
            drift_policy: DriftPolicy::Renormalize,
            ..SimConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(measure_with(&sv, &mut rng, &config).unwrap(), 1);
    }

    #[test]
    fn test_zero_state_always_fails() {
        let sv = state(&[0.0, 0.0]);
        let config = SimConfig {
            drift_policy: DriftPolicy::Renormalize,
            ..SimConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(3);
        assert!(measure_with(&sv, &mut rng, &config).is_err());
    }

    #[test]
    fn test_counts() {
        let counts: Counts = [3, 1, 3, 0, 3, 1].into_iter().collect();
        assert_eq!(counts.total(), 6);
        assert_eq!(counts.len(), 3);
        assert_eq!(counts.get(3), 3);
        assert_eq!(counts.get(2), 0);
        assert_eq!(counts.sorted(), vec![(3, 3), (1, 2), (0, 1)]);
        assert_eq!(counts.most_frequent(), Some(3));
        assert!((counts.frequency(1) - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(Counts::new().frequency(0), 0.0);
    }
}
