//! Integration tests for Shor factorisation.

use proptest::prelude::*;
use qsim_algos::shor::{denominator, gcd, is_prime, mod_pow};
use qsim_algos::{AlgoError, PeriodFinder, Shor};
use qsim_engine::{BitwiseSimulator, MatrixSimulator};
use rand::SeedableRng;
use rand::rngs::StdRng;

// ---------------------------------------------------------------------------
// Factorisation
// ---------------------------------------------------------------------------

#[test]
fn test_factors_fifteen() {
    let sim = BitwiseSimulator::new();
    let shor = Shor::new(15).unwrap();
    for seed in 0..8 {
        let mut rng = StdRng::seed_from_u64(seed);
        let result = shor.factor(&sim, &mut rng).unwrap();
        assert_eq!((result.p, result.q), (3, 5), "seed {seed}");
        assert!(result.attempts <= shor.max_attempts());
    }
}

#[test]
fn test_factors_twenty_one() {
    let sim = BitwiseSimulator::new();
    let shor = Shor::new(21).unwrap();
    for seed in 0..4 {
        let mut rng = StdRng::seed_from_u64(seed);
        let result = shor.factor(&sim, &mut rng).unwrap();
        assert_eq!((result.p, result.q), (3, 7), "seed {seed}");
    }
}

#[test]
fn test_reported_period_is_the_order_of_the_base() {
    let sim = MatrixSimulator::new();
    let shor = Shor::new(15).unwrap();
    for seed in 0..8 {
        let result = shor.factor(&sim, &mut StdRng::seed_from_u64(seed)).unwrap();
        if let Some(r) = result.period {
            assert_eq!(mod_pow(result.base, r, 15), 1);
            assert!((1..r).all(|k| mod_pow(result.base, k, 15) != 1));
        } else {
            assert_ne!(gcd(result.base, 15), 1);
        }
    }
}

#[test]
fn test_primes_are_rejected() {
    assert!(matches!(Shor::new(7), Err(AlgoError::NotComposite(7))));
    assert!(matches!(Shor::new(2), Err(AlgoError::NotComposite(2))));
}

// ---------------------------------------------------------------------------
// Period finding
// ---------------------------------------------------------------------------

#[test]
fn test_frequency_estimates_are_multiples_of_inverse_period() {
    // 7 has order 4 modulo 15 and 4 divides 2^4, so the estimate is exact
    let sim = MatrixSimulator::new();
    let finder = PeriodFinder::new(&sim, 15).unwrap();
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..20 {
        let y = finder.estimate_frequency(7, &mut rng).unwrap();
        assert_eq!(y % 4, 0, "estimate {y} is not a multiple of 16/4");
    }
}

#[test]
fn test_register_width_is_two_words() {
    let sim = MatrixSimulator::new();
    let finder = PeriodFinder::new(&sim, 21).unwrap();
    assert_eq!(finder.word_qubits(), 5);
    assert_eq!(finder.register_qubits(), 10);
    assert!(matches!(
        PeriodFinder::new(&sim, 1),
        Err(AlgoError::InvalidArgument(_))
    ));
}

// ---------------------------------------------------------------------------
// Classical helpers
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn test_gcd_divides_both(a in 1u64..10_000, b in 1u64..10_000) {
        let g = gcd(a, b);
        prop_assert_eq!(a % g, 0);
        prop_assert_eq!(b % g, 0);
        prop_assert_eq!(gcd(a / g, b / g), 1);
    }

    #[test]
    fn test_mod_pow_matches_repeated_multiplication(base in 0u64..100, exp in 0u64..20, m in 1u64..500) {
        let expected = (0..exp).fold(1 % m, |acc, _| acc * base % m);
        prop_assert_eq!(mod_pow(base, exp, m), expected);
    }

    #[test]
    fn test_prime_test_agrees_with_trial_division(x in 0u64..5_000) {
        let naive = x >= 2 && (2..x).all(|d| x % d != 0);
        prop_assert_eq!(is_prime(x), naive);
    }

    #[test]
    fn test_denominator_recovers_small_fractions(q in 2u64..16, p_seed in 0u64..1_000) {
        let p = p_seed % q;
        prop_assume!(gcd(p, q) == 1);
        let x = p as f64 / q as f64;
        prop_assert_eq!(denominator(x, 17), q);
    }
}
