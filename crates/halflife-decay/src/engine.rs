//! Decay engine implementing the [`DecayCalculator`] trait.
//!
//! Provides the closed-form exponential decay computation used by the
//! dashboard and the CLI. All inputs are validated before any arithmetic;
//! the engine never returns NaN or negative quantities.

use std::f64::consts::LN_2;

use halflife_core::error::DecayError;
use halflife_core::traits::DecayCalculator;
use halflife_core::types::{DecayParams, DecaySeries};

use crate::samples::DecaySamples;

/// The production decay calculator.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecayEngine;

impl DecayEngine {
    /// Create a new DecayEngine.
    pub fn new() -> Self {
        Self
    }

    /// Lazily sample the curve for validated parameters.
    pub fn samples(&self, params: &DecayParams) -> DecaySamples {
        DecaySamples::new(params)
    }
}

fn check_half_life(half_life: f64) -> Result<(), DecayError> {
    if !half_life.is_finite() {
        return Err(DecayError::invalid("half_life", half_life, "must be finite"));
    }
    if half_life <= 0.0 {
        return Err(DecayError::invalid("half_life", half_life, "must be > 0"));
    }
    Ok(())
}

impl DecayCalculator for DecayEngine {
    fn decay_constant(&self, half_life: f64) -> Result<f64, DecayError> {
        check_half_life(half_life)?;
        Ok(LN_2 / half_life)
    }

    fn quantity_at(&self, half_life: f64, n_0: f64, time: f64) -> Result<f64, DecayError> {
        let lambda = self.decay_constant(half_life)?;
        if !n_0.is_finite() || n_0 <= 0.0 {
            return Err(DecayError::invalid("n_0", n_0, "must be finite and > 0"));
        }
        if !time.is_finite() || time < 0.0 {
            return Err(DecayError::invalid("time", time, "must be finite and >= 0"));
        }
        Ok(n_0 * (-(lambda * time)).exp())
    }

    fn series(&self, params: &DecayParams) -> DecaySeries {
        DecaySeries::from_points(self.samples(params).collect())
    }
}

/// Sample `sample_count` points of the decay curve of `n_0` nuclei with the
/// given half-life, uniformly over `[0, half_life * max_half_lives]`.
///
/// Pass [`DEFAULT_SAMPLE_COUNT`](halflife_core::constants::DEFAULT_SAMPLE_COUNT)
/// for the usual 500-point curve.
///
/// Inputs whose curve would underflow before the horizon, or whose steps are
/// too fine to tell neighbouring quantities apart, are rejected, so every
/// returned series is strictly decreasing.
pub fn compute_decay(
    half_life: f64,
    n_0: f64,
    max_half_lives: f64,
    sample_count: usize,
) -> Result<DecaySeries, DecayError> {
    DecayEngine::new().compute_decay(half_life, n_0, max_half_lives, sample_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use halflife_core::constants::DEFAULT_SAMPLE_COUNT;
    use proptest::prelude::*;

    fn engine() -> DecayEngine {
        DecayEngine::new()
    }

    // --- compute_decay ---

    #[test]
    fn three_point_scenario() {
        let s = compute_decay(10.0, 1000.0, 2.0, 3).unwrap();
        assert_eq!(s.times().collect::<Vec<_>>(), vec![0.0, 10.0, 20.0]);
        let q: Vec<_> = s.quantities().collect();
        assert_eq!(q[0], 1000.0);
        assert_relative_eq!(q[1], 500.0, max_relative = 1e-9);
        assert_relative_eq!(q[2], 250.0, max_relative = 1e-9);
    }

    #[test]
    fn default_sample_count_curve() {
        let s = compute_decay(24110.0, 1000.0, 10.0, DEFAULT_SAMPLE_COUNT).unwrap();
        assert_eq!(s.len(), 500);
        assert_eq!(s.first().unwrap().time, 0.0);
        assert_eq!(s.last().unwrap().time, 241_100.0);
        assert_relative_eq!(s.last().unwrap().quantity, 1000.0 / 1024.0, max_relative = 1e-9);
    }

    #[test]
    fn initial_quantity_is_exact() {
        let s = compute_decay(0.3789, 123.456, 7.5, 50).unwrap();
        assert_eq!(s.first().unwrap().quantity, 123.456);
    }

    #[test]
    fn strictly_decreasing() {
        let s = compute_decay(5730.0, 1e6, 10.0, 500).unwrap();
        let q: Vec<_> = s.quantities().collect();
        assert!(q.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn fractional_horizon() {
        let s = compute_decay(2.0, 100.0, 0.5, 5).unwrap();
        assert_eq!(s.last().unwrap().time, 1.0);
        assert_relative_eq!(s.last().unwrap().quantity, 100.0 / 2f64.sqrt(), max_relative = 1e-12);
    }

    #[test]
    fn rejects_invalid_inputs() {
        for (h, n, k, s, name) in [
            (0.0, 1000.0, 2.0, 3, "half_life"),
            (-1.0, 1000.0, 2.0, 3, "half_life"),
            (10.0, 0.0, 2.0, 3, "n_0"),
            (10.0, -5.0, 2.0, 3, "n_0"),
            (10.0, 1000.0, 0.0, 3, "max_half_lives"),
            (10.0, 1000.0, 2.0, 1, "sample_count"),
        ] {
            let e = compute_decay(h, n, k, s).unwrap_err();
            assert!(matches!(e, DecayError::InvalidParameter { .. }));
            assert_eq!(e.parameter(), name);
        }
    }

    #[test]
    fn deterministic() {
        let a = compute_decay(432.2, 1000.0, 10.0, 500).unwrap();
        let b = compute_decay(432.2, 1000.0, 10.0, 500).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn series_matches_lazy_samples() {
        let p = DecayParams::new(28.79, 10.0, 3.0, 17).unwrap();
        let lazy: Vec<_> = engine().samples(&p).collect();
        assert_eq!(engine().series(&p).points(), lazy.as_slice());
    }

    // --- decay_constant / quantity_at ---

    #[test]
    fn decay_constant_of_unit_half_life_is_ln2() {
        assert_eq!(engine().decay_constant(1.0).unwrap(), LN_2);
        assert!(engine().decay_constant(0.0).is_err());
        assert!(engine().decay_constant(f64::INFINITY).is_err());
    }

    #[test]
    fn quantity_at_half_life_is_half() {
        let q = engine().quantity_at(30.17, 1000.0, 30.17).unwrap();
        assert_relative_eq!(q, 500.0, max_relative = 1e-12);
    }

    #[test]
    fn quantity_at_rejects_negative_time() {
        let e = engine().quantity_at(1.0, 1.0, -0.5).unwrap_err();
        assert_eq!(e.parameter(), "time");
        assert_eq!(engine().quantity_at(1.0, 0.0, 1.0).unwrap_err().parameter(), "n_0");
    }

    #[test]
    fn remaining_fraction_defaults_to_unit_quantity() {
        let f = engine().remaining_fraction(5.0, 10.0).unwrap();
        assert_relative_eq!(f, 0.25, max_relative = 1e-12);
    }

    #[test]
    fn deep_tail_stays_strictly_decreasing() {
        let q: Vec<f64> = compute_decay(1.0, 1.0, 1000.0, 500).unwrap().quantities().collect();
        assert!(q.iter().all(|v| v.is_normal()));
        assert!(q.windows(2).all(|w| w[1] < w[0]));
    }

    #[test]
    fn underflowing_tail_is_rejected() {
        let e = compute_decay(1.0, 1.0, 1100.0, 500).unwrap_err();
        assert_eq!(e.parameter(), "max_half_lives");
    }

    // --- proptest ---

    proptest! {
        #[test]
        fn first_point_is_initial_quantity(
            h in 1e-3f64..1e9,
            n in 1e-3f64..1e9,
            k in 0.1f64..50.0,
            s in 2usize..600,
        ) {
            let series = compute_decay(h, n, k, s).unwrap();
            prop_assert_eq!(series.len(), s);
            let first = series.first().unwrap();
            prop_assert_eq!(first.time, 0.0);
            prop_assert_eq!(first.quantity, n);
            prop_assert_eq!(series.last().unwrap().time, h * k);
        }

        #[test]
        fn quantities_strictly_decrease(
            h in 1e-3f64..1e9,
            n in 1e-3f64..1e9,
            k in 0.5f64..1000.0,
            s in 2usize..1000,
        ) {
            let q: Vec<f64> = compute_decay(h, n, k, s).unwrap().quantities().collect();
            for w in q.windows(2) {
                prop_assert!(w[1] < w[0], "not decreasing: {} then {}", w[0], w[1]);
            }
        }

        #[test]
        fn whole_half_lives_halve_the_quantity(
            h in 1e-3f64..1e9,
            n in 1e-3f64..1e9,
            k in 0u32..40,
        ) {
            let q = engine().quantity_at(h, n, k as f64 * h).unwrap();
            let expected = n / 2f64.powi(k as i32);
            prop_assert!(((q - expected) / expected).abs() < 1e-6);
        }
    }
}
