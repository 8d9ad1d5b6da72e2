//! Data model: isotopes, decay parameters and decay series.

use std::f64::consts::LN_2;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_SAMPLE_COUNT, MIN_SAMPLE_COUNT, MIN_STEP_DECAY};
use crate::error::DecayError;

/// A catalogued isotope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Isotope {
    /// Identifier as written in the reference table, e.g. `Plutonium-239`.
    pub name: String,
    /// Half-life in years. Always positive and finite for catalogued entries.
    pub half_life: f64,
}

impl Isotope {
    pub fn new(name: impl Into<String>, half_life: f64) -> Self {
        Self { name: name.into(), half_life }
    }
}

/// Validated inputs of one decay computation.
///
/// Construction is the only place the engine preconditions are checked;
/// a `DecayParams` value always describes a computable series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DecayParams {
    half_life: f64,
    initial_quantity: f64,
    max_half_lives: f64,
    sample_count: usize,
}

impl DecayParams {
    /// Validate and bundle the engine inputs.
    ///
    /// Fails with [`DecayError::InvalidParameter`] when any real input is
    /// non-positive or non-finite, when `sample_count < 2`, when the
    /// horizon `half_life * max_half_lives` overflows, or when the curve
    /// could not stay strictly decreasing in `f64`: the quantity at the
    /// horizon must be a normal float and each step must decay by at least
    /// [`MIN_STEP_DECAY`].
    pub fn new(
        half_life: f64,
        initial_quantity: f64,
        max_half_lives: f64,
        sample_count: usize,
    ) -> Result<Self, DecayError> {
        positive_finite("half_life", half_life)?;
        positive_finite("n_0", initial_quantity)?;
        positive_finite("max_half_lives", max_half_lives)?;
        if sample_count < MIN_SAMPLE_COUNT {
            return Err(DecayError::invalid(
                "sample_count",
                sample_count as f64,
                "must be >= 2",
            ));
        }
        let horizon = half_life * max_half_lives;
        if !horizon.is_finite() {
            return Err(DecayError::invalid(
                "max_half_lives",
                max_half_lives,
                "horizon half_life * max_half_lives must be finite",
            ));
        }
        let tail_fraction = (-LN_2 * max_half_lives).exp();
        if !tail_fraction.is_normal() || !(initial_quantity * tail_fraction).is_normal() {
            return Err(DecayError::invalid(
                "max_half_lives",
                max_half_lives,
                "quantity at the horizon must not underflow",
            ));
        }
        if LN_2 * max_half_lives / ((sample_count - 1) as f64) < MIN_STEP_DECAY {
            return Err(DecayError::invalid(
                "sample_count",
                sample_count as f64,
                "too many samples to resolve the decay between steps",
            ));
        }
        Ok(Self { half_life, initial_quantity, max_half_lives, sample_count })
    }

    /// Same as [`DecayParams::new`] with [`DEFAULT_SAMPLE_COUNT`] samples.
    pub fn with_default_samples(
        half_life: f64,
        initial_quantity: f64,
        max_half_lives: f64,
    ) -> Result<Self, DecayError> {
        Self::new(half_life, initial_quantity, max_half_lives, DEFAULT_SAMPLE_COUNT)
    }

    pub fn half_life(&self) -> f64 {
        self.half_life
    }

    pub fn initial_quantity(&self) -> f64 {
        self.initial_quantity
    }

    pub fn max_half_lives(&self) -> f64 {
        self.max_half_lives
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// End of the time axis: `half_life * max_half_lives`.
    pub fn horizon(&self) -> f64 {
        self.half_life * self.max_half_lives
    }
}

fn positive_finite(name: &'static str, value: f64) -> Result<(), DecayError> {
    if value.is_nan() || value.is_infinite() {
        return Err(DecayError::invalid(name, value, "must be finite"));
    }
    if value <= 0.0 {
        return Err(DecayError::invalid(name, value, "must be > 0"));
    }
    Ok(())
}

/// One sample of a decay curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayPoint {
    /// Elapsed time in years.
    pub time: f64,
    /// Remaining nuclei.
    pub quantity: f64,
}

/// Ordered, immutable decay curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecaySeries {
    points: Vec<DecayPoint>,
}

impl DecaySeries {
    pub fn from_points(points: Vec<DecayPoint>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[DecayPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&DecayPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&DecayPoint> {
        self.points.last()
    }

    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.time)
    }

    pub fn quantities(&self) -> impl Iterator<Item = f64> + '_ {
        self.points.iter().map(|p| p.quantity)
    }

    /// Split into parallel `(times, quantities)` columns, the shape charts consume.
    pub fn into_columns(self) -> (Vec<f64>, Vec<f64>) {
        self.points.into_iter().map(|p| (p.time, p.quantity)).unzip()
    }
}

impl<'a> IntoIterator for &'a DecaySeries {
    type Item = &'a DecayPoint;
    type IntoIter = std::slice::Iter<'a, DecayPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
