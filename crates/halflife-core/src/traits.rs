//! Trait boundary between the decay engine and its callers.

use crate::error::DecayError;
use crate::types::{DecayParams, DecaySeries};

/// Pure computation of radioactive decay curves.
///
/// The exponential law `N(t) = N0 * exp(-ln(2) * t / T½)` is evaluated
/// in `f64`. Implemented by the decay engine (halflife-decay).
pub trait DecayCalculator: Send + Sync {
    /// Decay constant `ln(2) / half_life`, per year.
    fn decay_constant(&self, half_life: f64) -> Result<f64, DecayError>;

    /// Remaining quantity of `n_0` nuclei after `time` years.
    fn quantity_at(&self, half_life: f64, n_0: f64, time: f64) -> Result<f64, DecayError>;

    /// Sample the curve described by already-validated parameters.
    fn series(&self, params: &DecayParams) -> DecaySeries;

    /// Validate the inputs and sample `sample_count` points uniformly over
    /// `[0, half_life * max_half_lives]`.
    ///
    /// Default implementation: [`DecayParams::new`] followed by [`DecayCalculator::series`].
    fn compute_decay(
        &self,
        half_life: f64,
        n_0: f64,
        max_half_lives: f64,
        sample_count: usize,
    ) -> Result<DecaySeries, DecayError> {
        let params = DecayParams::new(half_life, n_0, max_half_lives, sample_count)?;
        Ok(self.series(&params))
    }

    /// Fraction of nuclei left after `time` years, in `[0, 1]`.
    ///
    /// Default implementation: `quantity_at(half_life, 1.0, time)`.
    fn remaining_fraction(&self, half_life: f64, time: f64) -> Result<f64, DecayError> {
        self.quantity_at(half_life, 1.0, time)
    }
}
