//! Lazy sampling of a decay curve.

use std::f64::consts::LN_2;
use std::iter::FusedIterator;

use halflife_core::types::{DecayParams, DecayPoint};

/// Iterator over the `sample_count` points of one decay curve.
///
/// Point `i` sits at `t_i = horizon * i / (sample_count - 1)`; the last point
/// is pinned to `horizon` exactly so rounding in the step never shortens the
/// time axis.
#[derive(Debug, Clone)]
pub struct DecaySamples {
    initial_quantity: f64,
    decay_constant: f64,
    horizon: f64,
    step: f64,
    last: usize,
    front: usize,
    back: usize,
}

impl DecaySamples {
    pub fn new(params: &DecayParams) -> Self {
        let n = params.sample_count();
        let horizon = params.horizon();
        Self {
            initial_quantity: params.initial_quantity(),
            decay_constant: LN_2 / params.half_life(),
            horizon,
            step: horizon / (n - 1) as f64,
            last: n - 1,
            front: 0,
            back: n,
        }
    }

    fn point(&self, i: usize) -> DecayPoint {
        let time = if i == self.last { self.horizon } else { i as f64 * self.step };
        DecayPoint { time, quantity: self.initial_quantity * (-(self.decay_constant * time)).exp() }
    }
}

impl Iterator for DecaySamples {
    type Item = DecayPoint;

    fn next(&mut self) -> Option<DecayPoint> {
        if self.front >= self.back {
            return None;
        }
        let p = self.point(self.front);
        self.front += 1;
        Some(p)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.back - self.front;
        (n, Some(n))
    }

    fn nth(&mut self, n: usize) -> Option<DecayPoint> {
        self.front = self.front.saturating_add(n).min(self.back);
        self.next()
    }
}

impl DoubleEndedIterator for DecaySamples {
    fn next_back(&mut self) -> Option<DecayPoint> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.point(self.back))
    }
}

impl ExactSizeIterator for DecaySamples {}

impl FusedIterator for DecaySamples {}
