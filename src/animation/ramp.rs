use crate::{
    animation::ease::Ease,
    foundation::error::{SeqError, SeqResult},
};

/// Clamped piecewise-linear mapping from an input domain to output values.
///
/// `stops` must be non-decreasing. Inputs before the first stop yield the first value, inputs at or
/// past the last stop yield the last value. Between stops the segment is eased with `ease`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ramp<const N: usize> {
    stops: [f64; N],
    values: [f64; N],
    ease: Ease,
}

impl<const N: usize> Ramp<N> {
    /// Build a validated ramp with linear segments.
    pub fn new(stops: [f64; N], values: [f64; N]) -> SeqResult<Self> {
        Self::with_ease(stops, values, Ease::Linear)
    }

    /// Build a validated ramp whose segments are shaped by `ease`.
    pub fn with_ease(stops: [f64; N], values: [f64; N], ease: Ease) -> SeqResult<Self> {
        if N == 0 {
            return Err(SeqError::validation("ramp needs at least one stop"));
        }
        if stops.iter().chain(values.iter()).any(|v| !v.is_finite()) {
            return Err(SeqError::validation("ramp stops and values must be finite"));
        }
        if !stops.windows(2).all(|w| w[0] <= w[1]) {
            return Err(SeqError::validation("ramp stops must be sorted"));
        }
        Ok(Self {
            stops,
            values,
            ease,
        })
    }

    /// Sample the ramp at `x`.
    pub fn sample(&self, x: f64) -> f64 {
        let idx = self.stops.partition_point(|s| *s <= x);

        if idx == 0 {
            return self.values[0];
        }
        if idx >= N {
            return self.values[N - 1];
        }

        // stops[idx - 1] <= x < stops[idx], so the span is never zero here.
        let (a, b) = (idx - 1, idx);
        let t = (x - self.stops[a]) / (self.stops[b] - self.stops[a]);
        let te = self.ease.apply(t);
        self.values[a] + (self.values[b] - self.values[a]) * te
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ramp.rs"]
mod tests;
