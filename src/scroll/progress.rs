/// Normalized scroll position across a pinned region, always in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Progress(f64);

impl Progress {
    /// Start of the pinned region.
    pub const ZERO: Self = Self(0.0);
    /// End of the pinned region.
    pub const ONE: Self = Self(1.0);

    /// Clamp `v` into `[0, 1]`. Non-finite input maps to `0`.
    pub fn new(v: f64) -> Self {
        if !v.is_finite() {
            return Self::ZERO;
        }
        Self(v.clamp(0.0, 1.0))
    }

    /// Raw value.
    pub fn get(self) -> f64 {
        self.0
    }

    /// Evenly spaced progress values covering `[0, 1]` inclusive, `steps` of them.
    ///
    /// A single step yields `[0]`.
    pub fn sweep(steps: u64) -> impl Iterator<Item = Progress> {
        let denom = steps.saturating_sub(1).max(1) as f64;
        (0..steps).map(move |i| Progress::new(i as f64 / denom))
    }
}

impl From<f64> for Progress {
    fn from(v: f64) -> Self {
        Self::new(v)
    }
}

impl From<Progress> for f64 {
    fn from(p: Progress) -> Self {
        p.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/progress.rs"]
mod tests;
