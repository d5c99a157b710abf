/// Timing curve shaping a frame's entry, named after the CSS / framer-motion keywords.
///
/// Each curve is the cubic bezier from `(0, 0)` to `(1, 1)` with the listed control points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Straight line; scroll position maps 1:1 onto entry.
    #[default]
    Linear,
    /// `cubic-bezier(0.42, 0, 1, 1)`.
    EaseIn,
    /// `cubic-bezier(0, 0, 0.58, 1)`.
    EaseOut,
    /// `cubic-bezier(0.42, 0, 0.58, 1)`.
    EaseInOut,
}

impl Ease {
    fn control_points(self) -> Option<[f64; 4]> {
        match self {
            Self::Linear => None,
            Self::EaseIn => Some([0.42, 0.0, 1.0, 1.0]),
            Self::EaseOut => Some([0.0, 0.0, 0.58, 1.0]),
            Self::EaseInOut => Some([0.42, 0.0, 0.58, 1.0]),
        }
    }

    /// Map normalized entry progress `t` onto eased progress. Input is clamped to `[0, 1]`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        let Some([x1, y1, x2, y2]) = self.control_points() else {
            return t;
        };
        if t == 0.0 || t == 1.0 {
            return t;
        }
        bezier(y1, y2, solve_param(x1, x2, t))
    }
}

/// One coordinate of the curve at parameter `s`; endpoints are fixed at 0 and 1.
fn bezier(c1: f64, c2: f64, s: f64) -> f64 {
    let u = 1.0 - s;
    3.0 * u * u * s * c1 + 3.0 * u * s * s * c2 + s * s * s
}

/// Parameter whose x coordinate is `x`. Control x values lie in `[0, 1]`, so x(s) is monotone.
fn solve_param(x1: f64, x2: f64, x: f64) -> f64 {
    let (mut lo, mut hi) = (0.0f64, 1.0f64);
    for _ in 0..48 {
        let mid = 0.5 * (lo + hi);
        if bezier(x1, x2, mid) < x {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
