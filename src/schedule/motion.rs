use crate::{
    animation::ease::Ease,
    foundation::error::{SeqError, SeqResult},
};

/// Fraction of `enter_portion` over which the previous frame fades out once the next one starts.
pub const EXIT_PORTION_RATIO: f64 = 0.6;

/// Tunable constants of the replace-mode motion.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MotionConfig {
    /// Horizontal slide distance at the start of entry, in percent of viewport width.
    pub slide_vw: f64,
    /// Portion of each segment spent entering, in `(0, 1]`.
    pub enter_portion: f64,
    /// Blur radius at the start of entry, in output pixels.
    pub blur_from: f64,
    /// Scale at the start of entry; settles to `1`.
    pub scale_from: f64,
    /// Easing for offset, scale, and blur during entry. Opacity is always linear.
    pub ease: Ease,
    /// Keep frame 0 fully opaque at the start boundary instead of fading it in.
    pub hold_first: bool,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            slide_vw: 20.0,
            enter_portion: 0.65,
            blur_from: 50.0,
            scale_from: 1.05,
            ease: Ease::Linear,
            hold_first: true,
        }
    }
}

impl MotionConfig {
    /// Check ranges of every constant.
    pub fn validate(&self) -> SeqResult<()> {
        for (name, v) in [
            ("slide_vw", self.slide_vw),
            ("enter_portion", self.enter_portion),
            ("blur_from", self.blur_from),
            ("scale_from", self.scale_from),
        ] {
            if !v.is_finite() {
                return Err(SeqError::validation(format!("motion.{name} must be finite")));
            }
        }
        if self.enter_portion <= 0.0 || self.enter_portion > 1.0 {
            return Err(SeqError::validation("motion.enter_portion must be in (0, 1]"));
        }
        if self.blur_from < 0.0 {
            return Err(SeqError::validation("motion.blur_from must be >= 0"));
        }
        if self.scale_from <= 0.0 {
            return Err(SeqError::validation("motion.scale_from must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/motion.rs"]
mod tests;
