use crate::foundation::error::{SeqError, SeqResult};
use crate::schedule::motion::EXIT_PORTION_RATIO;

/// Progress-space boundaries owned by one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FrameWindow {
    /// Segment start; entry begins here.
    pub start: f64,
    /// Entry is complete here.
    pub enter_end: f64,
    /// Next frame starts entering; this frame starts fading (unless last).
    pub next_start: f64,
    /// This frame is fully faded (unless last).
    pub next_enter_end: f64,
}

impl FrameWindow {
    /// Boundaries of frame `index` in a sequence of `count` frames.
    pub fn for_frame(index: usize, count: usize, enter_portion: f64) -> SeqResult<Self> {
        if count == 0 {
            return Err(SeqError::schedule("sequence has no frames"));
        }
        if index >= count {
            return Err(SeqError::schedule(format!(
                "frame index {index} out of range for {count} frames"
            )));
        }

        let segment = 1.0 / count as f64;
        let start = index as f64 * segment;
        let enter_end = start + segment * enter_portion;
        let next_start = ((index + 1) as f64 * segment).min(1.0);
        let next_enter_end =
            (next_start + segment * enter_portion * EXIT_PORTION_RATIO).min(1.0);

        Ok(Self {
            start,
            enter_end,
            next_start,
            next_enter_end,
        })
    }

    /// Opacity control points, forced non-decreasing against rounding.
    pub(crate) fn opacity_stops(&self) -> [f64; 4] {
        let mut stops = [
            self.start,
            self.enter_end,
            self.next_start,
            self.next_enter_end,
        ];
        for k in 1..stops.len() {
            stops[k] = stops[k].max(stops[k - 1]);
        }
        stops
    }

    /// `true` while `p` is inside `[start, enter_end)`.
    pub fn is_entering(&self, p: f64) -> bool {
        self.start <= p && p < self.enter_end
    }
}

/// Visual parameters of one layer at one progress value.
///
/// Any render target can consume this directly: the CPU compositor in this crate, a retained UI
/// tree, or CSS (`translateX(offset_vw vw) scale(scale)`, `filter: blur(blur_px px)`, `opacity`).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FrameStyle {
    /// Frame index in the sequence.
    pub index: usize,
    /// Paint order; higher paints over lower.
    pub z_index: i32,
    /// Horizontal offset in percent of viewport width.
    pub offset_vw: f64,
    /// Uniform scale about the layer center.
    pub scale: f64,
    /// Gaussian blur radius in output pixels.
    pub blur_px: f64,
    /// Layer opacity in `[0, 1]`.
    pub opacity: f64,
}

impl FrameStyle {
    /// A settled (no offset, unit scale, no blur) layer with the given opacity.
    pub fn settled(index: usize, z_index: i32, opacity: f64) -> Self {
        Self {
            index,
            z_index,
            offset_vw: 0.0,
            scale: 1.0,
            blur_px: 0.0,
            opacity,
        }
    }

    /// `true` when the layer contributes pixels.
    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }

    /// `true` when the entry motion has finished.
    pub fn is_settled(&self) -> bool {
        self.offset_vw == 0.0 && self.scale == 1.0 && self.blur_px == 0.0
    }

    /// Horizontal offset in pixels for a viewport of `viewport_width` pixels.
    pub fn offset_px(&self, viewport_width: f64) -> f64 {
        self.offset_vw / 100.0 * viewport_width
    }
}
