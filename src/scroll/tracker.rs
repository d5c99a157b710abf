use crate::scroll::progress::Progress;

/// Anything that can report the current sequence progress.
///
/// `None` means scroll observation is unavailable; consumers fall back to a static display.
pub trait ProgressSource {
    /// Current progress, if it can be observed.
    fn progress(&self) -> Option<Progress>;
}

impl ProgressSource for Progress {
    fn progress(&self) -> Option<Progress> {
        Some(*self)
    }
}

/// Source for environments without scroll observation.
#[derive(Clone, Copy, Debug, Default)]
pub struct StaticSource;

impl ProgressSource for StaticSource {
    fn progress(&self) -> Option<Progress> {
        None
    }
}

/// Geometry of the tall container a sequence is pinned inside.
///
/// Offsets are document coordinates in pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PinnedRegion {
    /// Document offset of the region's top edge.
    pub top: f64,
    /// Total region height.
    pub height: f64,
    /// Viewport height; the pinned frame is this tall.
    pub viewport_height: f64,
}

impl PinnedRegion {
    /// Region sized to one viewport height per frame.
    pub fn for_sequence(top: f64, count: usize, viewport_height: f64) -> Self {
        Self {
            top,
            height: count as f64 * viewport_height,
            viewport_height,
        }
    }

    /// Scroll distance over which progress moves from 0 to 1.
    pub fn scroll_distance(&self) -> f64 {
        (self.height - self.viewport_height).max(0.0)
    }

    /// Progress for a viewport whose top edge sits at `scroll_y`.
    ///
    /// Progress starts when the region's top meets the viewport top and ends when the region's
    /// bottom meets the viewport bottom.
    pub fn progress_at(&self, scroll_y: f64) -> Progress {
        let dist = self.scroll_distance();
        let travelled = scroll_y - self.top;
        if dist <= 0.0 || !dist.is_finite() {
            return if travelled < 0.0 {
                Progress::ZERO
            } else {
                Progress::ONE
            };
        }
        Progress::new(travelled / dist)
    }

    /// Inverse of [`PinnedRegion::progress_at`] inside the scrollable span.
    pub fn scroll_for(&self, progress: Progress) -> f64 {
        self.top + progress.get() * self.scroll_distance()
    }
}

/// Continuously updated progress for one pinned region.
#[derive(Clone, Debug)]
pub struct ScrollTracker {
    region: PinnedRegion,
    scroll_y: f64,
}

impl ScrollTracker {
    /// Start tracking `region` with the viewport at the document top.
    pub fn new(region: PinnedRegion) -> Self {
        Self {
            region,
            scroll_y: 0.0,
        }
    }

    /// Record a new scroll offset and return the resulting progress.
    pub fn observe(&mut self, scroll_y: f64) -> Progress {
        if scroll_y.is_finite() {
            self.scroll_y = scroll_y;
        }
        self.current()
    }

    /// Progress for the last observed scroll offset.
    pub fn current(&self) -> Progress {
        self.region.progress_at(self.scroll_y)
    }

    /// Region geometry.
    pub fn region(&self) -> &PinnedRegion {
        &self.region
    }

    /// Replace region geometry (viewport resize) keeping the last scroll offset.
    pub fn set_region(&mut self, region: PinnedRegion) {
        self.region = region;
    }
}

impl ProgressSource for ScrollTracker {
    fn progress(&self) -> Option<Progress> {
        Some(self.current())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scroll/tracker.rs"]
mod tests;
