use crate::{
    foundation::error::{SeqError, SeqResult},
    schedule::motion::MotionConfig,
    schedule::scheduler::{schedule, static_first},
    schedule::style::FrameStyle,
    scroll::progress::Progress,
    scroll::tracker::{PinnedRegion, ProgressSource, ScrollTracker},
};

/// Keeps the current style set in sync with a progress source.
///
/// Styles are recomputed only when the observed progress changes. When the source reports no
/// progress the driver falls back to [`static_first`].
#[derive(Debug)]
pub struct SequenceDriver<S> {
    count: usize,
    motion: MotionConfig,
    source: S,
    last: Option<Progress>,
    styles: Vec<FrameStyle>,
}

impl<S: ProgressSource> SequenceDriver<S> {
    /// Create a driver and compute the initial styles.
    pub fn new(count: usize, motion: MotionConfig, source: S) -> SeqResult<Self> {
        if count == 0 {
            return Err(SeqError::validation("sequence must have at least one frame"));
        }
        motion.validate()?;
        let last = source.progress();
        let styles = compute(count, &motion, last)?;
        if last.is_none() {
            tracing::warn!(count, "scroll progress unavailable; showing first frame statically");
        }
        Ok(Self {
            count,
            motion,
            source,
            last,
            styles,
        })
    }

    /// Re-read the source. Returns `true` when the styles changed.
    pub fn refresh(&mut self) -> SeqResult<bool> {
        let now = self.source.progress();
        if now == self.last {
            return Ok(false);
        }
        self.styles = compute(self.count, &self.motion, now)?;
        tracing::trace!(progress = ?now, "sequence styles recomputed");
        self.last = now;
        Ok(true)
    }

    /// Current styles in paint order.
    pub fn styles(&self) -> &[FrameStyle] {
        &self.styles
    }

    /// Last observed progress; `None` while degraded.
    pub fn progress(&self) -> Option<Progress> {
        self.last
    }

    /// `true` while showing the static fallback.
    pub fn is_degraded(&self) -> bool {
        self.last.is_none()
    }

    /// Borrow the source, e.g. to feed it new input before [`SequenceDriver::refresh`].
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }
}

impl SequenceDriver<ScrollTracker> {
    /// Feed a scroll offset and refresh. Returns `true` when the styles changed.
    pub fn on_scroll(&mut self, scroll_y: f64) -> SeqResult<bool> {
        self.source.observe(scroll_y);
        self.refresh()
    }

    /// Swap in new region geometry after a viewport resize, keeping the scroll offset.
    /// Returns `true` when the styles changed.
    pub fn on_resize(&mut self, region: PinnedRegion) -> SeqResult<bool> {
        self.source.set_region(region);
        self.refresh()
    }
}

fn compute(
    count: usize,
    motion: &MotionConfig,
    progress: Option<Progress>,
) -> SeqResult<Vec<FrameStyle>> {
    match progress {
        Some(p) => schedule(count, p, motion),
        None => Ok(static_first(count)),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/driver.rs"]
mod tests;
