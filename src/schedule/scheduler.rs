//! Pure derivation of per-frame styles from sequence progress.
//!
//! Each frame owns a `1/N` segment of progress space. Within it the frame slides, de-scales and
//! de-blurs into place while fading in, holds, and then fades out while the next frame enters
//! ("replace" mode). The last frame never fades out.

use smallvec::SmallVec;

use crate::{
    animation::ramp::Ramp,
    foundation::error::{SeqError, SeqResult},
    schedule::motion::MotionConfig,
    schedule::style::{FrameStyle, FrameWindow},
    scroll::progress::Progress,
};

/// z-index of frame 0; frame `i` paints at `Z_BASE + i`.
pub const Z_BASE: i32 = 10;

fn z_for(index: usize) -> i32 {
    Z_BASE.saturating_add(i32::try_from(index).unwrap_or(i32::MAX))
}

/// Style of frame `index` of `count` at `progress`.
pub fn frame_style(
    index: usize,
    count: usize,
    progress: Progress,
    cfg: &MotionConfig,
) -> SeqResult<FrameStyle> {
    cfg.validate()?;
    style_unchecked(index, count, progress, cfg)
}

fn style_unchecked(
    index: usize,
    count: usize,
    progress: Progress,
    cfg: &MotionConfig,
) -> SeqResult<FrameStyle> {
    let win = FrameWindow::for_frame(index, count, cfg.enter_portion)?;
    let p = progress.get();
    let entry = [win.start, win.enter_end];

    let offset = Ramp::with_ease(entry, [cfg.slide_vw, 0.0], cfg.ease)?;
    let scale = Ramp::with_ease(entry, [cfg.scale_from, 1.0], cfg.ease)?;
    let blur = Ramp::with_ease(entry, [cfg.blur_from, 0.0], cfg.ease)?;

    let first = if index == 0 && cfg.hold_first { 1.0 } else { 0.0 };
    let terminal = if index + 1 == count { 1.0 } else { 0.0 };
    let opacity = Ramp::new(win.opacity_stops(), [first, 1.0, 1.0, terminal])?;

    Ok(FrameStyle {
        index,
        z_index: z_for(index),
        offset_vw: offset.sample(p),
        scale: scale.sample(p),
        blur_px: blur.sample(p),
        opacity: opacity.sample(p).clamp(0.0, 1.0),
    })
}

/// Styles of every frame at `progress`, in index (and paint) order.
#[tracing::instrument(level = "trace", skip(cfg))]
pub fn schedule(
    count: usize,
    progress: Progress,
    cfg: &MotionConfig,
) -> SeqResult<Vec<FrameStyle>> {
    if count == 0 {
        return Err(SeqError::schedule("sequence has no frames"));
    }
    cfg.validate()?;
    (0..count)
        .map(|i| style_unchecked(i, count, progress, cfg))
        .collect()
}

/// Degraded display used when progress cannot be observed: frame 0 settled and opaque, the rest
/// hidden.
pub fn static_first(count: usize) -> Vec<FrameStyle> {
    (0..count)
        .map(|i| FrameStyle::settled(i, z_for(i), if i == 0 { 1.0 } else { 0.0 }))
        .collect()
}

/// Indices of frames with nonzero opacity, in paint order.
pub fn visible_frames(styles: &[FrameStyle]) -> SmallVec<[usize; 2]> {
    styles
        .iter()
        .filter(|s| s.is_visible())
        .map(|s| s.index)
        .collect()
}

/// Index of the most opaque frame; ties go to the frame painted on top.
pub fn dominant_frame(styles: &[FrameStyle]) -> Option<usize> {
    let mut best: Option<&FrameStyle> = None;
    for s in styles.iter().filter(|s| s.is_visible()) {
        match best {
            Some(b) if s.opacity < b.opacity => {}
            Some(b) if s.opacity == b.opacity && s.z_index < b.z_index => {}
            _ => best = Some(s),
        }
    }
    best.map(|s| s.index)
}

#[cfg(test)]
#[path = "../../tests/unit/schedule/scheduler.rs"]
mod tests;
