pub(crate) mod blur;
pub(crate) mod composite;
pub(crate) mod cpu;
pub(crate) mod fingerprint;
pub(crate) mod pipeline;

use crate::{
    assets::store::ImageStore,
    foundation::core::{Canvas, Rgba8Premul},
    foundation::error::SeqResult,
    schedule::style::FrameStyle,
    sequence::model::SequenceDef,
};

/// Kernel radius cap applied when the environment does not override it.
pub const DEFAULT_BLUR_MAX_RADIUS: u32 = 64;

const BLUR_MAX_RADIUS_ENV: &str = "STUDIOSEQ_BLUR_MAX_RADIUS";

/// Blur cap from an optional override value. Unparsable values fall back to the default.
pub(crate) fn blur_max_radius_from(value: Option<&str>) -> u32 {
    let Some(raw) = value else {
        return DEFAULT_BLUR_MAX_RADIUS;
    };
    match raw.trim().parse::<u32>() {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(
                var = BLUR_MAX_RADIUS_ENV,
                value = raw,
                error = %e,
                "ignoring invalid blur cap override"
            );
            DEFAULT_BLUR_MAX_RADIUS
        }
    }
}

/// A rendered frame as RGBA8 pixels.
///
/// Frames are **premultiplied alpha**; the flag makes that explicit at API boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Straight-alpha copy of the pixels, suitable for PNG output.
    pub fn to_straight_rgba8(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

/// Compositor settings shared by every frame of a sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderSettings {
    /// Output size.
    pub canvas: Canvas,
    /// Straight-alpha backdrop.
    pub background: [u8; 4],
    /// Per-layer vignette strength, `0` disables.
    pub vignette: f32,
    /// Cap on the gaussian kernel radius.
    pub blur_max_radius: u32,
}

impl RenderSettings {
    /// Settings for a sequence definition. `STUDIOSEQ_BLUR_MAX_RADIUS` overrides the blur cap.
    pub fn for_sequence(def: &SequenceDef) -> Self {
        let env = std::env::var(BLUR_MAX_RADIUS_ENV).ok();
        Self {
            canvas: def.viewport,
            background: def.background,
            vignette: def.vignette,
            blur_max_radius: blur_max_radius_from(env.as_deref()),
        }
    }

    pub(crate) fn background_premul(&self) -> Rgba8Premul {
        let [r, g, b, a] = self.background;
        Rgba8Premul::from_straight_rgba(r, g, b, a)
    }
}

/// A compositor that turns a style set into pixels.
pub trait RenderBackend {
    /// Composite `styles` (any order; painted by z-index) using `images`.
    fn render_styles(&mut self, styles: &[FrameStyle], images: &ImageStore)
    -> SeqResult<FrameRGBA>;

    /// Settings needed to build equivalent worker backends for parallel sweeps.
    fn worker_render_settings(&self) -> Option<RenderSettings> {
        None
    }
}

/// Available backend kinds.
#[derive(Clone, Copy, Debug, Default)]
pub enum BackendKind {
    /// CPU raster backend powered by `vello_cpu`.
    #[default]
    Cpu,
}

/// Create a rendering backend implementation.
pub fn create_backend(
    kind: BackendKind,
    settings: &RenderSettings,
) -> SeqResult<Box<dyn RenderBackend>> {
    match kind {
        BackendKind::Cpu => Ok(Box::new(cpu::CpuBackend::new(settings.clone())?)),
    }
}

#[cfg(test)]
#[path = "../tests/unit/render/settings.rs"]
mod tests;
