use std::path::Path;

use crate::{
    assets::store::FrameSource,
    foundation::core::Canvas,
    foundation::error::{SeqError, SeqResult},
    schedule::motion::MotionConfig,
    schedule::scheduler::schedule,
    schedule::style::FrameStyle,
    scroll::progress::Progress,
    scroll::tracker::PinnedRegion,
};

fn default_background() -> [u8; 4] {
    [0, 0, 0, 255]
}

/// JSON boundary model of one pinned image sequence.
///
/// ```json
/// {
///   "images": ["studio/1.jpg", "studio/2.jpg"],
///   "viewport": { "width": 1280, "height": 720 },
///   "motion": { "slide_vw": 20, "enter_portion": 0.65 },
///   "background": [0, 0, 0, 255],
///   "vignette": 0.35
/// }
/// ```
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SequenceDef {
    /// Frame sources in display order. Paths are relative to the definition file.
    pub images: Vec<String>,
    /// Output viewport; one frame fills it.
    #[serde(default)]
    pub viewport: Canvas,
    /// Motion constants.
    #[serde(default)]
    pub motion: MotionConfig,
    /// Straight-alpha RGBA8 backdrop behind all layers.
    #[serde(default = "default_background")]
    pub background: [u8; 4],
    /// Edge darkening applied per layer, `0` disables.
    #[serde(default)]
    pub vignette: f32,
}

impl SequenceDef {
    /// Definition with default viewport, motion, and backdrop.
    pub fn new(images: Vec<String>) -> Self {
        Self {
            images,
            viewport: Canvas::default(),
            motion: MotionConfig::default(),
            background: default_background(),
            vignette: 0.0,
        }
    }

    /// Parse a definition from JSON text. Does not validate.
    pub fn from_json_str(s: &str) -> SeqResult<Self> {
        serde_json::from_str(s).map_err(|e| SeqError::serde(e.to_string()))
    }

    /// Read, parse, and validate a definition file.
    pub fn from_path(path: &Path) -> SeqResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            SeqError::validation(format!("failed to read sequence '{}': {e}", path.display()))
        })?;
        let def = Self::from_json_str(&text)?;
        def.validate()?;
        Ok(def)
    }

    /// Check every field; the first problem found is returned.
    pub fn validate(&self) -> SeqResult<()> {
        if self.images.is_empty() {
            return Err(SeqError::validation("sequence must list at least one image"));
        }
        for (i, src) in self.images.iter().enumerate() {
            FrameSource::parse(src)
                .map_err(|e| SeqError::validation(format!("images[{i}]: {e}")))?;
        }
        self.viewport.validate()?;
        self.motion.validate()?;
        if !self.vignette.is_finite() || !(0.0..=1.0).contains(&self.vignette) {
            return Err(SeqError::validation("vignette must be in [0, 1]"));
        }
        Ok(())
    }

    /// Number of frames, `N`.
    pub fn count(&self) -> usize {
        self.images.len()
    }

    /// Styles of every frame at `progress`.
    pub fn styles_at(&self, progress: Progress) -> SeqResult<Vec<FrameStyle>> {
        schedule(self.count(), progress, &self.motion)
    }

    /// Pinned region for this sequence whose top sits at document offset `top`.
    pub fn region(&self, top: f64) -> PinnedRegion {
        PinnedRegion::for_sequence(top, self.count(), f64::from(self.viewport.height))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/model.rs"]
mod tests;
