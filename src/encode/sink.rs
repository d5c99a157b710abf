use std::path::PathBuf;

use crate::foundation::core::{Fps, FrameIndex};
use crate::foundation::error::{SeqError, SeqResult};
use crate::render::FrameRGBA;

/// Configuration provided to a [`FrameSink`] before any frame is pushed.
#[derive(Debug, Clone, PartialEq)]
pub struct SinkConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Playback rate of the sweep.
    pub fps: Fps,
    /// Number of frames that will be pushed.
    pub frames: u64,
}

/// Sink contract for consuming rendered frames.
///
/// `push_frame` is called in strictly increasing [`FrameIndex`] order.
pub trait FrameSink: Send {
    /// Called once before any frames are pushed.
    fn begin(&mut self, cfg: SinkConfig) -> SeqResult<()>;
    /// Push one frame.
    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> SeqResult<()>;
    /// Called once after the last frame is pushed.
    fn end(&mut self) -> SeqResult<()>;
    /// Called instead of `end` when rendering fails after `begin`. Releases resources; output is
    /// left incomplete.
    fn abort(&mut self) {}
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<(FrameIndex, FrameRGBA)>,
}

impl InMemorySink {
    /// Create a new in-memory sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Captured frames in push order.
    pub fn frames(&self) -> &[(FrameIndex, FrameRGBA)] {
        &self.frames
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> SeqResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> SeqResult<()> {
        self.frames.push((idx, frame.clone()));
        Ok(())
    }

    fn end(&mut self) -> SeqResult<()> {
        Ok(())
    }
}

/// Writes `frame_000000.png`, `frame_000001.png`, ... into a directory.
#[derive(Debug)]
pub struct PngSequenceSink {
    dir: PathBuf,
    written: u64,
    last_idx: Option<FrameIndex>,
}

impl PngSequenceSink {
    /// Sink writing into `dir` (created on `begin`).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: 0,
            last_idx: None,
        }
    }

    /// Path of frame `idx`.
    pub fn frame_path(&self, idx: FrameIndex) -> PathBuf {
        self.dir.join(format!("frame_{:06}.png", idx.0))
    }

    /// Frames written so far.
    pub fn written(&self) -> u64 {
        self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> SeqResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(SeqError::validation(
                "png sink width/height must be non-zero",
            ));
        }
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            SeqError::encode(format!(
                "failed to create output directory '{}': {e}",
                self.dir.display()
            ))
        })?;
        self.written = 0;
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> SeqResult<()> {
        if let Some(last) = self.last_idx
            && idx.0 <= last.0
        {
            return Err(SeqError::encode(
                "png sink received out-of-order frame index",
            ));
        }
        self.last_idx = Some(idx);

        let path = self.frame_path(idx);
        image::save_buffer_with_format(
            &path,
            &frame.to_straight_rgba8(),
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .map_err(|e| SeqError::encode(format!("write png '{}': {e}", path.display())))?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> SeqResult<()> {
        tracing::debug!(dir = %self.dir.display(), frames = self.written, "png sequence written");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
