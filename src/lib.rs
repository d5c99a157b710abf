//! studioseq drives a scroll-pinned "replace mode" image sequence.
//!
//! A pinned region of `N` viewport heights maps scroll offset to a progress value in `[0, 1]`.
//! Each of the `N` frames owns an equal slice of that range: it slides in from the right while
//! its blur and zoom settle, holds, then fades as the next frame enters on top.
//!
//! - Track progress with a [`ScrollTracker`] (or any [`ProgressSource`])
//! - Derive per-frame [`FrameStyle`]s with [`schedule`]
//! - Composite them with a [`RenderBackend`], or sweep `0 -> 1` into a [`FrameSink`]
#![forbid(unsafe_code)]

mod assets;
mod foundation;

pub(crate) mod animation;
pub(crate) mod encode;
pub(crate) mod render;
pub(crate) mod schedule;
pub(crate) mod scroll;
pub(crate) mod sequence;

pub use crate::foundation::core::{Affine, Canvas, Fps, FrameIndex, Point, Rgba8Premul, Vec2};
pub use crate::foundation::error::{SeqError, SeqResult};

pub use crate::animation::ease::Ease;
pub use crate::animation::ramp::Ramp;
pub use crate::assets::store::{FrameSource, ImageStore, PreparedImage};
pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, ensure_parent_dir, is_ffmpeg_on_path};
pub use crate::encode::sink::{FrameSink, InMemorySink, PngSequenceSink, SinkConfig};
pub use crate::render::cpu::CpuBackend;
pub use crate::render::pipeline::{
    SweepOpts, SweepStats, render_progress, render_static, render_sweep, sweep_progress,
};
pub use crate::render::{
    BackendKind, DEFAULT_BLUR_MAX_RADIUS, FrameRGBA, RenderBackend, RenderSettings, create_backend,
};
pub use crate::schedule::motion::{EXIT_PORTION_RATIO, MotionConfig};
pub use crate::schedule::scheduler::{
    Z_BASE, dominant_frame, frame_style, schedule, static_first, visible_frames,
};
pub use crate::schedule::style::{FrameStyle, FrameWindow};
pub use crate::scroll::progress::Progress;
pub use crate::scroll::tracker::{PinnedRegion, ProgressSource, ScrollTracker, StaticSource};
pub use crate::sequence::driver::SequenceDriver;
pub use crate::sequence::model::SequenceDef;
