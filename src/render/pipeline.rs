use std::collections::HashMap;

use rayon::prelude::*;

use crate::{
    assets::store::ImageStore,
    encode::sink::{FrameSink, SinkConfig},
    foundation::core::{Fps, FrameIndex},
    foundation::error::{SeqError, SeqResult},
    render::cpu::CpuBackend,
    render::fingerprint::{FrameFingerprint, fingerprint_styles},
    render::{FrameRGBA, RenderBackend, RenderSettings},
    schedule::scheduler::static_first,
    schedule::style::FrameStyle,
    scroll::progress::Progress,
    sequence::model::SequenceDef,
};

/// Schedule + render a single progress value.
///
/// Returns a [`FrameRGBA`] containing **premultiplied** RGBA8 pixels.
pub fn render_progress(
    def: &SequenceDef,
    progress: Progress,
    backend: &mut dyn RenderBackend,
    images: &ImageStore,
) -> SeqResult<FrameRGBA> {
    def.validate()?;
    let styles = def.styles_at(progress)?;
    backend.render_styles(&styles, images)
}

/// Render the degraded display used when no progress is available: frame 0, settled.
pub fn render_static(
    def: &SequenceDef,
    backend: &mut dyn RenderBackend,
    images: &ImageStore,
) -> SeqResult<FrameRGBA> {
    def.validate()?;
    backend.render_styles(&static_first(def.count()), images)
}

/// Controls for [`render_sweep`].
#[derive(Clone, Debug)]
pub struct SweepOpts {
    /// Output frames; progress steps evenly from `0` to `1` inclusive.
    pub frames: u64,
    /// Enable parallel rendering when `true`.
    pub parallel: bool,
    /// Optional explicit worker thread count.
    pub threads: Option<usize>,
    /// Chunk size in frames for batched scheduling.
    pub chunk_size: usize,
    /// Render identical style sets once per chunk.
    pub static_frame_elision: bool,
}

impl Default for SweepOpts {
    fn default() -> Self {
        Self {
            frames: 60,
            parallel: false,
            threads: None,
            chunk_size: 64,
            static_frame_elision: false,
        }
    }
}

/// Aggregated sweep counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SweepStats {
    /// Frames pushed to the sink.
    pub frames_total: u64,
    /// Frames that were actually rendered.
    pub frames_rendered: u64,
    /// Frames reused via static-frame elision.
    pub frames_elided: u64,
}

/// Progress of output frame `idx` in a sweep of `frames` frames.
pub fn sweep_progress(idx: u64, frames: u64) -> Progress {
    let denom = frames.saturating_sub(1).max(1) as f64;
    Progress::new(idx as f64 / denom)
}

/// Render a `0 -> 1` progress sweep into `sink`, in frame order.
///
/// Parallel mode needs [`RenderBackend::worker_render_settings`]; each worker thread builds its
/// own [`CpuBackend`].
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(frames = opts.frames, parallel = opts.parallel)
)]
pub fn render_sweep(
    def: &SequenceDef,
    images: &ImageStore,
    backend: &mut dyn RenderBackend,
    opts: &SweepOpts,
    fps: Fps,
    sink: &mut dyn FrameSink,
) -> SeqResult<SweepStats> {
    def.validate()?;
    if opts.frames == 0 {
        return Err(SeqError::validation("sweep must render at least one frame"));
    }

    let mut workers = None;
    if opts.parallel {
        let settings = backend.worker_render_settings().ok_or_else(|| {
            SeqError::render("parallel sweep requires backend worker settings (CpuBackend)")
        })?;
        workers = Some((build_thread_pool(opts.threads)?, settings));
    }

    sink.begin(SinkConfig {
        width: def.viewport.width,
        height: def.viewport.height,
        fps,
        frames: opts.frames,
    })?;

    match push_chunks(def, images, backend, opts, workers.as_ref(), sink) {
        Ok(stats) => {
            sink.end()?;
            Ok(stats)
        }
        Err(e) => {
            sink.abort();
            Err(e)
        }
    }
}

fn push_chunks(
    def: &SequenceDef,
    images: &ImageStore,
    backend: &mut dyn RenderBackend,
    opts: &SweepOpts,
    workers: Option<&(rayon::ThreadPool, RenderSettings)>,
    sink: &mut dyn FrameSink,
) -> SeqResult<SweepStats> {
    let chunk_size = normalized_chunk_size(opts.chunk_size);
    let mut stats = SweepStats::default();
    let mut chunk_start = 0u64;
    while chunk_start < opts.frames {
        let chunk_end = (chunk_start + chunk_size).min(opts.frames);
        let mut styles = Vec::with_capacity((chunk_end - chunk_start) as usize);
        for f in chunk_start..chunk_end {
            styles.push(def.styles_at(sweep_progress(f, opts.frames))?);
        }

        let plan = plan_chunk(&styles, opts.static_frame_elision);
        let unique = match workers {
            Some((pool, settings)) => {
                render_unique_parallel(&styles, &plan, images, settings, pool)?
            }
            None => {
                let mut out = Vec::with_capacity(plan.unique_indices.len());
                for &i in &plan.unique_indices {
                    out.push(backend.render_styles(&styles[i], images)?);
                }
                out
            }
        };

        for (offset, &u) in plan.frame_to_unique.iter().enumerate() {
            let frame = unique.get(u).ok_or_else(|| {
                SeqError::render("internal error: unique frame index out of range")
            })?;
            sink.push_frame(FrameIndex(chunk_start + offset as u64), frame)?;
        }

        let total = plan.frame_to_unique.len() as u64;
        let rendered = plan.unique_indices.len() as u64;
        if rendered < total {
            tracing::debug!(
                chunk_start,
                elided = total - rendered,
                "static-frame elision reused frames"
            );
        }
        stats.frames_total += total;
        stats.frames_rendered += rendered;
        stats.frames_elided += total - rendered;
        chunk_start = chunk_end;
    }

    Ok(stats)
}

struct ChunkPlan {
    unique_indices: Vec<usize>,
    frame_to_unique: Vec<usize>,
}

fn plan_chunk(styles: &[Vec<FrameStyle>], elide: bool) -> ChunkPlan {
    let mut unique_indices = Vec::<usize>::with_capacity(styles.len());
    let mut frame_to_unique = Vec::<usize>::with_capacity(styles.len());
    if elide {
        let mut first = HashMap::<FrameFingerprint, usize>::new();
        for (idx, s) in styles.iter().enumerate() {
            let fingerprint = fingerprint_styles(s);
            if let Some(existing) = first.get(&fingerprint).copied() {
                frame_to_unique.push(existing);
            } else {
                let slot = unique_indices.len();
                unique_indices.push(idx);
                first.insert(fingerprint, slot);
                frame_to_unique.push(slot);
            }
        }
    } else {
        for idx in 0..styles.len() {
            frame_to_unique.push(idx);
            unique_indices.push(idx);
        }
    }
    ChunkPlan {
        unique_indices,
        frame_to_unique,
    }
}

fn render_unique_parallel(
    styles: &[Vec<FrameStyle>],
    plan: &ChunkPlan,
    images: &ImageStore,
    settings: &RenderSettings,
    pool: &rayon::ThreadPool,
) -> SeqResult<Vec<FrameRGBA>> {
    let rendered = pool.install(|| {
        plan.unique_indices
            .par_iter()
            .map_init(
                || CpuBackend::new(settings.clone()),
                |worker, &idx| -> SeqResult<FrameRGBA> {
                    match worker {
                        Ok(backend) => backend.render_styles(&styles[idx], images),
                        Err(e) => Err(SeqError::render(format!("worker backend init: {e}"))),
                    }
                },
            )
            .collect::<Vec<_>>()
    });
    rendered.into_iter().collect()
}

pub(crate) fn build_thread_pool(threads: Option<usize>) -> SeqResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(SeqError::validation(
            "sweep 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| SeqError::render(format!("failed to build rayon thread pool: {e}")))
}

fn normalized_chunk_size(chunk_size: usize) -> u64 {
    chunk_size.max(1) as u64
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
