use std::{path::Path, sync::Arc};

use rayon::prelude::*;

use crate::{
    assets::decode::decode_image,
    foundation::error::{SeqError, SeqResult},
};

#[derive(Clone, Debug)]
/// Decoded frame image in premultiplied RGBA8 form.
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

/// Where a frame image comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FrameSource {
    /// Normalized path relative to the sequence definition.
    Local(String),
    /// `http(s)` location. Accepted in definitions but never fetched.
    Remote(String),
}

impl FrameSource {
    /// Classify and normalize a source string from a sequence definition.
    pub fn parse(source: &str) -> SeqResult<Self> {
        let s = source.trim();
        let lower = s.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return Ok(Self::Remote(s.to_owned()));
        }
        normalize_rel_path(s).map(Self::Local)
    }
}

/// Normalize and validate definition-relative asset paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and rejects absolute paths or
/// parent traversals (`..`).
pub(crate) fn normalize_rel_path(source: &str) -> SeqResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(SeqError::validation("asset paths must be relative"));
    }
    if s.is_empty() {
        return Err(SeqError::validation("asset path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(SeqError::validation("asset paths must not contain '..'"));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(SeqError::validation("asset path must contain a file name"));
    }

    Ok(out.join("/"))
}

/// Decoded images of one sequence, indexed like the sequence.
///
/// A slot is `None` when that frame failed to load; the layer then renders empty.
#[derive(Clone, Debug, Default)]
pub struct ImageStore {
    images: Vec<Option<PreparedImage>>,
}

impl ImageStore {
    /// Load and decode every source in parallel. Failures are logged, not returned.
    #[tracing::instrument(skip(sources), fields(count = sources.len()))]
    pub fn prepare(sources: &[String], root: &Path) -> Self {
        let images = sources
            .par_iter()
            .enumerate()
            .map(|(i, src)| match load_one(src, root) {
                Ok(img) => Some(img),
                Err(e) => {
                    tracing::warn!(
                        index = i,
                        source = %src,
                        error = %e,
                        "frame image unavailable; layer will render empty"
                    );
                    None
                }
            })
            .collect();
        Self { images }
    }

    /// Wrap already-decoded images.
    pub fn from_images(images: Vec<Option<PreparedImage>>) -> Self {
        Self { images }
    }

    /// Image for frame `index`, if it loaded.
    pub fn get(&self, index: usize) -> Option<&PreparedImage> {
        self.images.get(index).and_then(Option::as_ref)
    }

    /// Number of slots (frames).
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// `true` when the store has no slots.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Number of frames that decoded successfully.
    pub fn loaded_count(&self) -> usize {
        self.images.iter().filter(|i| i.is_some()).count()
    }
}

fn load_one(source: &str, root: &Path) -> SeqResult<PreparedImage> {
    match FrameSource::parse(source)? {
        FrameSource::Local(rel) => {
            let p = root.join(Path::new(&rel));
            let bytes = std::fs::read(&p).map_err(|e| {
                SeqError::validation(format!("failed to read image '{}': {e}", p.display()))
            })?;
            decode_image(&bytes)
        }
        FrameSource::Remote(url) => Err(SeqError::validation(format!(
            "remote image '{url}' is not fetched"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
