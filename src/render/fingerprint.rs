use xxhash_rust::xxh3::Xxh3;

use crate::schedule::style::FrameStyle;

const XXH3_SEED: u64 = 0x5eb1_d0c4_a3f2_9e17;

/// Stable fingerprint of a style set used by static-frame elision.
///
/// Only visible layers contribute, so hold phases where nothing moves collapse to one render.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct FrameFingerprint {
    pub(crate) hi: u64,
    pub(crate) lo: u64,
}

pub(crate) fn fingerprint_styles(styles: &[FrameStyle]) -> FrameFingerprint {
    let mut h = StableHasher::new();
    let visible = styles.iter().filter(|s| s.is_visible());
    h.write_u64(visible.clone().count() as u64);
    for s in visible {
        h.write_u64(s.index as u64);
        h.write_u32(s.z_index as u32);
        h.write_f64(s.offset_vw);
        h.write_f64(s.scale);
        h.write_f64(s.blur_px);
        h.write_f64(s.opacity);
    }
    h.finish()
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        // Fold -0.0 into 0.0 so equal styles hash equally.
        let v = if v == 0.0 { 0.0 } else { v };
        self.write_u64(v.to_bits());
    }

    fn finish(self) -> FrameFingerprint {
        let v = self.inner.digest128();
        FrameFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/fingerprint.rs"]
mod tests;
