use crate::foundation::error::{SeqError, SeqResult};
use crate::foundation::math::{mul_div255_u8, unit_t};

pub(crate) type PremulRgba8 = [u8; 4];

/// Source-over of one premultiplied pixel scaled by `opacity`.
pub(crate) fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Composite a whole layer onto `dst` with a uniform opacity.
pub(crate) fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> SeqResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(SeqError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    if opacity <= 0.0 {
        return Ok(());
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Buffer of `len` bytes filled with one premultiplied pixel.
pub(crate) fn filled(len: usize, px: PremulRgba8) -> Vec<u8> {
    let mut out = vec![0u8; len];
    for d in out.chunks_exact_mut(4) {
        d.copy_from_slice(&px);
    }
    out
}

/// Darken the edges of a layer with a radial black overlay.
///
/// The overlay is clear inside half the corner distance and reaches `strength` alpha at the
/// corners.
pub(crate) fn vignette_in_place(
    buf: &mut [u8],
    width: u32,
    height: u32,
    strength: f32,
) -> SeqResult<()> {
    if buf.len() != width as usize * height as usize * 4 {
        return Err(SeqError::render(
            "vignette expects a buffer matching width*height*4",
        ));
    }
    let strength = strength.clamp(0.0, 1.0);
    if strength <= 0.0 || width == 0 || height == 0 {
        return Ok(());
    }

    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;
    let w = width as usize;
    for (i, px) in buf.chunks_exact_mut(4).enumerate() {
        let x = (i % w) as f32 + 0.5;
        let y = (i / w) as f32 + 0.5;
        let dx = (x - cx) / cx;
        let dy = (y - cy) / cy;
        let d = ((dx * dx + dy * dy) / 2.0).sqrt();
        let a = strength * smoothstep(0.5, 1.0, d);
        if a <= 0.0 {
            continue;
        }
        let shade = [0, 0, 0, 255];
        let out = over([px[0], px[1], px[2], px[3]], shade, a);
        px.copy_from_slice(&out);
    }
    Ok(())
}

fn smoothstep(a: f32, b: f32, x: f32) -> f32 {
    let t = unit_t(f64::from(x), f64::from(a), f64::from(b)) as f32;
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
