use std::sync::Arc;

use anyhow::Context as _;

use crate::{
    assets::store::PreparedImage, foundation::error::SeqResult, foundation::math::mul_div255_u8,
};

/// Sniff the container format, decode, and convert to premultiplied RGBA8.
pub(crate) fn decode_image(bytes: &[u8]) -> SeqResult<PreparedImage> {
    let format = image::guess_format(bytes).context("unrecognized image container")?;
    let rgba = image::load_from_memory_with_format(bytes, format)
        .with_context(|| format!("decode {format:?} frame image"))?
        .into_rgba8();
    let (width, height) = rgba.dimensions();

    let mut pixels = rgba.into_raw();
    premultiply_in_place(&mut pixels);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(pixels),
    })
}

fn premultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = mul_div255_u8(u16::from(*c), a);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
