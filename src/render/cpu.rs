use std::{collections::HashMap, sync::Arc};

use crate::{
    assets::store::{ImageStore, PreparedImage},
    foundation::core::{Affine, Canvas, Vec2},
    foundation::error::{SeqError, SeqResult},
    render::blur::{blur_rgba8_premul, kernel_radius},
    render::composite::{filled, over_in_place, vignette_in_place},
    render::{FrameRGBA, RenderBackend, RenderSettings},
    schedule::style::FrameStyle,
};

/// Layer compositor: each visible frame is rasterized to a viewport-sized layer with `vello_cpu`,
/// blurred, vignetted, then composited over the backdrop in z order.
pub struct CpuBackend {
    settings: RenderSettings,
    width: u16,
    height: u16,
    ctx: Option<vello_cpu::RenderContext>,
    layer: vello_cpu::Pixmap,
    // Per frame slot. The source buffer is held so a reused allocation never aliases an entry.
    paints: HashMap<usize, CachedPaint>,
}

struct CachedPaint {
    source: Arc<Vec<u8>>,
    paint: vello_cpu::Image,
}

impl CpuBackend {
    /// Create a backend for `settings.canvas`.
    pub fn new(settings: RenderSettings) -> SeqResult<Self> {
        settings.canvas.validate()?;
        let (width, height) = canvas_u16(settings.canvas)?;
        Ok(Self {
            settings,
            width,
            height,
            ctx: None,
            layer: vello_cpu::Pixmap::new(width, height),
            paints: HashMap::new(),
        })
    }

    fn paint_for(&mut self, index: usize, img: &PreparedImage) -> SeqResult<vello_cpu::Image> {
        if let Some(cached) = self.paints.get(&index)
            && Arc::ptr_eq(&cached.source, &img.rgba8_premul)
        {
            return Ok(cached.paint.clone());
        }
        let pixmap = pixmap_from_premul_bytes(&img.rgba8_premul, img.width, img.height)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        self.paints.insert(
            index,
            CachedPaint {
                source: Arc::clone(&img.rgba8_premul),
                paint: paint.clone(),
            },
        );
        Ok(paint)
    }

    fn rasterize_layer(&mut self, style: &FrameStyle, img: &PreparedImage) -> SeqResult<Vec<u8>> {
        let paint = self.paint_for(style.index, img)?;
        let transform = layer_transform(self.settings.canvas, img.width, img.height, style);
        let (w, h) = (self.width, self.height);

        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w && ctx.height() == h => ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();
        ctx.set_transform(affine_to_cpu(transform));
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(img.width),
            f64::from(img.height),
        ));
        ctx.flush();

        clear_pixmap(&mut self.layer);
        ctx.render_to_pixmap(&mut self.layer);
        self.ctx = Some(ctx);

        let canvas = self.settings.canvas;
        let mut bytes = self.layer.data_as_u8_slice().to_vec();

        let radius = kernel_radius(style.blur_px, self.settings.blur_max_radius);
        if radius > 0 {
            bytes = blur_rgba8_premul(
                &bytes,
                canvas.width,
                canvas.height,
                radius,
                style.blur_px as f32,
            )?;
        }
        if self.settings.vignette > 0.0 {
            vignette_in_place(&mut bytes, canvas.width, canvas.height, self.settings.vignette)?;
        }
        Ok(bytes)
    }
}

impl RenderBackend for CpuBackend {
    fn render_styles(
        &mut self,
        styles: &[FrameStyle],
        images: &ImageStore,
    ) -> SeqResult<FrameRGBA> {
        let canvas = self.settings.canvas;
        let mut out = filled(canvas.rgba_len(), self.settings.background_premul().to_array());

        let mut order: Vec<&FrameStyle> = styles.iter().filter(|s| s.is_visible()).collect();
        order.sort_by_key(|s| s.z_index);

        for style in order {
            let Some(img) = images.get(style.index) else {
                continue;
            };
            let layer = match self.rasterize_layer(style, img) {
                Ok(layer) => layer,
                Err(e) => {
                    tracing::warn!(index = style.index, error = %e, "layer skipped");
                    continue;
                }
            };
            over_in_place(&mut out, &layer, style.opacity as f32)?;
        }

        Ok(FrameRGBA {
            width: canvas.width,
            height: canvas.height,
            data: out,
            premultiplied: true,
        })
    }

    fn worker_render_settings(&self) -> Option<RenderSettings> {
        Some(self.settings.clone())
    }
}

/// Image-space to canvas-space transform for one layer.
///
/// The image is scaled to cover the canvas and centered, then the style's scale is applied about
/// the canvas center and the layer is shifted horizontally.
pub(crate) fn layer_transform(
    canvas: Canvas,
    img_w: u32,
    img_h: u32,
    style: &FrameStyle,
) -> Affine {
    let cw = f64::from(canvas.width);
    let ch = f64::from(canvas.height);
    let iw = f64::from(img_w.max(1));
    let ih = f64::from(img_h.max(1));

    let cover = (cw / iw).max(ch / ih);
    let fit = Affine::translate(Vec2::new((cw - iw * cover) / 2.0, (ch - ih * cover) / 2.0))
        * Affine::scale(cover);

    let center = Vec2::new(cw / 2.0, ch / 2.0);
    let zoom = Affine::translate(center) * Affine::scale(style.scale) * Affine::translate(-center);
    let slide = Affine::translate(Vec2::new(style.offset_px(cw), 0.0));

    slide * zoom * fit
}

fn canvas_u16(canvas: Canvas) -> SeqResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| SeqError::render("canvas width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| SeqError::render("canvas height exceeds u16"))?;
    Ok((w, h))
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap) {
    pixmap.data_as_u8_slice_mut().fill(0);
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn pixmap_from_premul_bytes(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> SeqResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| SeqError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| SeqError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(SeqError::render("prepared image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
