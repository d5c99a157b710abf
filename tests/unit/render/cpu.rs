use std::sync::Arc;

use super::*;
use crate::foundation::core::Point;
use crate::schedule::motion::MotionConfig;
use crate::schedule::scheduler::{schedule, static_first};
use crate::scroll::progress::Progress;

fn solid(w: u32, h: u32, px: [u8; 4]) -> PreparedImage {
    PreparedImage {
        width: w,
        height: h,
        rgba8_premul: Arc::new(px.repeat((w * h) as usize)),
    }
}

fn settings(width: u32, height: u32) -> RenderSettings {
    RenderSettings {
        canvas: Canvas { width, height },
        background: [0, 0, 0, 255],
        vignette: 0.0,
        blur_max_radius: 4,
    }
}

fn pixel(frame: &FrameRGBA, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * frame.width + x) * 4) as usize;
    [
        frame.data[i],
        frame.data[i + 1],
        frame.data[i + 2],
        frame.data[i + 3],
    ]
}

#[test]
fn settled_layer_covers_canvas() {
    let canvas = Canvas {
        width: 8,
        height: 4,
    };
    let t = layer_transform(canvas, 16, 8, &FrameStyle::settled(0, 10, 1.0));
    let p = t * Point::new(16.0, 8.0);
    assert!((p.x - 8.0).abs() < 1e-9 && (p.y - 4.0).abs() < 1e-9);

    // Taller image is cropped top and bottom.
    let t = layer_transform(canvas, 8, 8, &FrameStyle::settled(0, 10, 1.0));
    let top = t * Point::new(0.0, 0.0);
    assert!((top.x - 0.0).abs() < 1e-9);
    assert!((top.y + 2.0).abs() < 1e-9);
}

#[test]
fn slide_and_zoom_follow_style() {
    let canvas = Canvas {
        width: 10,
        height: 10,
    };
    let mut style = FrameStyle::settled(0, 10, 1.0);
    style.offset_vw = 50.0;
    style.scale = 2.0;
    let t = layer_transform(canvas, 10, 10, &style);

    // Image center maps to canvas center plus the slide.
    let c = t * Point::new(5.0, 5.0);
    assert!((c.x - 10.0).abs() < 1e-9 && (c.y - 5.0).abs() < 1e-9);
    let origin = t * Point::new(0.0, 0.0);
    assert!((origin.x - 0.0).abs() < 1e-9 && (origin.y + 5.0).abs() < 1e-9);
}

#[test]
fn last_frame_wins_at_end_of_sequence() {
    let images = ImageStore::from_images(vec![
        Some(solid(4, 4, [255, 0, 0, 255])),
        Some(solid(4, 4, [0, 0, 255, 255])),
    ]);
    let styles = schedule(2, Progress::ONE, &MotionConfig::default()).unwrap();
    let mut backend = CpuBackend::new(settings(8, 8)).unwrap();
    let frame = backend.render_styles(&styles, &images).unwrap();

    assert!(frame.premultiplied);
    let px = pixel(&frame, 4, 4);
    assert!(px[2] > 200, "{px:?}");
    assert!(px[0] < 30, "{px:?}");
    assert_eq!(px[3], 255);
}

#[test]
fn missing_image_leaves_backdrop_and_other_layers_render() {
    let images = ImageStore::from_images(vec![Some(solid(4, 4, [0, 255, 0, 255])), None]);
    let mut backend = CpuBackend::new(settings(8, 8)).unwrap();

    let only_missing = vec![FrameStyle::settled(1, 11, 1.0)];
    let frame = backend.render_styles(&only_missing, &images).unwrap();
    assert!(frame.data.chunks_exact(4).all(|px| px == [0, 0, 0, 255]));

    let frame = backend.render_styles(&static_first(2), &images).unwrap();
    let px = pixel(&frame, 4, 4);
    assert!(px[1] > 200, "{px:?}");
}

#[test]
fn invisible_layers_are_skipped() {
    let images = ImageStore::from_images(vec![Some(solid(2, 2, [255, 255, 255, 255]))]);
    let mut backend = CpuBackend::new(settings(4, 4)).unwrap();
    let frame = backend
        .render_styles(&[FrameStyle::settled(0, 10, 0.0)], &images)
        .unwrap();
    assert!(frame.data.chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
}

#[test]
fn rendering_is_deterministic() {
    let images = ImageStore::from_images(vec![
        Some(solid(5, 3, [200, 100, 50, 255])),
        Some(solid(3, 5, [10, 20, 240, 255])),
    ]);
    let styles = schedule(2, Progress::new(0.6), &MotionConfig::default()).unwrap();
    let mut backend = CpuBackend::new(RenderSettings {
        vignette: 0.35,
        ..settings(12, 8)
    })
    .unwrap();
    let a = backend.render_styles(&styles, &images).unwrap();
    let b = backend.render_styles(&styles, &images).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.data.len(), 12 * 8 * 4);
}

#[test]
fn backend_rejects_empty_canvas() {
    assert!(CpuBackend::new(settings(0, 4)).is_err());
}

#[test]
fn swapping_stores_repaints_with_the_new_image() {
    let mut backend = CpuBackend::new(settings(8, 8)).unwrap();
    let styles = static_first(1);
    for round in 0..20 {
        let color = if round % 2 == 0 {
            [255, 0, 0, 255]
        } else {
            [0, 0, 255, 255]
        };
        let images = ImageStore::from_images(vec![Some(solid(8, 8, color))]);
        let frame = backend.render_styles(&styles, &images).unwrap();
        drop(images);
        let px = pixel(&frame, 4, 4);
        let close = px.iter().zip(color).all(|(a, b)| a.abs_diff(b) <= 2);
        assert!(close, "round {round}: got {px:?}, want {color:?}");
    }
}

#[test]
fn paint_cache_stays_one_entry_per_frame() {
    let mut backend = CpuBackend::new(settings(4, 4)).unwrap();
    let styles = static_first(2);
    for _ in 0..5 {
        let images = ImageStore::from_images(vec![
            Some(solid(4, 4, [9, 9, 9, 255])),
            Some(solid(4, 4, [1, 1, 1, 255])),
        ]);
        backend.render_styles(&styles, &images).unwrap();
    }
    assert_eq!(backend.paints.len(), 1);
}
