use super::*;
use crate::foundation::core::Fps;

#[test]
fn flatten_transparent_pixel_yields_background() {
    let mut dst = vec![0u8; 4];
    flatten_premul_over_bg_to_opaque_rgba8(&mut dst, &[0, 0, 0, 0], [10, 20, 30, 255]).unwrap();
    assert_eq!(dst, vec![10, 20, 30, 255]);
}

#[test]
fn flatten_opaque_pixel_is_identity() {
    let mut dst = vec![0u8; 4];
    flatten_premul_over_bg_to_opaque_rgba8(&mut dst, &[1, 2, 3, 255], [10, 20, 30, 255]).unwrap();
    assert_eq!(dst, vec![1, 2, 3, 255]);
}

#[test]
fn flatten_rejects_mismatched_buffers() {
    let mut dst = vec![0u8; 8];
    assert!(flatten_premul_over_bg_to_opaque_rgba8(&mut dst, &[0; 4], [0; 4]).is_err());
}

#[test]
fn odd_dimensions_are_rejected_before_spawning() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(
        std::env::temp_dir().join("studioseq_odd.mp4"),
    ));
    let err = sink
        .begin(SinkConfig {
            width: 3,
            height: 2,
            fps: Fps::new(30, 1).unwrap(),
            frames: 1,
        })
        .unwrap_err();
    assert!(matches!(err, SeqError::Validation(_)));
}

#[test]
fn push_before_begin_fails() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("unused.mp4"));
    let frame = FrameRGBA {
        width: 2,
        height: 2,
        data: vec![0; 16],
        premultiplied: true,
    };
    assert!(sink.push_frame(FrameIndex(0), &frame).is_err());
}

#[test]
fn abort_and_drop_without_begin_are_harmless() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("unused.mp4"));
    sink.abort();
    assert!(sink.end().is_err());
    drop(sink);
}
