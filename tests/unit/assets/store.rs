use super::*;

fn write_png(path: &Path, rgba: [u8; 4], w: u32, h: u32) {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(rgba));
    img.save_with_format(path, image::ImageFormat::Png).unwrap();
}

#[test]
fn normalize_path_slash_normalization() {
    assert_eq!(normalize_rel_path("a/b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("a\\b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("./a//b.png").unwrap(), "a/b.png");
    assert!(normalize_rel_path("../x.png").is_err());
    assert!(normalize_rel_path("/abs.png").is_err());
    assert!(normalize_rel_path("./").is_err());
    assert!(normalize_rel_path("").is_err());
}

#[test]
fn source_classification() {
    assert_eq!(
        FrameSource::parse("HTTPS://cdn.example.com/x.jpg").unwrap(),
        FrameSource::Remote("HTTPS://cdn.example.com/x.jpg".to_owned())
    );
    assert_eq!(
        FrameSource::parse(" studio/1.jpg ").unwrap(),
        FrameSource::Local("studio/1.jpg".to_owned())
    );
    assert!(FrameSource::parse("/etc/passwd").is_err());
}

#[test]
fn prepare_keeps_slots_for_failed_frames() {
    let dir = std::env::temp_dir().join(format!("studioseq_store_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    write_png(&dir.join("ok.png"), [255, 0, 0, 255], 3, 2);

    let sources = vec![
        "ok.png".to_owned(),
        "missing.png".to_owned(),
        "https://example.com/remote.png".to_owned(),
    ];
    let store = ImageStore::prepare(&sources, &dir);

    assert_eq!(store.len(), 3);
    assert_eq!(store.loaded_count(), 1);
    let img = store.get(0).unwrap();
    assert_eq!((img.width, img.height), (3, 2));
    assert!(store.get(1).is_none());
    assert!(store.get(2).is_none());
    assert!(store.get(99).is_none());

    let _ = std::fs::remove_dir_all(&dir);
}
