use super::*;
use crate::animation::ease::Ease;

fn cfg() -> MotionConfig {
    MotionConfig::default()
}

fn grid() -> impl Iterator<Item = Progress> {
    Progress::sweep(1001)
}

#[test]
fn six_frame_example_entry_window() {
    let cfg = cfg();
    let win = FrameWindow::for_frame(2, 6, cfg.enter_portion).unwrap();
    // 2/6 + 0.65/6
    assert!((win.start - 2.0 / 6.0).abs() < 1e-12);
    assert!((win.enter_end - 0.441_666_666).abs() < 1e-6);
    assert!((win.next_start - 0.5).abs() < 1e-12);
    assert!((win.next_enter_end - (0.5 + 0.65 * 0.6 / 6.0)).abs() < 1e-12);

    let at_start = frame_style(2, 6, Progress::new(win.start), &cfg).unwrap();
    assert_eq!(at_start.offset_vw, cfg.slide_vw);
    assert_eq!(at_start.scale, cfg.scale_from);
    assert_eq!(at_start.blur_px, cfg.blur_from);
    assert_eq!(at_start.opacity, 0.0);

    let at_end = frame_style(2, 6, Progress::new(win.enter_end), &cfg).unwrap();
    assert_eq!(at_end.offset_vw, 0.0);
    assert_eq!(at_end.scale, 1.0);
    assert_eq!(at_end.blur_px, 0.0);
    assert_eq!(at_end.opacity, 1.0);
}

#[test]
fn offset_is_full_at_start_and_zero_at_enter_end_for_every_frame() {
    let cfg = cfg();
    for n in 1..=8 {
        for i in 0..n {
            let win = FrameWindow::for_frame(i, n, cfg.enter_portion).unwrap();
            let a = frame_style(i, n, Progress::new(win.start), &cfg).unwrap();
            let b = frame_style(i, n, Progress::new(win.enter_end), &cfg).unwrap();
            assert_eq!(a.offset_vw, cfg.slide_vw, "n={n} i={i}");
            assert_eq!(b.offset_vw, 0.0, "n={n} i={i}");
        }
    }
}

#[test]
fn end_of_sequence_shows_only_last_frame() {
    let styles = schedule(6, Progress::ONE, &cfg()).unwrap();
    for s in &styles[..5] {
        assert_eq!(s.opacity, 0.0, "frame {}", s.index);
    }
    assert_eq!(styles[5].opacity, 1.0);
    assert!(styles[5].is_settled());
}

#[test]
fn start_of_sequence_shows_only_first_frame_when_held() {
    let styles = schedule(6, Progress::ZERO, &cfg()).unwrap();
    assert_eq!(styles[0].opacity, 1.0);
    assert!(styles[1..].iter().all(|s| s.opacity == 0.0));
}

#[test]
fn first_frame_fades_in_without_hold() {
    let cfg = MotionConfig {
        hold_first: false,
        ..cfg()
    };
    let styles = schedule(6, Progress::ZERO, &cfg).unwrap();
    assert!(styles.iter().all(|s| s.opacity == 0.0));
    assert_eq!(dominant_frame(&styles), None);

    let win = FrameWindow::for_frame(0, 6, cfg.enter_portion).unwrap();
    let settled = frame_style(0, 6, Progress::new(win.enter_end), &cfg).unwrap();
    assert_eq!(settled.opacity, 1.0);
}

#[test]
fn at_most_two_adjacent_frames_are_visible() {
    let cfg = cfg();
    for n in 1..=10 {
        for p in grid() {
            let styles = schedule(n, p, &cfg).unwrap();
            let vis = visible_frames(&styles);
            assert!(vis.len() <= 2, "n={n} p={} visible={vis:?}", p.get());
            if vis.len() == 2 {
                assert_eq!(vis[1], vis[0] + 1, "n={n} p={}", p.get());
            }
        }
    }
}

#[test]
fn exactly_one_opaque_frame_outside_cross_fades() {
    let cfg = cfg();
    for n in 1..=10 {
        let windows: Vec<_> = (0..n)
            .map(|i| FrameWindow::for_frame(i, n, cfg.enter_portion).unwrap())
            .collect();
        for p in grid() {
            let in_cross_fade = windows
                .iter()
                .skip(1)
                .any(|w| w.is_entering(p.get()));
            if in_cross_fade {
                continue;
            }
            let styles = schedule(n, p, &cfg).unwrap();
            let opaque = styles.iter().filter(|s| s.opacity == 1.0).count();
            let visible = styles.iter().filter(|s| s.is_visible()).count();
            assert_eq!(opaque, 1, "n={n} p={}", p.get());
            assert_eq!(visible, 1, "n={n} p={}", p.get());
        }
    }
}

#[test]
fn dominant_frame_never_moves_backwards() {
    for ease in [Ease::Linear, Ease::EaseInOut] {
        let cfg = MotionConfig { ease, ..cfg() };
        for n in 1..=8 {
            let mut last = 0usize;
            for p in grid() {
                let styles = schedule(n, p, &cfg).unwrap();
                let d = dominant_frame(&styles).expect("something visible");
                assert!(d >= last, "n={n} p={} went {last} -> {d}", p.get());
                last = d;
            }
            assert_eq!(last, n - 1);
        }
    }
}

#[test]
fn recomputation_is_idempotent() {
    let cfg = cfg();
    for p in grid() {
        let a = schedule(7, p, &cfg).unwrap();
        let b = schedule(7, p, &cfg).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn z_order_follows_index() {
    let styles = schedule(4, Progress::new(0.5), &cfg()).unwrap();
    let z: Vec<i32> = styles.iter().map(|s| s.z_index).collect();
    assert_eq!(z, vec![10, 11, 12, 13]);
}

#[test]
fn full_enter_portion_keeps_curves_valid() {
    let cfg = MotionConfig {
        enter_portion: 1.0,
        ..cfg()
    };
    for n in 1..=12 {
        for p in Progress::sweep(97) {
            schedule(n, p, &cfg).unwrap();
        }
    }
}

#[test]
fn rejects_empty_sequence_and_bad_index() {
    assert!(schedule(0, Progress::ZERO, &cfg()).is_err());
    assert!(frame_style(3, 3, Progress::ZERO, &cfg()).is_err());
    let bad = MotionConfig {
        enter_portion: 2.0,
        ..cfg()
    };
    assert!(schedule(3, Progress::ZERO, &bad).is_err());
}

#[test]
fn static_first_shows_settled_first_frame() {
    let styles = static_first(3);
    assert_eq!(styles.len(), 3);
    assert_eq!(styles[0].opacity, 1.0);
    assert!(styles.iter().all(FrameStyle::is_settled));
    assert_eq!(visible_frames(&styles).as_slice(), &[0]);
    assert!(static_first(0).is_empty());
}

#[test]
fn dominant_prefers_top_layer_on_ties() {
    let styles = vec![
        FrameStyle::settled(0, 10, 0.5),
        FrameStyle::settled(1, 11, 0.5),
    ];
    assert_eq!(dominant_frame(&styles), Some(1));
}
