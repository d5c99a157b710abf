use super::*;

#[test]
fn two_point_ramp_interpolates_and_saturates() {
    let r = Ramp::new([0.2, 0.6], [10.0, 0.0]).unwrap();
    assert_eq!(r.sample(0.0), 10.0);
    assert_eq!(r.sample(0.2), 10.0);
    assert!((r.sample(0.4) - 5.0).abs() < 1e-12);
    assert_eq!(r.sample(0.6), 0.0);
    assert_eq!(r.sample(5.0), 0.0);
}

#[test]
fn repeated_trailing_stop_yields_last_value() {
    let r = Ramp::new([0.5, 0.8, 1.0, 1.0], [0.0, 1.0, 1.0, 1.0]).unwrap();
    assert_eq!(r.sample(1.0), 1.0);
    assert_eq!(r.sample(0.9), 1.0);

    let fade = Ramp::new([0.5, 0.8, 1.0, 1.0], [0.0, 1.0, 1.0, 0.0]).unwrap();
    assert_eq!(fade.sample(1.0), 0.0);
}

#[test]
fn four_point_curve_holds_between_inner_stops() {
    let r = Ramp::new([0.0, 0.1, 0.5, 0.6], [0.0, 1.0, 1.0, 0.0]).unwrap();
    assert_eq!(r.sample(0.3), 1.0);
    assert!((r.sample(0.55) - 0.5).abs() < 1e-9);
    assert_eq!(r.sample(0.7), 0.0);
}

#[test]
fn eased_ramp_keeps_endpoints() {
    let r = Ramp::with_ease([0.0, 1.0], [4.0, 8.0], Ease::EaseIn).unwrap();
    assert_eq!(r.sample(0.0), 4.0);
    assert_eq!(r.sample(1.0), 8.0);
    assert!(r.sample(0.5) < 6.0);
}

#[test]
fn rejects_unsorted_or_non_finite() {
    assert!(Ramp::new([0.5, 0.4], [0.0, 1.0]).is_err());
    assert!(Ramp::new([0.0, f64::NAN], [0.0, 1.0]).is_err());
    assert!(Ramp::new([0.0, 1.0], [0.0, f64::INFINITY]).is_err());
    assert!(Ramp::<0>::new([], []).is_err());
}
