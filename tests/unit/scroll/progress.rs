use super::*;

#[test]
fn new_clamps_and_maps_non_finite_to_zero() {
    assert_eq!(Progress::new(-0.5).get(), 0.0);
    assert_eq!(Progress::new(1.5).get(), 1.0);
    assert_eq!(Progress::new(0.25).get(), 0.25);
    assert_eq!(Progress::new(f64::NAN), Progress::ZERO);
    assert_eq!(Progress::new(f64::INFINITY), Progress::ZERO);
    assert_eq!(Progress::new(f64::NEG_INFINITY), Progress::ZERO);
}

#[test]
fn sweep_covers_both_ends() {
    let v: Vec<f64> = Progress::sweep(5).map(Progress::get).collect();
    assert_eq!(v, vec![0.0, 0.25, 0.5, 0.75, 1.0]);

    let single: Vec<f64> = Progress::sweep(1).map(Progress::get).collect();
    assert_eq!(single, vec![0.0]);

    assert_eq!(Progress::sweep(0).count(), 0);
}

#[test]
fn serde_round_trips_as_plain_number_and_clamps() {
    let p: Progress = serde_json::from_str("1.7").unwrap();
    assert_eq!(p, Progress::ONE);
    assert_eq!(serde_json::to_string(&Progress::new(0.5)).unwrap(), "0.5");
}
