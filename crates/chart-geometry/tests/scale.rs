// File: crates/chart-geometry/tests/scale.rs
// Purpose: Linear scale mapping, degenerate domains and inversion.

use chart_geometry::{linear_scale, Domain, LinearScale};

#[test]
fn degenerate_domain_maps_to_range_midpoint() {
    for v in [-3.0, 0.0, 7.5, 1e9] {
        let s = linear_scale(Domain::new(v, v), (10.0, 30.0));
        for input in [v, v + 1.0, -1e6, f64::NAN] {
            assert_eq!(s(input), 20.0);
        }
    }
}

#[test]
fn maps_linearly_and_extrapolates() {
    let s = linear_scale(Domain::new(0.0, 100.0), (0.0, 200.0));
    assert_eq!(s(0.0), 0.0);
    assert_eq!(s(50.0), 100.0);
    assert_eq!(s(100.0), 200.0);
    assert_eq!(s(150.0), 300.0);
    assert_eq!(s(-50.0), -100.0);
}

#[test]
fn reversed_range_flips_screen_direction() {
    // y axes map larger values higher on screen.
    let s = LinearScale::new(Domain::new(0.0, 40.0), (300.0, 20.0));
    assert_eq!(s.scale(0.0), 300.0);
    assert_eq!(s.scale(40.0), 20.0);
    assert_eq!(s.scale(20.0), 160.0);
}

#[test]
fn invert_round_trips_pixels() {
    let s = LinearScale::new(Domain::new(-10.0, 10.0), (48.0, 448.0));
    for px in [48.0, 148.0, 248.0, 448.0] {
        assert!((s.scale(s.invert(px)) - px).abs() < 1e-9);
    }
    assert_eq!(s.invert(248.0), 0.0);
}

#[test]
fn degenerate_scale_inverts_to_domain_min() {
    let s = LinearScale::new(Domain::new(4.0, 4.0), (0.0, 100.0));
    assert_eq!(s.invert(73.0), 4.0);
}
