//! Gesture math: clamping, snapping, coordinate conversion.

use backlot::constants::{MAX_SCALE, MIN_SCALE};
use backlot::input::coords::{
    CoordinateConverter, compute_rotation_delta, compute_scale_delta, snap_rotation,
};
use backlot::types::{Point, Rect, clamp_scale};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn test_scale_stays_clamped_over_random_drags() {
    let mut rng = StdRng::seed_from_u64(0xBAC);
    for _ in 0..200 {
        let mut scale = 1.0;
        let mut pointer = Point::new(500.0, 500.0);
        for _ in 0..20 {
            let next = Point::new(
                pointer.x + rng.gen_range(-600.0..600.0),
                pointer.y + rng.gen_range(-600.0..600.0),
            );
            scale = compute_scale_delta(pointer, next, scale);
            assert!(
                (MIN_SCALE..=MAX_SCALE).contains(&scale),
                "scale {} escaped bounds",
                scale
            );
            pointer = next;
        }
    }
}

#[test]
fn test_snapped_rotation_is_multiple_of_step() {
    let mut rng = StdRng::seed_from_u64(15);
    let center = Point::new(300.0, 200.0);
    for _ in 0..500 {
        let start = Point::new(rng.gen_range(0.0..600.0), rng.gen_range(0.0..400.0));
        let current = Point::new(rng.gen_range(0.0..600.0), rng.gen_range(0.0..400.0));
        let start_rotation = rng.gen_range(-720.0..720.0);
        let r = compute_rotation_delta(center, start, current, start_rotation, true);
        if start == center || current == center {
            continue;
        }
        let steps = r / 15.0;
        assert!(
            (steps - steps.round()).abs() < 1e-3,
            "rotation {} is not a multiple of 15",
            r
        );
    }
}

#[test]
fn test_rotation_may_exceed_full_turn() {
    let center = Point::new(0.0, 0.0);
    let r = compute_rotation_delta(center, Point::new(10.0, 0.0), Point::new(0.0, 10.0), 350.0, false);
    assert!((r - 440.0).abs() < 0.01);
}

#[test]
fn test_nan_scale_falls_back() {
    assert_eq!(clamp_scale(f32::NAN), 1.0);
    assert_eq!(clamp_scale(f32::INFINITY), 1.0);
    assert_eq!(clamp_scale(-2.0), MIN_SCALE);
}

#[test]
fn test_snap_ties() {
    assert_eq!(snap_rotation(0.0), 0.0);
    assert_eq!(snap_rotation(14.9), 15.0);
    assert_eq!(snap_rotation(-7.6), -15.0);
    assert_eq!(snap_rotation(367.0), 360.0);
}

#[test]
fn test_canvas_local_is_rederived_per_rect() {
    let pointer = Point::new(300.0, 300.0);
    let before = CoordinateConverter::to_canvas_local(pointer, &Rect::new(0.0, 0.0, 800.0, 600.0));
    // canvas scrolled up by 120px between events
    let after = CoordinateConverter::to_canvas_local(pointer, &Rect::new(0.0, -120.0, 800.0, 600.0));
    assert_eq!(before, Point::new(300.0, 300.0));
    assert_eq!(after, Point::new(300.0, 420.0));
}
