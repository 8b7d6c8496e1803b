use glam::Vec2;
use monolith_core::{PointerState, SmoothingFilter};

#[test]
fn one_step_at_default_alpha() {
    let filter = SmoothingFilter::new(0.05).unwrap();
    let mut state = PointerState {
        target: Vec2::new(1.0, 0.0),
        current: Vec2::ZERO,
    };
    filter.step(&mut state);
    assert!((state.current.x - 0.05).abs() < 1e-6);
    assert_eq!(state.current.y, 0.0);
}

#[test]
fn distance_to_target_shrinks_every_frame() {
    for alpha in [0.01, 0.05, 0.08, 0.5, 0.99] {
        let filter = SmoothingFilter::new(alpha).unwrap();
        let mut state = PointerState {
            target: Vec2::new(0.7, -0.3),
            current: Vec2::new(-1.0, 1.0),
        };
        let mut prev = state.current.distance(state.target);
        for _ in 0..200 {
            filter.step(&mut state);
            let d = state.current.distance(state.target);
            // below this the step is lost to f32 rounding
            if prev > 1e-5 {
                assert!(d < prev, "alpha {alpha}: {d} !< {prev}");
            }
            prev = d;
        }
        assert!(prev < 0.2, "alpha {alpha} did not approach target: {prev}");
    }
}

#[test]
fn converges_toward_target_outside_unit_range() {
    let filter = SmoothingFilter::new(0.08).unwrap();
    let mut state = PointerState {
        target: Vec2::new(2.4, -1.8),
        current: Vec2::ZERO,
    };
    for _ in 0..500 {
        filter.step(&mut state);
    }
    assert!(state.current.abs_diff_eq(state.target, 1e-4));
}
