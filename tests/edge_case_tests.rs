//! Edge case tests for smoothing, mapping and gesture classification

use finger_pointer::gesture::GestureClassifier;
use finger_pointer::hand_detection::{HandLandmarks, Landmark};
use finger_pointer::mapping::ScreenMapper;
use finger_pointer::smoothing::TrajectorySmoother;

#[test]
fn test_smoother_survives_extreme_values() {
    let mut smoother = TrajectorySmoother::new(13, 1, 60);

    let extreme_values = vec![
        (f64::INFINITY, f64::NEG_INFINITY),
        (f64::NEG_INFINITY, f64::INFINITY),
        (f64::NAN, f64::NAN),
        (f64::MAX, f64::MIN),
        (1e100, -1e100),
        (0.0, 0.0),
    ];

    // Feed extremes during bootstrap and after warmup; the smoother must
    // not panic either way
    for &(x, y) in &extreme_values {
        let _ = smoother.smooth(x, y);
    }
    for i in 0..100 {
        let _ = smoother.smooth(f64::from(i), f64::from(i));
    }
    for &(x, y) in &extreme_values {
        let _ = smoother.smooth(x, y);
    }
}

#[test]
fn test_smoother_recovers_after_non_finite_input() {
    let mut smoother = TrajectorySmoother::new(13, 1, 13);

    for i in 0..20 {
        smoother.smooth(f64::from(i), 0.0);
    }
    smoother.smooth(f64::NAN, 0.0);

    // Once the NaN leaves the window the fit is clean again
    let mut last = (f64::NAN, f64::NAN);
    for i in 0..20 {
        last = smoother.smooth(f64::from(100 + i), 0.0);
    }
    assert!(last.0.is_finite(), "Smoother should recover once NaN ages out");
    assert!((last.0 - 118.0).abs() < 1e-6);
}

#[test]
fn test_mapper_clamps_non_finite_projections_out() {
    let mut mapper = ScreenMapper::new(
        1200.0,
        720.0,
        1920.0,
        1080.0,
        0.1,
        TrajectorySmoother::new(13, 1, 60),
    )
    .unwrap();

    // Saturating rescale turns infinite camera inputs into edge positions
    let (x, y) = mapper.map_to_screen(f64::INFINITY, f64::NEG_INFINITY);
    assert!(x >= 1.0 && x <= 1919.0);
    assert!(y >= 1.0 && y <= 1079.0);
}

#[test]
fn test_degenerate_hand_with_coincident_landmarks() {
    let classifier = GestureClassifier::new();

    // All 21 points stacked on one pixel gives a zero threshold, and a
    // zero distance is not strictly below it
    let points = vec![Landmark::new(320.0, 240.0); 21];
    let hand = HandLandmarks::from_points(points, 1.0).unwrap();

    let touch = classifier.classify(&hand);
    assert!(!touch.any(), "Collapsed hand must not register touches");
}

#[test]
fn test_hand_with_non_finite_landmarks_does_not_panic() {
    let classifier = GestureClassifier::new();

    let mut points = vec![Landmark::new(100.0, 100.0); 21];
    points[4] = Landmark::new(f32::NAN, f32::NAN);
    points[8] = Landmark::new(f32::INFINITY, f32::NEG_INFINITY);
    let hand = HandLandmarks::from_points(points, 1.0).unwrap();

    // NaN distances compare false against any threshold
    let touch = classifier.classify(&hand);
    assert!(!touch.index);
}

#[test]
fn test_landmark_count_is_enforced() {
    let too_few = vec![Landmark::new(0.0, 0.0); 20];
    assert!(HandLandmarks::from_points(too_few, 1.0).is_err());

    let too_many = vec![Landmark::new(0.0, 0.0); 22];
    assert!(HandLandmarks::from_points(too_many, 1.0).is_err());

    let exact = vec![Landmark::new(0.0, 0.0); 21];
    assert!(HandLandmarks::from_points(exact, 1.0).is_ok());
}

#[test]
fn test_smallest_valid_smoothing_window() {
    // window 3, degree 1 is the smallest odd window above the degree
    let mut smoother = TrajectorySmoother::new(3, 1, 3);

    for i in 0..10 {
        let (x, _) = smoother.smooth(f64::from(i) * 2.0, 0.0);
        if i > 3 {
            assert!(
                (x - f64::from(i - 1) * 2.0).abs() < 1e-9,
                "Tiny window should still fit the ramp, got {} at {}",
                x,
                i
            );
        }
    }
}

#[test]
fn test_degree_zero_fits_the_window_mean() {
    let mut smoother = TrajectorySmoother::new(5, 0, 5);

    for _ in 0..5 {
        smoother.smooth(10.0, 0.0);
    }
    // Window holds [10, 10, 10, 10, 20]
    let (x, _) = smoother.smooth(20.0, 0.0);
    assert!((x - 12.0).abs() < 1e-9, "Degree 0 should average the window, got {}", x);
}

#[test]
fn test_mapper_with_tiny_screen() {
    let mut mapper = ScreenMapper::new(
        1200.0,
        720.0,
        3.0,
        3.0,
        0.0,
        TrajectorySmoother::new(13, 1, 60),
    )
    .unwrap();

    // The usable band collapses to [1, 2]
    let (x, y) = mapper.map_to_screen(600.0, 360.0);
    assert!((1.0..=2.0).contains(&x));
    assert!((1.0..=2.0).contains(&y));
}

#[test]
fn test_jittery_trajectory_stays_within_screen() {
    let mut mapper = ScreenMapper::new(
        1200.0,
        720.0,
        1920.0,
        1080.0,
        0.1,
        TrajectorySmoother::new(13, 1, 60),
    )
    .unwrap();

    for i in 0..500 {
        let jitter_x = (rand::random() - 0.5) * 80.0;
        let jitter_y = (rand::random() - 0.5) * 80.0;
        let (x, y) = mapper.map_to_screen(
            600.0 + f64::from(i % 7) * 40.0 + jitter_x,
            360.0 + jitter_y,
        );

        assert!(x >= 1.0 && x <= 1919.0, "x {} escaped at frame {}", x, i);
        assert!(y >= 1.0 && y <= 1079.0, "y {} escaped at frame {}", y, i);
    }
}

// Note: Using a simple RNG for test determinism
mod rand {
    use std::cell::RefCell;

    thread_local! {
        static SEED: RefCell<u64> = RefCell::new(98765);
    }

    pub fn random() -> f64 {
        SEED.with(|seed| {
            let mut s = seed.borrow_mut();
            *s = s.wrapping_mul(1103515245).wrapping_add(12345);
            ((*s / 65536) % 32768) as f64 / 32768.0
        })
    }
}
