//! Tests for trajectory smoother output accuracy comparing with expected values

use finger_pointer::constants::MAX_POINTER_HISTORY;
use finger_pointer::smoothing::TrajectorySmoother;

/// Weight of the newest sample on the fitted output for window 13, degree 1.
///
/// A least squares line through positions 0..=12 evaluated at position 11
/// weighs sample t by 1/13 + 5(t - 6)/182, which is 44/182 for t = 12.
const NEWEST_SAMPLE_WEIGHT: f64 = 22.0 / 91.0;

#[test]
fn test_bootstrap_passes_raw_values_through() {
    let mut smoother = TrajectorySmoother::new(13, 1, 60);

    for i in 0..60 {
        let (x, y) = smoother.smooth(f64::from(i) * 7.0, f64::from(i) * -3.0);
        assert_eq!(x, f64::from(i) * 7.0, "Raw x should pass through during bootstrap");
        assert_eq!(y, f64::from(i) * -3.0, "Raw y should pass through during bootstrap");
    }
    assert!(!smoother.is_warmed_up());

    // The 61st sample is the first smoothed one
    let (x, _) = smoother.smooth(60.0 * 7.0, 0.0);
    assert!(smoother.is_warmed_up());
    assert!((x - 59.0 * 7.0).abs() < 1e-6, "Linear input should fit exactly, got {}", x);
}

#[test]
fn test_constant_input_is_unchanged() {
    let mut smoother = TrajectorySmoother::new(13, 1, 60);

    let mut last = (0.0, 0.0);
    for _ in 0..200 {
        last = smoother.smooth(640.0, 360.0);
    }

    assert!((last.0 - 640.0).abs() < 1e-9, "Constant x should be reproduced, got {}", last.0);
    assert!((last.1 - 360.0).abs() < 1e-9, "Constant y should be reproduced, got {}", last.1);
}

#[test]
fn test_linear_ramp_returns_previous_sample() {
    // A degree 1 fit reproduces a line exactly, and the output position is
    // one sample behind the newest, so a ramp yields the previous value.
    let mut smoother = TrajectorySmoother::new(13, 1, 60);

    for i in 0..=100 {
        let value = 3.0 * f64::from(i);
        let (x, y) = smoother.smooth(value, value / 2.0);

        if i > 60 {
            let expected = 3.0 * f64::from(i - 1);
            assert!(
                (x - expected).abs() < 1e-6,
                "Ramp output at {} should be {}, got {}",
                i,
                expected,
                x
            );
            assert!((y - expected / 2.0).abs() < 1e-6);
        }
    }
}

#[test]
fn test_step_response_is_damped() {
    let mut smoother = TrajectorySmoother::new(13, 1, 60);

    for _ in 0..75 {
        smoother.smooth(0.0, 0.0);
    }

    // A unit step on the newest sample moves the fit by its weight only
    let (x, _) = smoother.smooth(1.0, 0.0);
    assert!(
        (x - NEWEST_SAMPLE_WEIGHT).abs() < 1e-9,
        "Unit step response should be {}, got {}",
        NEWEST_SAMPLE_WEIGHT,
        x
    );
}

#[test]
fn test_spike_is_attenuated() {
    let mut smoother = TrajectorySmoother::new(13, 1, 60);

    for i in 0..80 {
        smoother.smooth(2.0 * f64::from(i), 0.0);
    }

    // Inject a spike on top of the ramp
    let spike = 500.0;
    let (x, _) = smoother.smooth(2.0 * 80.0 + spike, 0.0);

    let ramp_only = 2.0 * 79.0;
    let expected = ramp_only + spike * NEWEST_SAMPLE_WEIGHT;
    assert!(
        (x - expected).abs() < 1e-6,
        "Spike should contribute only its fit weight, expected {}, got {}",
        expected,
        x
    );
    assert!(x < ramp_only + spike, "Spike must not pass through at full magnitude");
}

#[test]
fn test_noise_variance_is_reduced() {
    let mut smoother = TrajectorySmoother::new(13, 1, 60);

    let mut raw_residuals = Vec::new();
    let mut smoothed_residuals = Vec::new();

    for i in 0..1000 {
        let t = f64::from(i) * 0.05;
        let clean = 30.0 * t.sin() + 500.0;
        let noise = (rand::random() - 0.5) * 5.0;
        let noisy = clean + noise;

        let (x, _) = smoother.smooth(noisy, 0.0);

        // Compare against the clean signal one sample back, where the
        // smoother output lives
        if i > 80 {
            let reference = 30.0 * (f64::from(i - 1) * 0.05).sin() + 500.0;
            raw_residuals.push(noisy - clean);
            smoothed_residuals.push(x - reference);
        }
    }

    let raw_var = variance(&raw_residuals);
    let smoothed_var = variance(&smoothed_residuals);

    assert!(
        smoothed_var < raw_var * 0.6,
        "Smoothing should reduce noise variance (raw: {}, smoothed: {})",
        raw_var,
        smoothed_var
    );
}

#[test]
fn test_history_stays_bounded() {
    let mut smoother = TrajectorySmoother::new(13, 1, 60);

    for i in 0..2500 {
        smoother.smooth(f64::from(i), f64::from(i));
        assert!(
            smoother.history_len() <= MAX_POINTER_HISTORY,
            "History exceeded cap at sample {}",
            i
        );
    }
}

#[test]
fn test_truncation_does_not_disturb_output() {
    let mut smoother = TrajectorySmoother::new(13, 1, 60);

    // On a linear ramp every warmed-up output equals the previous sample,
    // including the samples right after the history is cut down.
    for i in 0..1200 {
        let (x, _) = smoother.smooth(f64::from(i), 0.0);
        if i > 60 {
            assert!(
                (x - f64::from(i - 1)).abs() < 1e-6,
                "Output diverged at sample {}: {}",
                i,
                x
            );
        }
    }
    assert!(smoother.history_len() < MAX_POINTER_HISTORY);
}

#[test]
fn test_reset_returns_to_bootstrap() {
    let mut smoother = TrajectorySmoother::new(13, 1, 60);

    for i in 0..100 {
        smoother.smooth(f64::from(i), f64::from(i));
    }
    assert!(smoother.is_warmed_up());

    smoother.reset();
    assert!(!smoother.is_warmed_up());
    assert_eq!(smoother.history_len(), 0);

    // Raw passthrough again after the reset
    let (x, y) = smoother.smooth(123.0, 456.0);
    assert_eq!((x, y), (123.0, 456.0));
}

#[test]
fn test_quadratic_fit_with_higher_degree() {
    // Degree 2 reproduces a parabola exactly, so the output is the
    // previous sample of the parabola.
    let mut smoother = TrajectorySmoother::new(13, 2, 13);

    for i in 0..=50 {
        let value = f64::from(i * i);
        let (x, _) = smoother.smooth(value, 0.0);
        if i > 13 {
            let expected = f64::from((i - 1) * (i - 1));
            assert!(
                (x - expected).abs() < 1e-5,
                "Quadratic output at {} should be {}, got {}",
                i,
                expected,
                x
            );
        }
    }
}

fn variance(values: &[f64]) -> f64 {
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64
}

// Note: Using a simple RNG for test determinism
mod rand {
    use std::cell::RefCell;

    thread_local! {
        static SEED: RefCell<u64> = RefCell::new(12345);
    }

    pub fn random() -> f64 {
        SEED.with(|seed| {
            let mut s = seed.borrow_mut();
            *s = s.wrapping_mul(1103515245).wrapping_add(12345);
            ((*s / 65536) % 32768) as f64 / 32768.0
        })
    }
}
