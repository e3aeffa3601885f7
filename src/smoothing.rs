//! Savitzky–Golay smoothing of the pointer trajectory.
//!
//! The smoother owns a bounded history of raw mapped screen coordinates and
//! produces a denoised coordinate by fitting a low-degree polynomial over the
//! most recent window, evaluated one sample before the end: the newest sample
//! has the weakest neighbor support, while the second-to-last balances
//! smoothness against responsiveness. The deliberate one-sample delay costs
//! roughly 50 ms at typical camera frame rates and removes hand-tremor jitter.

use crate::constants::{MAX_POINTER_HISTORY, POINTER_HISTORY_TRUNCATE};
use nalgebra::{DMatrix, DVector};

/// Stateful trajectory smoother over the per-session pointer history.
///
/// Both coordinate histories grow one sample per call and are truncated
/// together: when the length would exceed [`MAX_POINTER_HISTORY`], the oldest
/// [`POINTER_HISTORY_TRUNCATE`] samples are dropped from each. The filter
/// window always fits inside the retained tail, so truncation never changes
/// the smoothed output.
pub struct TrajectorySmoother {
    window: usize,
    degree: usize,
    bootstrap: usize,
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl TrajectorySmoother {
    /// Create a smoother with the given window length, polynomial degree,
    /// and bootstrap sample count.
    ///
    /// # Panics
    ///
    /// Panics if the window is even, if the window does not exceed the
    /// degree, or if the bootstrap count is smaller than the window.
    #[must_use]
    pub fn new(window: usize, degree: usize, bootstrap: usize) -> Self {
        assert!(window % 2 == 1, "Smoothing window must be odd");
        assert!(
            window > degree,
            "Smoothing window must exceed the polynomial degree"
        );
        assert!(
            bootstrap >= window,
            "Bootstrap count must cover at least one full window"
        );
        Self {
            window,
            degree,
            bootstrap,
            xs: Vec::with_capacity(MAX_POINTER_HISTORY + 1),
            ys: Vec::with_capacity(MAX_POINTER_HISTORY + 1),
        }
    }

    /// Append a raw coordinate pair and return the smoothed pair.
    ///
    /// During the bootstrap phase (history length still at or below the
    /// bootstrap count) the input is returned unchanged; the local regression
    /// is never run on a window it cannot fill.
    pub fn smooth(&mut self, x: f64, y: f64) -> (f64, f64) {
        self.xs.push(x);
        self.ys.push(y);

        if self.xs.len() > MAX_POINTER_HISTORY {
            self.xs.drain(..POINTER_HISTORY_TRUNCATE);
            self.ys.drain(..POINTER_HISTORY_TRUNCATE);
        }

        if self.xs.len() <= self.bootstrap {
            return (x, y);
        }

        (
            fit_tail(&self.xs, self.window, self.degree),
            fit_tail(&self.ys, self.window, self.degree),
        )
    }

    /// Number of samples currently retained per axis
    #[must_use]
    pub fn history_len(&self) -> usize {
        debug_assert_eq!(self.xs.len(), self.ys.len());
        self.xs.len()
    }

    /// True once enough samples have accumulated for smoothing to engage
    #[must_use]
    pub fn is_warmed_up(&self) -> bool {
        self.xs.len() > self.bootstrap
    }

    /// Drop all history, returning to the bootstrap phase
    pub fn reset(&mut self) {
        self.xs.clear();
        self.ys.clear();
    }
}

/// Savitzky–Golay output at the second-from-last position of `series`.
///
/// The trailing output positions of a Savitzky–Golay pass come from a single
/// least-squares fit over the last `window` samples, so only that fit is
/// computed here.
fn fit_tail(series: &[f64], window: usize, degree: usize) -> f64 {
    let tail = &series[series.len() - window..];
    fit_polynomial_at(tail, degree, window - 2)
}

/// Least-squares polynomial value at sample index `position`.
#[allow(clippy::cast_precision_loss)] // Sample positions are small integers
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)] // Degree is single-digit
fn fit_polynomial_at(samples: &[f64], degree: usize, position: usize) -> f64 {
    let rows = samples.len();
    let cols = degree + 1;

    let design = DMatrix::from_fn(rows, cols, |row, col| (row as f64).powi(col as i32));
    let values = DVector::from_column_slice(samples);

    let gram = design.transpose() * &design;
    let moment = design.transpose() * values;

    // The normal equations are regular for distinct sample positions; the
    // fallback only covers numerical breakdown.
    match gram.lu().solve(&moment) {
        Some(coeffs) => {
            let t = position as f64;
            coeffs
                .iter()
                .enumerate()
                .map(|(power, coeff)| coeff * t.powi(power as i32))
                .sum()
        }
        None => samples[position],
    }
}
