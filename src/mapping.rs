//! Camera-to-screen coordinate mapping.
//!
//! Maps a camera-space pointer position onto the screen in four steps:
//! rescale into a range extended 10% past each screen edge (a hand near the
//! camera edge can still drive the pointer to the true screen edge), mirror
//! horizontally to match the user's perspective, smooth the trajectory, and
//! clamp into the screen's valid cursor range.

use crate::error::{Error, Result};
use crate::smoothing::TrajectorySmoother;

/// Maps camera pixel coordinates to smoothed, clamped screen coordinates.
///
/// Camera dimensions must be the actual frame dimensions reported by the
/// capture device, not the requested ones.
pub struct ScreenMapper {
    camera_width: f64,
    camera_height: f64,
    screen_width: f64,
    screen_height: f64,
    expansion: f64,
    smoother: TrajectorySmoother,
}

impl ScreenMapper {
    /// Create a mapper for the given camera and screen dimensions.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if either dimension pair is degenerate or the
    /// edge expansion lies outside `[0, 0.5)`.
    pub fn new(
        camera_width: f64,
        camera_height: f64,
        screen_width: f64,
        screen_height: f64,
        expansion: f64,
        smoother: TrajectorySmoother,
    ) -> Result<Self> {
        if !camera_width.is_finite() || !camera_height.is_finite() || camera_width <= 0.0 || camera_height <= 0.0 {
            return Err(Error::InvalidInput(format!(
                "Camera dimensions must be positive, got {camera_width}x{camera_height}"
            )));
        }
        if !screen_width.is_finite() || !screen_height.is_finite() || screen_width <= 2.0 || screen_height <= 2.0 {
            return Err(Error::InvalidInput(format!(
                "Screen dimensions too small for cursor range: {screen_width}x{screen_height}"
            )));
        }
        if !expansion.is_finite() || !(0.0..0.5).contains(&expansion) {
            return Err(Error::InvalidInput(format!(
                "Edge expansion must be within [0, 0.5), got {expansion}"
            )));
        }
        Ok(Self {
            camera_width,
            camera_height,
            screen_width,
            screen_height,
            expansion,
            smoother,
        })
    }

    /// Rescale a camera coordinate into the expanded screen range.
    ///
    /// Inputs outside the camera range saturate at the expanded endpoints.
    fn rescale(&self, value: f64, camera_extent: f64, screen_extent: f64) -> f64 {
        let t = (value / camera_extent).clamp(0.0, 1.0);
        let low = -self.expansion * screen_extent;
        let high = (1.0 + self.expansion) * screen_extent;
        low + t * (high - low)
    }

    /// Raw projection: rescale plus horizontal mirror, before smoothing and
    /// clamping. Pure; does not touch the pointer history.
    #[must_use]
    pub fn project(&self, xp: f64, yp: f64) -> (f64, f64) {
        let x = self.rescale(xp, self.camera_width, self.screen_width);
        let y = self.rescale(yp, self.camera_height, self.screen_height);
        (self.screen_width - x, y)
    }

    /// Map a camera-space point to final screen coordinates.
    ///
    /// Appends to the pointer history (the smoothing state), so the result
    /// depends on the full retained trajectory, not just this input. Output
    /// is always within `[1, width-1] x [1, height-1]`.
    pub fn map_to_screen(&mut self, xp: f64, yp: f64) -> (f64, f64) {
        let (raw_x, raw_y) = self.project(xp, yp);
        let (smooth_x, smooth_y) = self.smoother.smooth(raw_x, raw_y);
        (
            smooth_x.clamp(1.0, self.screen_width - 1.0),
            smooth_y.clamp(1.0, self.screen_height - 1.0),
        )
    }

    /// Screen width in pixels
    #[must_use]
    pub const fn screen_width(&self) -> f64 {
        self.screen_width
    }

    /// Screen height in pixels
    #[must_use]
    pub const fn screen_height(&self) -> f64 {
        self.screen_height
    }

    /// True once the smoother has left its bootstrap phase
    #[must_use]
    pub fn is_warmed_up(&self) -> bool {
        self.smoother.is_warmed_up()
    }

    /// Clear the pointer history
    pub fn reset(&mut self) {
        self.smoother.reset();
    }
}
