//! Utility functions for numeric casting and frame-space geometry.

pub mod safe_cast;

use crate::hand_detection::Landmark;
use opencv::core::Point;
use safe_cast::f32_to_i32_clamp;

/// Clamp a landmark position onto a frame's integer pixel grid.
///
/// Used when drawing overlay markers; landmark coordinates can sit slightly
/// outside the frame when the model extrapolates a partially visible hand.
#[must_use]
pub fn landmark_to_pixel(landmark: Landmark, frame_width: i32, frame_height: i32) -> Point {
    Point::new(
        f32_to_i32_clamp(landmark.x, 0, frame_width.saturating_sub(1)),
        f32_to_i32_clamp(landmark.y, 0, frame_height.saturating_sub(1)),
    )
}
