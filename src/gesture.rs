//! Gesture classification from hand landmarks.
//!
//! Pure per-frame geometry: fingertip-to-thumb distances compared against an
//! adaptive threshold derived from the palm width, so the same pinch reads
//! identically whether the hand is near or far from the camera.

use crate::constants::TOUCH_THRESHOLD_FACTOR;
use crate::hand_detection::{landmark_index, HandLandmarks, Landmark};

/// The five fingers of the tracked hand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finger {
    /// Thumb
    Thumb,
    /// Index finger
    Index,
    /// Middle finger
    Middle,
    /// Ring finger
    Ring,
    /// Pinky finger
    Pinky,
}

impl Finger {
    /// All fingers in anatomical order
    pub const ALL: [Self; 5] = [Self::Thumb, Self::Index, Self::Middle, Self::Ring, Self::Pinky];

    /// Topology index of this finger's tip landmark
    #[must_use]
    pub const fn tip_index(self) -> usize {
        match self {
            Self::Thumb => landmark_index::THUMB_TIP,
            Self::Index => landmark_index::INDEX_FINGER_TIP,
            Self::Middle => landmark_index::MIDDLE_FINGER_TIP,
            Self::Ring => landmark_index::RING_FINGER_TIP,
            Self::Pinky => landmark_index::PINKY_TIP,
        }
    }
}

/// Which fingertips are touching the thumb in the current frame.
///
/// Derived fresh each frame; carries no temporal memory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchState {
    /// Index fingertip is touching the thumb tip
    pub index: bool,
    /// Middle fingertip is touching the thumb tip
    pub middle: bool,
    /// Ring fingertip is touching the thumb tip
    pub ring: bool,
}

impl TouchState {
    /// True if any tracked fingertip touches the thumb
    #[must_use]
    pub const fn any(self) -> bool {
        self.index || self.middle || self.ring
    }
}

/// Euclidean distance between two landmarks in pixels
#[must_use]
pub fn landmark_distance(a: Landmark, b: Landmark) -> f32 {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Distance between the tips of two fingers
#[must_use]
pub fn fingertip_distance(hand: &HandLandmarks, a: Finger, b: Finger) -> f32 {
    landmark_distance(hand.point(a.tip_index()), hand.point(b.tip_index()))
}

/// Midpoint between the tips of two fingers
#[must_use]
pub fn fingertip_midpoint(hand: &HandLandmarks, a: Finger, b: Finger) -> Landmark {
    let pa = hand.point(a.tip_index());
    let pb = hand.point(b.tip_index());
    Landmark::new((pa.x + pb.x) / 2.0, (pa.y + pb.y) / 2.0)
}

/// Classifies fingertip-to-thumb touches with a hand-size-adaptive threshold
pub struct GestureClassifier {
    threshold_factor: f32,
}

impl GestureClassifier {
    /// Create a classifier with the standard threshold factor
    #[must_use]
    pub const fn new() -> Self {
        Self {
            threshold_factor: TOUCH_THRESHOLD_FACTOR,
        }
    }

    /// Per-frame touch threshold: a multiple of the palm width measured
    /// between the ring and pinky knuckles
    #[must_use]
    pub fn touch_threshold(&self, hand: &HandLandmarks) -> f32 {
        let palm = landmark_distance(
            hand.point(landmark_index::RING_FINGER_MCP),
            hand.point(landmark_index::PINKY_MCP),
        );
        self.threshold_factor * palm
    }

    /// True iff the tips of `a` and `b` are closer than the touch threshold
    #[must_use]
    pub fn fingers_touching(&self, hand: &HandLandmarks, a: Finger, b: Finger) -> bool {
        fingertip_distance(hand, a, b) < self.touch_threshold(hand)
    }

    /// Classify which fingertips are touching the thumb
    #[must_use]
    pub fn classify(&self, hand: &HandLandmarks) -> TouchState {
        TouchState {
            index: self.fingers_touching(hand, Finger::Thumb, Finger::Index),
            middle: self.fingers_touching(hand, Finger::Thumb, Finger::Middle),
            ring: self.fingers_touching(hand, Finger::Thumb, Finger::Ring),
        }
    }
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new()
    }
}
