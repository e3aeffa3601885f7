//! Constants used throughout the application

/// Number of landmarks in the hand topology contract
pub const NUM_HAND_LANDMARKS: usize = 21;

/// Default camera device index
pub const DEFAULT_CAMERA_INDEX: i32 = 0;

/// Default requested capture width in pixels
pub const DEFAULT_CAMERA_WIDTH: i32 = 1200;

/// Default requested capture height in pixels
pub const DEFAULT_CAMERA_HEIGHT: i32 = 720;

/// Default minimum hand detection confidence
pub const DEFAULT_DETECTION_CONFIDENCE: f32 = 0.7;

/// Touch threshold as a multiple of the palm reference distance
pub const TOUCH_THRESHOLD_FACTOR: f32 = 1.5;

/// Smoothing filter window length in samples (must be odd)
pub const DEFAULT_SMOOTHING_WINDOW: usize = 13;

/// Smoothing filter polynomial degree
pub const DEFAULT_SMOOTHING_DEGREE: usize = 1;

/// Number of samples collected before smoothing engages
pub const DEFAULT_SMOOTHING_BOOTSTRAP: usize = 60;

/// Maximum retained pointer history length per axis
pub const MAX_POINTER_HISTORY: usize = 1000;

/// Number of oldest history entries dropped when the cap is exceeded
pub const POINTER_HISTORY_TRUNCATE: usize = 500;

/// Fraction of the screen extended past each edge by the mapper
pub const DEFAULT_EDGE_EXPANSION: f64 = 0.1;

/// Left click cooldown in milliseconds
pub const DEFAULT_CLICK_COOLDOWN_MS: u64 = 200;

/// Right click cooldown in milliseconds
pub const DEFAULT_RIGHT_CLICK_COOLDOWN_MS: u64 = 500;

/// Scroll magnitude per frame in wheel units
pub const DEFAULT_SCROLL_STEP: f64 = 0.5;

/// Consecutive camera read failures tolerated before aborting
pub const MAX_CONSECUTIVE_READ_FAILURES: u32 = 30;

/// Radius of fingertip marker circles in the preview window
pub const FINGERTIP_MARKER_RADIUS: i32 = 10;

/// Radius of plain landmark dots in the preview window
pub const LANDMARK_DOT_RADIUS: i32 = 3;
