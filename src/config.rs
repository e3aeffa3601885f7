//! Configuration management for the finger pointer application

use crate::constants::{
    DEFAULT_CAMERA_HEIGHT, DEFAULT_CAMERA_INDEX, DEFAULT_CAMERA_WIDTH, DEFAULT_CLICK_COOLDOWN_MS,
    DEFAULT_DETECTION_CONFIDENCE, DEFAULT_EDGE_EXPANSION, DEFAULT_RIGHT_CLICK_COOLDOWN_MS,
    DEFAULT_SCROLL_STEP, DEFAULT_SMOOTHING_BOOTSTRAP, DEFAULT_SMOOTHING_DEGREE,
    DEFAULT_SMOOTHING_WINDOW,
};
use crate::dispatch::GestureDispatcher;
use crate::smoothing::TrajectorySmoother;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Camera capture configuration
    pub camera: CameraConfig,

    /// Hand detection configuration
    pub detection: DetectionConfig,

    /// Trajectory smoothing configuration
    pub smoothing: SmoothingConfig,

    /// Coordinate mapping configuration
    pub mapping: MappingConfig,

    /// Action dispatch configuration
    pub dispatch: DispatchConfig,

    /// Display configuration
    pub display: DisplayConfig,
}

/// Camera capture parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Camera device index
    pub index: i32,

    /// Requested capture width in pixels
    pub width: i32,

    /// Requested capture height in pixels
    pub height: i32,
}

/// Hand detection parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Path to the hand landmark ONNX model
    pub model: PathBuf,

    /// Minimum hand presence confidence (0.0-1.0)
    pub min_confidence: f32,
}

/// Trajectory smoothing parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmoothingConfig {
    /// Filter window length in samples (odd)
    pub window: usize,

    /// Polynomial degree of the local fit
    pub degree: usize,

    /// Samples collected before smoothing engages
    pub bootstrap: usize,
}

/// Coordinate mapping parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingConfig {
    /// Fraction of the screen extended past each edge (0.0-0.5)
    pub edge_expansion: f64,
}

/// Action dispatch parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Left click cooldown in milliseconds
    pub click_cooldown_ms: u64,

    /// Right click cooldown in milliseconds
    pub right_click_cooldown_ms: u64,

    /// Scroll magnitude per frame in wheel units
    pub scroll_step: f64,
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Show the annotated preview window
    pub gui: bool,

    /// Preview window title
    pub window_name: String,

    /// Draw all 21 landmark dots rather than just the fingertip markers
    pub draw_landmarks: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            detection: DetectionConfig::default(),
            smoothing: SmoothingConfig::default(),
            mapping: MappingConfig::default(),
            dispatch: DispatchConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            index: DEFAULT_CAMERA_INDEX,
            width: DEFAULT_CAMERA_WIDTH,
            height: DEFAULT_CAMERA_HEIGHT,
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            model: PathBuf::from("assets/hand_landmarks.onnx"),
            min_confidence: DEFAULT_DETECTION_CONFIDENCE,
        }
    }
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            window: DEFAULT_SMOOTHING_WINDOW,
            degree: DEFAULT_SMOOTHING_DEGREE,
            bootstrap: DEFAULT_SMOOTHING_BOOTSTRAP,
        }
    }
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            edge_expansion: DEFAULT_EDGE_EXPANSION,
        }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            click_cooldown_ms: DEFAULT_CLICK_COOLDOWN_MS,
            right_click_cooldown_ms: DEFAULT_RIGHT_CLICK_COOLDOWN_MS,
            scroll_step: DEFAULT_SCROLL_STEP,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            gui: true,
            window_name: "Finger Pointer".to_string(),
            draw_landmarks: true,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        serde_yaml::from_str(&content)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))
    }

    /// Save configuration to a YAML file
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_yaml::to_string(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)?;

        Ok(())
    }

    /// Build the trajectory smoother described by this configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the smoothing parameters are invalid.
    pub fn create_smoother(&self) -> Result<TrajectorySmoother> {
        validate_smoothing(&self.smoothing)?;
        Ok(TrajectorySmoother::new(
            self.smoothing.window,
            self.smoothing.degree,
            self.smoothing.bootstrap,
        ))
    }

    /// Build the gesture dispatcher described by this configuration
    #[must_use]
    pub fn create_dispatcher(&self) -> GestureDispatcher {
        GestureDispatcher::new(
            Duration::from_millis(self.dispatch.click_cooldown_ms),
            Duration::from_millis(self.dispatch.right_click_cooldown_ms),
            self.dispatch.scroll_step,
        )
    }

    /// Validate configuration
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` describing the first invalid setting found.
    pub fn validate(&self) -> Result<()> {
        // Validate camera settings
        if self.camera.index < 0 {
            return Err(Error::ConfigError(
                "Camera index must not be negative".to_string(),
            ));
        }
        if self.camera.width <= 0 || self.camera.height <= 0 {
            return Err(Error::ConfigError(
                "Camera resolution must be positive".to_string(),
            ));
        }

        // Validate detection settings
        if !(0.0..=1.0).contains(&self.detection.min_confidence) {
            return Err(Error::ConfigError(
                "Detection confidence must be between 0.0 and 1.0".to_string(),
            ));
        }

        validate_smoothing(&self.smoothing)?;

        // Validate mapping settings
        if !self.mapping.edge_expansion.is_finite()
            || !(0.0..0.5).contains(&self.mapping.edge_expansion)
        {
            return Err(Error::ConfigError(
                "Edge expansion must be within [0.0, 0.5)".to_string(),
            ));
        }

        // Validate dispatch settings
        if self.dispatch.click_cooldown_ms == 0 || self.dispatch.right_click_cooldown_ms == 0 {
            return Err(Error::ConfigError(
                "Click cooldowns must be positive".to_string(),
            ));
        }
        if !self.dispatch.scroll_step.is_finite() || self.dispatch.scroll_step <= 0.0 {
            return Err(Error::ConfigError(
                "Scroll step must be positive".to_string(),
            ));
        }

        // Validate the model path exists
        if !self.detection.model.exists() {
            return Err(Error::ConfigError(format!(
                "Hand landmark model not found: {}",
                self.detection.model.display()
            )));
        }

        Ok(())
    }
}

fn validate_smoothing(smoothing: &SmoothingConfig) -> Result<()> {
    if smoothing.window == 0 || smoothing.window % 2 == 0 {
        return Err(Error::ConfigError(
            "Smoothing window must be odd and greater than 0".to_string(),
        ));
    }
    if smoothing.window <= smoothing.degree {
        return Err(Error::ConfigError(
            "Smoothing window must exceed the polynomial degree".to_string(),
        ));
    }
    if smoothing.bootstrap < smoothing.window {
        return Err(Error::ConfigError(
            "Smoothing bootstrap must cover at least one full window".to_string(),
        ));
    }
    Ok(())
}

/// Example configuration file content
pub const EXAMPLE_CONFIG: &str = r#"# Finger Pointer Configuration

# Camera capture
camera:
  index: 0
  width: 1200
  height: 720

# Hand detection
detection:
  model: "assets/hand_landmarks.onnx"
  min_confidence: 0.7

# Trajectory smoothing
smoothing:
  window: 13
  degree: 1
  bootstrap: 60

# Coordinate mapping
mapping:
  edge_expansion: 0.1

# Action dispatch
dispatch:
  click_cooldown_ms: 200
  right_click_cooldown_ms: 500
  scroll_step: 0.5

# Display settings
display:
  gui: true
  window_name: "Finger Pointer"
  draw_landmarks: true
"#;
