//! Hand landmark detection via `ONNX` Runtime.
//!
//! Wraps a single-hand landmark model behind a small boundary: each frame in,
//! zero or more [`HandLandmarks`] out, with coordinates already scaled to the
//! frame's actual pixel dimensions. Detections below the configured presence
//! confidence are discarded here so downstream stages never see them.

use crate::{constants::NUM_HAND_LANDMARKS, utils::safe_cast::usize_to_i32, Result};
use ndarray::{Array1, Array4, CowArray};
use opencv::core::{Mat, Size, CV_32F};
use opencv::imgproc::{self, InterpolationFlags};
use opencv::prelude::*;
use ort::{Environment, Session, Value};
use std::path::Path;
use std::sync::Arc;

/// Default hand landmark model input size
const DEFAULT_HAND_INPUT_SIZE: i32 = 224;

/// Named indices into the 21-point hand topology.
///
/// Index order follows the `MediaPipe` hand landmark convention: wrist first,
/// then four joints per finger from palm to tip.
pub mod landmark_index {
    /// Wrist / palm base
    pub const WRIST: usize = 0;
    /// Thumb tip
    pub const THUMB_TIP: usize = 4;
    /// Index finger tip
    pub const INDEX_FINGER_TIP: usize = 8;
    /// Middle finger knuckle (palm reference)
    pub const MIDDLE_FINGER_MCP: usize = 9;
    /// Middle finger tip
    pub const MIDDLE_FINGER_TIP: usize = 12;
    /// Ring finger knuckle (first palm reference for the touch threshold)
    pub const RING_FINGER_MCP: usize = 13;
    /// Ring finger tip
    pub const RING_FINGER_TIP: usize = 16;
    /// Pinky knuckle (second palm reference for the touch threshold)
    pub const PINKY_MCP: usize = 17;
    /// Pinky tip
    pub const PINKY_TIP: usize = 20;
}

/// A single tracked keypoint in frame pixel coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Landmark {
    /// Horizontal pixel coordinate
    pub x: f32,
    /// Vertical pixel coordinate
    pub y: f32,
}

impl Landmark {
    /// Create a landmark from pixel coordinates
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One detected hand: 21 landmarks plus the model's presence confidence.
///
/// Construction goes through [`HandLandmarks::from_points`], which enforces
/// the fixed 21-point topology contract of the landmark provider.
#[derive(Debug, Clone)]
pub struct HandLandmarks {
    points: [Landmark; NUM_HAND_LANDMARKS],
    confidence: f32,
}

impl HandLandmarks {
    /// Build a landmark set from exactly 21 points
    ///
    /// # Errors
    ///
    /// Returns `ModelValidationError` if the point count differs from 21.
    pub fn from_points(points: Vec<Landmark>, confidence: f32) -> Result<Self> {
        let count = points.len();
        let points: [Landmark; NUM_HAND_LANDMARKS] = points.try_into().map_err(|_| {
            crate::error::Error::ModelValidationError(format!(
                "Expected {NUM_HAND_LANDMARKS} hand landmarks, got {count}"
            ))
        })?;
        Ok(Self { points, confidence })
    }

    /// Landmark at a topology index (see [`landmark_index`])
    ///
    /// # Panics
    ///
    /// Panics if `index >= 21`; callers use the named topology indices.
    #[must_use]
    pub fn point(&self, index: usize) -> Landmark {
        self.points[index]
    }

    /// All 21 landmarks in topology order
    #[must_use]
    pub fn points(&self) -> &[Landmark; NUM_HAND_LANDMARKS] {
        &self.points
    }

    /// Model presence confidence for this hand
    #[must_use]
    pub const fn confidence(&self) -> f32 {
        self.confidence
    }
}

/// Hand landmark detector using `ONNX` Runtime
pub struct HandDetector {
    session: Session,
    #[allow(dead_code)] // Reserved for future named tensor support
    input_name: String,
    #[allow(dead_code)] // Reserved for future named tensor support
    output_name: String,
    input_size: i32,
    min_confidence: f32,
}

impl HandDetector {
    /// Create a new hand detector from an `ONNX` model file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The ONNX model file cannot be loaded
    /// - The model has an unexpected structure
    /// - The ONNX runtime environment cannot be created
    pub fn new<P: AsRef<Path>>(model_path: P, min_confidence: f32) -> Result<Self> {
        log::info!(
            "Initializing HandDetector with model: {} (min confidence {})",
            model_path.as_ref().display(),
            min_confidence
        );
        let environment = Arc::new(
            Environment::builder()
                .with_name("hand_detector")
                .with_log_level(ort::LoggingLevel::Warning)
                .build()?,
        );

        let session = ort::SessionBuilder::new(&environment)?
            .with_optimization_level(ort::GraphOptimizationLevel::Level3)?
            .with_model_from_file(model_path)?;

        // Get model input/output metadata
        let input_name = session
            .inputs
            .first()
            .ok_or_else(|| crate::error::Error::ModelInputError("Model has no inputs".to_string()))?
            .name
            .clone();

        let output_name = session
            .outputs
            .first()
            .ok_or_else(|| crate::error::Error::ModelOutputError("Model has no outputs".to_string()))?
            .name
            .clone();

        Ok(Self {
            session,
            input_name,
            output_name,
            input_size: DEFAULT_HAND_INPUT_SIZE,
            min_confidence,
        })
    }

    /// Detect hand landmarks in a camera frame
    ///
    /// Returns an empty vector when no hand is present or the presence score
    /// falls below the confidence threshold. Coordinates are scaled to the
    /// frame's own width and height.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Frame preprocessing fails
    /// - The ONNX model inference fails
    /// - The output tensor violates the 21-point topology
    #[allow(clippy::cast_precision_loss)] // Frame dimensions are small
    pub fn detect(&self, frame: &Mat) -> Result<Vec<HandLandmarks>> {
        let input = self.preprocess(frame)?;
        let (marks, score) = self.forward(input)?;

        self.postprocess(&marks, score, frame.cols() as f32, frame.rows() as f32)
    }

    /// Preprocess a frame into the model input tensor
    #[allow(clippy::cast_sign_loss)] // OpenCV dimensions are positive
    fn preprocess(&self, frame: &Mat) -> Result<Array4<f32>> {
        let size = self.input_size as usize;
        let channels = 3;

        // Resize to the model's square input
        let mut resized = Mat::default();
        imgproc::resize(
            frame,
            &mut resized,
            Size::new(self.input_size, self.input_size),
            0.0,
            0.0,
            InterpolationFlags::INTER_LINEAR as i32,
        )?;

        // Convert BGR to RGB
        let mut rgb_image = Mat::default();
        imgproc::cvt_color(&resized, &mut rgb_image, imgproc::COLOR_BGR2RGB, 0)?;

        // Convert to f32 and normalize to [0, 1]
        let mut float_image = Mat::default();
        rgb_image.convert_to(&mut float_image, CV_32F, 1.0 / 255.0, 0.0)?;

        let mut data = vec![0.0f32; size * size * channels];
        for row in 0..size {
            for col in 0..size {
                let pixel = float_image
                    .at_2d::<opencv::core::Vec3f>(usize_to_i32(row)?, usize_to_i32(col)?)?;
                for ch in 0..channels {
                    data[(row * size + col) * channels + ch] = pixel[ch];
                }
            }
        }

        // NHWC layout; the hand landmark model takes channels-last input
        Array4::from_shape_vec((1, size, size, channels), data).map_err(|e| {
            crate::error::Error::ModelDataFormatError(format!("Failed to create input tensor: {e}"))
        })
    }

    /// Run forward pass through the model
    ///
    /// Returns the flat landmark tensor and the hand presence score. Models
    /// without a score output are treated as fully confident.
    fn forward(&self, input: Array4<f32>) -> Result<(Array1<f32>, f32)> {
        let cow_array = CowArray::from(input.into_dyn());
        let input_tensor = Value::from_array(self.session.allocator(), &cow_array)?;

        let outputs = self.session.run(vec![input_tensor])?;
        let mut outputs = outputs.into_iter();

        let marks_output = outputs
            .next()
            .ok_or_else(|| crate::error::Error::ModelOutputError("No output from model".to_string()))?;

        let marks_tensor = marks_output.try_extract::<f32>()?;
        let marks_view = marks_tensor.view();
        let marks_data = marks_view
            .as_slice()
            .ok_or_else(|| crate::error::Error::ModelOutputError("Failed to get output data".to_string()))?;
        let marks = Array1::from(marks_data.to_vec());

        let score = match outputs.next() {
            Some(score_output) => {
                let score_tensor = score_output.try_extract::<f32>()?;
                let score_view = score_tensor.view();
                score_view.iter().copied().next().unwrap_or(1.0)
            }
            None => 1.0,
        };

        Ok((marks, score))
    }

    /// Convert model output to landmark sets in frame coordinates
    #[allow(clippy::cast_precision_loss)] // Precision loss acceptable for pixel coordinates
    fn postprocess(
        &self,
        marks: &Array1<f32>,
        score: f32,
        frame_width: f32,
        frame_height: f32,
    ) -> Result<Vec<HandLandmarks>> {
        if score < self.min_confidence {
            log::debug!(
                "Hand presence score {score:.3} below threshold {:.3}, dropping detection",
                self.min_confidence
            );
            return Ok(Vec::new());
        }

        // Landmark tensors carry either (x, y) or (x, y, z) per point; the z
        // component, when present, is not used by the pointer pipeline.
        if marks.is_empty() || marks.len() % NUM_HAND_LANDMARKS != 0 {
            return Err(crate::error::Error::ModelValidationError(format!(
                "Landmark tensor with {} values does not fit the {NUM_HAND_LANDMARKS}-point topology",
                marks.len()
            )));
        }
        let values_per_landmark = marks.len() / NUM_HAND_LANDMARKS;
        if values_per_landmark < 2 {
            return Err(crate::error::Error::ModelValidationError(format!(
                "Landmark tensor carries {values_per_landmark} values per point, expected at least x and y"
            )));
        }

        // Model coordinates live in input-tensor pixel space, scale to frame
        let scale_x = frame_width / self.input_size as f32;
        let scale_y = frame_height / self.input_size as f32;

        let mut points = Vec::with_capacity(NUM_HAND_LANDMARKS);
        for j in 0..NUM_HAND_LANDMARKS {
            let idx = j * values_per_landmark;
            points.push(Landmark::new(marks[idx] * scale_x, marks[idx + 1] * scale_y));
        }

        Ok(vec![HandLandmarks::from_points(points, score)?])
    }
}
