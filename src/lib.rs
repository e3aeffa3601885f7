//! Finger pointer library for driving the mouse with hand gestures.
//!
//! This library turns a webcam feed into pointer control using:
//! - ONNX Runtime for hand landmark inference
//! - `OpenCV` for camera capture and image operations
//! - Savitzky-Golay smoothing for a steady cursor trajectory
//! - X11 `XTEST` for synthesizing pointer events
//!
//! The pipeline consists of:
//! 1. Hand landmark detection to find 21 key points
//! 2. Gesture classification from thumb to fingertip distances
//! 3. Mapping the thumb+index midpoint into screen coordinates
//! 4. Dispatching pointer actions with per-click cooldowns
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```no_run
//! use finger_pointer::gesture::GestureClassifier;
//! use finger_pointer::hand_detection::HandDetector;
//! use opencv::imgcodecs;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load the landmark model
//! let detector = HandDetector::new("assets/hand_landmarks.onnx", 0.7)?;
//! let classifier = GestureClassifier::new();
//!
//! // Load and process an image
//! let image = imgcodecs::imread("hand.jpg", imgcodecs::IMREAD_COLOR)?;
//!
//! for hand in detector.detect(&image)? {
//!     let touch = classifier.classify(&hand);
//!     println!(
//!         "index: {} middle: {} ring: {}",
//!         touch.index, touch.middle, touch.ring
//!     );
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Smoothing a Trajectory
//!
//! ```no_run
//! use finger_pointer::smoothing::TrajectorySmoother;
//!
//! # fn main() {
//! let mut smoother = TrajectorySmoother::new(13, 1, 60);
//!
//! // Raw positions pass through until enough history has accumulated
//! for i in 0..100 {
//!     let (x, y) = smoother.smooth(f64::from(i), 42.0);
//!     println!("({:.1}, {:.1})", x, y);
//! }
//! # }
//! ```
//!
//! ## Complete Pipeline Example
//!
//! ```no_run
//! use finger_pointer::config::Config;
//! use finger_pointer::dispatch::GestureIntent;
//! use finger_pointer::gesture::{fingertip_midpoint, Finger, GestureClassifier};
//! use finger_pointer::hand_detection::HandDetector;
//! use finger_pointer::mapping::ScreenMapper;
//! use finger_pointer::mouse_control::MouseController;
//! use opencv::{core::Mat, prelude::*, videoio};
//! use std::time::Instant;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = Config::default();
//!
//! // Initialize components
//! let detector = HandDetector::new(&settings.detection.model, 0.7)?;
//! let classifier = GestureClassifier::new();
//! let mut dispatcher = settings.create_dispatcher();
//! let mut mouse = MouseController::new()?;
//!
//! let (screen_width, screen_height) = mouse.get_screen_size();
//! let mut mapper = ScreenMapper::new(
//!     1200.0,
//!     720.0,
//!     f64::from(screen_width),
//!     f64::from(screen_height),
//!     0.1,
//!     settings.create_smoother()?,
//! )?;
//!
//! // Open webcam
//! let mut cap = videoio::VideoCapture::new(0, videoio::CAP_ANY)?;
//! let mut frame = Mat::default();
//!
//! loop {
//!     // Read frame
//!     if !cap.read(&mut frame)? {
//!         break;
//!     }
//!
//!     let Some(hand) = detector.detect(&frame)?.into_iter().next() else {
//!         continue;
//!     };
//!
//!     // Classify the gesture and act on it
//!     let touch = classifier.classify(&hand);
//!     match dispatcher.dispatch(touch, Instant::now()) {
//!         Some(GestureIntent::MovePointer) => {
//!             let pointer = fingertip_midpoint(&hand, Finger::Thumb, Finger::Index);
//!             let (x, y) = mapper.map_to_screen(f64::from(pointer.x), f64::from(pointer.y));
//!             mouse.move_to(x, y)?;
//!         }
//!         Some(GestureIntent::LeftClick) => mouse.left_click()?,
//!         Some(GestureIntent::RightClick) => mouse.right_click()?,
//!         Some(GestureIntent::Scroll) => mouse.scroll(0.5)?,
//!         None => {}
//!     }
//! }
//! # Ok(())
//! # }
//! ```

/// Hand landmark detection module backed by ONNX Runtime
pub mod hand_detection;

/// Touch gesture classification from fingertip distances
pub mod gesture;

/// Savitzky-Golay smoothing for pointer trajectories
pub mod smoothing;

/// Camera to screen coordinate mapping
pub mod mapping;

/// Gesture to pointer action dispatch with click cooldowns
pub mod dispatch;

/// Pointer control module for X11 systems
pub mod mouse_control;

/// Utility functions for coordinate conversions
pub mod utils;

/// Error types and result handling
pub mod error;

/// Main application module
pub mod app;

/// Constants used throughout the application
pub mod constants;

/// Configuration management
pub mod config;

pub use error::{Error, Result};
