//! Main application module wiring the capture and gesture pipeline together.

use crate::{
    config::Config,
    constants::{FINGERTIP_MARKER_RADIUS, LANDMARK_DOT_RADIUS, MAX_CONSECUTIVE_READ_FAILURES},
    dispatch::{GestureDispatcher, GestureIntent, PointerAction},
    error::{Error, Result},
    gesture::{fingertip_midpoint, Finger, GestureClassifier, TouchState},
    hand_detection::{landmark_index, HandDetector, HandLandmarks},
    mapping::ScreenMapper,
    mouse_control::MouseController,
    utils::landmark_to_pixel,
};
use log::{debug, info, warn};
use opencv::{
    core::{Mat, Point, Scalar},
    highgui::{self, WINDOW_NORMAL},
    imgproc::{self, FONT_HERSHEY_SIMPLEX, LINE_8},
    prelude::*,
    videoio::{
        self, VideoCapture, CAP_PROP_BUFFERSIZE, CAP_PROP_FRAME_HEIGHT, CAP_PROP_FRAME_WIDTH,
    },
};
use std::time::{Duration, Instant};

/// Screen size assumed when no display connection is available
const FALLBACK_SCREEN_SIZE: (u16, u16) = (1920, 1080);

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Validated application settings
    pub settings: Config,
    /// Drive the real pointer (disable for dry runs)
    pub control_mouse: bool,
}

/// Main application struct
pub struct HandPointerApp {
    config: AppConfig,
    detector: HandDetector,
    classifier: GestureClassifier,
    mapper: ScreenMapper,
    dispatcher: GestureDispatcher,
    mouse: Option<MouseController>,
    video_capture: VideoCapture,
}

impl HandPointerApp {
    /// Create a new finger pointer application
    ///
    /// Opens the camera, loads the landmark model and connects to the
    /// display server when pointer control is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the camera cannot be opened, the model fails to
    /// load, or the GUI window cannot be created.
    pub fn new(config: AppConfig) -> Result<Self> {
        info!("Initializing finger pointer application");

        let settings = &config.settings;

        info!("Opening camera {}", settings.camera.index);
        let mut video_capture = VideoCapture::new(settings.camera.index, videoio::CAP_ANY)?;
        video_capture.set(CAP_PROP_FRAME_WIDTH, f64::from(settings.camera.width))?;
        video_capture.set(CAP_PROP_FRAME_HEIGHT, f64::from(settings.camera.height))?;

        // Reduce buffer size for lower latency
        video_capture.set(CAP_PROP_BUFFERSIZE, 1.0)?;

        // The driver may not honor the requested resolution, so take the
        // working frame size from an actual capture.
        let mut probe_frame = Mat::default();
        if !video_capture.read(&mut probe_frame)? || probe_frame.empty() {
            return Err(Error::Camera(format!(
                "Camera {} produced no frames",
                settings.camera.index
            )));
        }
        let frame_width = probe_frame.cols();
        let frame_height = probe_frame.rows();
        info!("Capturing at {}x{}", frame_width, frame_height);

        let detector =
            HandDetector::new(&settings.detection.model, settings.detection.min_confidence)?;
        let classifier = GestureClassifier::new();

        let mouse = if config.control_mouse {
            match MouseController::new() {
                Ok(controller) => {
                    info!("X11 pointer control initialized");
                    Some(controller)
                }
                Err(e) => {
                    warn!("Failed to initialize pointer control: {}", e);
                    None
                }
            }
        } else {
            info!("Pointer control disabled, actions will only be logged");
            None
        };

        let (screen_width, screen_height) = match &mouse {
            Some(controller) => controller.get_screen_size(),
            None => FALLBACK_SCREEN_SIZE,
        };
        info!("Mapping onto a {}x{} screen", screen_width, screen_height);

        let smoother = settings.create_smoother()?;
        let mapper = ScreenMapper::new(
            f64::from(frame_width),
            f64::from(frame_height),
            f64::from(screen_width),
            f64::from(screen_height),
            settings.mapping.edge_expansion,
            smoother,
        )?;
        let dispatcher = settings.create_dispatcher();

        if settings.display.gui {
            highgui::named_window(&settings.display.window_name, WINDOW_NORMAL)?;
        }

        Ok(Self {
            config,
            detector,
            classifier,
            mapper,
            dispatcher,
            mouse,
            video_capture,
        })
    }

    /// Run the main application loop
    ///
    /// # Errors
    ///
    /// Returns an error if the camera stops delivering frames or a pointer
    /// action fails.
    pub fn run(&mut self) -> Result<()> {
        info!("Starting main loop");

        let mut frame_count = 0u32;
        let start_time = Instant::now();
        let mut last_fps_update = Instant::now();
        let mut fps = 0.0;
        let mut consecutive_failures = 0u32;

        loop {
            // Read frame from the camera
            let mut frame = Mat::default();
            if !self.video_capture.read(&mut frame)? || frame.empty() {
                consecutive_failures += 1;
                if consecutive_failures >= MAX_CONSECUTIVE_READ_FAILURES {
                    return Err(Error::Camera(format!(
                        "Camera stopped delivering frames after {} attempts",
                        consecutive_failures
                    )));
                }
                warn!("Failed to read frame, retrying...");
                continue;
            }
            consecutive_failures = 0;

            // Process frame
            let result = self.process_frame(&frame)?;

            if let Some(action) = result.action {
                self.execute_action(action)?;
            }

            // Update FPS counter
            frame_count += 1;
            if last_fps_update.elapsed() >= Duration::from_secs(1) {
                fps = f64::from(frame_count) / start_time.elapsed().as_secs_f64();
                last_fps_update = Instant::now();
            }

            // Display results
            if self.config.settings.display.gui {
                self.display_results(&frame, &result, fps)?;

                // Check for exit
                let key = highgui::wait_key(1)?;
                if key == 27 || key == b'q' as i32 {
                    info!("Exit requested by user");
                    break;
                }
            }
        }

        info!("Application shutting down");
        Ok(())
    }

    /// Process a single frame
    fn process_frame(&mut self, frame: &Mat) -> Result<ProcessingResult> {
        let hands = self.detector.detect(frame)?;

        let Some(hand) = hands.into_iter().next() else {
            return Ok(ProcessingResult::default());
        };

        let touch = self.classifier.classify(&hand);
        let intent = self.dispatcher.dispatch(touch, Instant::now());

        // The tracked point enters the pointer history only while a movement
        // mode gesture is held, so clicks do not perturb the trajectory.
        let mut pointer = None;
        let action = match intent {
            Some(GestureIntent::MovePointer) => {
                let (x, y) = self.map_pointer_position(&hand);
                pointer = Some((x, y));
                Some(PointerAction::MoveTo { x, y })
            }
            Some(GestureIntent::Scroll) => {
                let (x, y) = self.map_pointer_position(&hand);
                let delta = self.dispatcher.scroll_delta(y, self.mapper.screen_height());
                pointer = Some((x, y));
                Some(PointerAction::Scroll { delta })
            }
            Some(GestureIntent::LeftClick) => Some(PointerAction::LeftClick),
            Some(GestureIntent::RightClick) => Some(PointerAction::RightClick),
            None => None,
        };

        Ok(ProcessingResult {
            hand: Some(hand),
            touch: Some(touch),
            pointer,
            action,
        })
    }

    /// Map the pointer position, the midpoint between the thumb and index
    /// tips, into smoothed screen coordinates
    fn map_pointer_position(&mut self, hand: &HandLandmarks) -> (f64, f64) {
        let pointer = fingertip_midpoint(hand, Finger::Thumb, Finger::Index);
        self.mapper
            .map_to_screen(f64::from(pointer.x), f64::from(pointer.y))
    }

    /// Forward an action to the pointer controller if one is connected
    fn execute_action(&mut self, action: PointerAction) -> Result<()> {
        debug!("Pointer action: {:?}", action);

        match &mut self.mouse {
            Some(mouse) => match action {
                PointerAction::MoveTo { x, y } => mouse.move_to(x, y),
                PointerAction::LeftClick => mouse.left_click(),
                PointerAction::RightClick => mouse.right_click(),
                PointerAction::Scroll { delta } => mouse.scroll(delta),
            },
            None => Ok(()),
        }
    }

    /// Display results in the GUI window
    fn display_results(&self, frame: &Mat, result: &ProcessingResult, fps: f64) -> Result<()> {
        let mut display_frame = frame.clone();
        let cols = display_frame.cols();
        let rows = display_frame.rows();

        if let Some(hand) = &result.hand {
            if self.config.settings.display.draw_landmarks {
                for landmark in hand.points() {
                    imgproc::circle(
                        &mut display_frame,
                        landmark_to_pixel(*landmark, cols, rows),
                        LANDMARK_DOT_RADIUS,
                        Scalar::new(0.0, 255.0, 0.0, 0.0),
                        -1,
                        LINE_8,
                        0,
                    )?;
                }
            }

            // Thumb and index markers with a connecting segment show how
            // close the pinch is to firing.
            let thumb = landmark_to_pixel(hand.point(landmark_index::THUMB_TIP), cols, rows);
            let index =
                landmark_to_pixel(hand.point(landmark_index::INDEX_FINGER_TIP), cols, rows);
            let line_color = match result.touch {
                Some(touch) if touch.any() => Scalar::new(0.0, 0.0, 255.0, 0.0),
                _ => Scalar::new(255.0, 0.0, 255.0, 0.0),
            };

            imgproc::circle(
                &mut display_frame,
                thumb,
                FINGERTIP_MARKER_RADIUS,
                Scalar::new(0.0, 255.0, 255.0, 0.0),
                2,
                LINE_8,
                0,
            )?;
            imgproc::circle(
                &mut display_frame,
                index,
                FINGERTIP_MARKER_RADIUS,
                Scalar::new(0.0, 255.0, 255.0, 0.0),
                2,
                LINE_8,
                0,
            )?;
            imgproc::line(&mut display_frame, thumb, index, line_color, 2, LINE_8, 0)?;

            // Filled dot at the tracked pointer position between the tips
            let pointer = landmark_to_pixel(
                fingertip_midpoint(hand, Finger::Thumb, Finger::Index),
                cols,
                rows,
            );
            imgproc::circle(
                &mut display_frame,
                pointer,
                FINGERTIP_MARKER_RADIUS,
                line_color,
                -1,
                LINE_8,
                0,
            )?;
        }

        // Draw the action taken on this frame
        if let Some(action) = &result.action {
            let label = match action {
                PointerAction::MoveTo { .. } => "MOVE",
                PointerAction::LeftClick => "LEFT CLICK",
                PointerAction::RightClick => "RIGHT CLICK",
                PointerAction::Scroll { delta } if *delta < 0.0 => "SCROLL DOWN",
                PointerAction::Scroll { .. } => "SCROLL UP",
            };
            imgproc::put_text(
                &mut display_frame,
                label,
                Point::new(10, 60),
                FONT_HERSHEY_SIMPLEX,
                1.0,
                Scalar::new(0.0, 0.0, 255.0, 0.0),
                2,
                LINE_8,
                false,
            )?;
        }

        // Mapped screen position readout while a movement gesture is held
        if let Some((x, y)) = result.pointer {
            let pointer_text = format!("({:.0}, {:.0})", x, y);
            imgproc::put_text(
                &mut display_frame,
                &pointer_text,
                Point::new(10, 90),
                FONT_HERSHEY_SIMPLEX,
                0.8,
                Scalar::new(255.0, 255.0, 0.0, 0.0),
                2,
                LINE_8,
                false,
            )?;
        }

        // Draw FPS
        let fps_text = format!("FPS: {:.1}", fps);
        imgproc::put_text(
            &mut display_frame,
            &fps_text,
            Point::new(10, 30),
            FONT_HERSHEY_SIMPLEX,
            1.0,
            Scalar::new(0.0, 255.0, 0.0, 0.0),
            2,
            LINE_8,
            false,
        )?;

        highgui::imshow(&self.config.settings.display.window_name, &display_frame)?;

        Ok(())
    }
}

/// Result of processing a single frame
#[derive(Debug, Default)]
pub struct ProcessingResult {
    /// First hand found in the frame, if any
    pub hand: Option<HandLandmarks>,
    /// Touch state classified from that hand
    pub touch: Option<TouchState>,
    /// Smoothed screen coordinates, present while a movement gesture is held
    pub pointer: Option<(f64, f64)>,
    /// Action fired this frame after cooldown gating
    pub action: Option<PointerAction>,
}
