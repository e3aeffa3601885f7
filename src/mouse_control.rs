//! Mouse control module for X11-based systems.
//!
//! Absolute pointer movement uses the core protocol's `WarpPointer`; clicks
//! and wheel scrolling are synthesized through the `XTEST` extension. Screen
//! dimensions are read once from the connection setup at startup.

use crate::{
    error::{AppError, Result},
    utils::safe_cast::f64_to_i16_clamp,
};
use log::{debug, info};
use x11rb::{
    connection::Connection,
    protocol::xproto::{ConnectionExt, Screen, BUTTON_PRESS_EVENT, BUTTON_RELEASE_EVENT},
    protocol::xtest::ConnectionExt as XTestConnectionExt,
    rust_connection::RustConnection,
};

/// X11 core protocol button codes
const BUTTON_LEFT: u8 = 1;
const BUTTON_RIGHT: u8 = 3;
const BUTTON_SCROLL_UP: u8 = 4;
const BUTTON_SCROLL_DOWN: u8 = 5;

/// Mouse control implementation for X11
pub struct MouseController {
    connection: RustConnection,
    screen: Screen,
    screen_width: u16,
    screen_height: u16,
    scroll_accumulator: f64,
}

impl MouseController {
    /// Create a new mouse controller
    ///
    /// # Errors
    ///
    /// Returns `MouseControl` if the X11 connection cannot be established or
    /// the screen setup is unavailable.
    pub fn new() -> Result<Self> {
        info!("Initializing X11 mouse controller");

        // Connect to X11 server
        let (connection, screen_num) = RustConnection::connect(None)
            .map_err(|e| AppError::MouseControl(format!("Failed to connect to X11: {e}")))?;

        // Get screen information
        let screen = connection
            .setup()
            .roots
            .get(screen_num)
            .ok_or_else(|| AppError::MouseControl("Failed to get screen".to_string()))?
            .clone();

        let screen_width = screen.width_in_pixels;
        let screen_height = screen.height_in_pixels;

        info!(
            "Connected to X11 display, screen: {}x{}",
            screen_width, screen_height
        );

        Ok(Self {
            connection,
            screen,
            screen_width,
            screen_height,
            scroll_accumulator: 0.0,
        })
    }

    /// Get current pointer position
    ///
    /// # Errors
    ///
    /// Returns `MouseControl` if the pointer query fails.
    pub fn get_position(&self) -> Result<(i16, i16)> {
        let reply = self
            .connection
            .query_pointer(self.screen.root)
            .map_err(|e| AppError::MouseControl(format!("Failed to send query pointer: {e}")))?
            .reply()
            .map_err(|e| AppError::MouseControl(format!("Failed to query pointer: {e}")))?;

        Ok((reply.root_x, reply.root_y))
    }

    /// Move the pointer to an absolute screen position
    ///
    /// Coordinates are clamped to the screen bounds before warping.
    ///
    /// # Errors
    ///
    /// Returns `MouseControl` if the warp request cannot be sent.
    pub fn move_to(&self, x: f64, y: f64) -> Result<()> {
        let max_x = i16::try_from(self.screen_width.saturating_sub(1)).unwrap_or(i16::MAX);
        let max_y = i16::try_from(self.screen_height.saturating_sub(1)).unwrap_or(i16::MAX);
        let x = f64_to_i16_clamp(x, 0, max_x);
        let y = f64_to_i16_clamp(y, 0, max_y);

        debug!("Moving pointer to ({}, {})", x, y);

        self.connection
            .warp_pointer(x11rb::NONE, self.screen.root, 0, 0, 0, 0, x, y)
            .map_err(|e| AppError::MouseControl(format!("Failed to warp pointer: {e}")))?;

        self.connection
            .flush()
            .map_err(|e| AppError::MouseControl(format!("Failed to flush connection: {e}")))?;

        Ok(())
    }

    /// Press and release the left mouse button
    ///
    /// # Errors
    ///
    /// Returns `MouseControl` if the synthetic button events fail.
    pub fn left_click(&self) -> Result<()> {
        debug!("Left click");
        self.click_button(BUTTON_LEFT)
    }

    /// Press and release the right mouse button
    ///
    /// # Errors
    ///
    /// Returns `MouseControl` if the synthetic button events fail.
    pub fn right_click(&self) -> Result<()> {
        debug!("Right click");
        self.click_button(BUTTON_RIGHT)
    }

    /// Scroll vertically by a possibly fractional wheel amount.
    ///
    /// X11 wheel events are whole notches (buttons 4 and 5), so fractional
    /// deltas accumulate across calls and a notch is emitted for each whole
    /// unit reached; the remainder carries over.
    ///
    /// # Errors
    ///
    /// Returns `MouseControl` if the synthetic button events fail.
    pub fn scroll(&mut self, delta: f64) -> Result<()> {
        let (notches, remainder) = drain_notches(self.scroll_accumulator + delta);
        self.scroll_accumulator = remainder;

        if notches != 0 {
            debug!("Scrolling {} notch(es)", notches);
        }
        let button = if notches > 0 {
            BUTTON_SCROLL_UP
        } else {
            BUTTON_SCROLL_DOWN
        };
        for _ in 0..notches.abs() {
            self.click_button(button)?;
        }
        Ok(())
    }

    /// Get screen dimensions
    #[must_use]
    pub const fn get_screen_size(&self) -> (u16, u16) {
        (self.screen_width, self.screen_height)
    }

    fn click_button(&self, button: u8) -> Result<()> {
        self.fake_button_event(BUTTON_PRESS_EVENT, button)?;
        self.fake_button_event(BUTTON_RELEASE_EVENT, button)?;
        self.connection
            .flush()
            .map_err(|e| AppError::MouseControl(format!("Failed to flush connection: {e}")))?;
        Ok(())
    }

    fn fake_button_event(&self, event_type: u8, button: u8) -> Result<()> {
        self.connection
            .xtest_fake_input(
                event_type,
                button,
                x11rb::CURRENT_TIME,
                self.screen.root,
                0,
                0,
                0,
            )
            .map_err(|e| AppError::MouseControl(format!("Failed to send button event: {e}")))?;
        Ok(())
    }
}

/// Split an accumulated scroll value into whole notches and a remainder
#[allow(clippy::cast_possible_truncation)] // Truncation after trunc() is exact
fn drain_notches(accumulated: f64) -> (i32, f64) {
    let whole = accumulated.trunc();
    (whole as i32, accumulated - whole)
}
