//! Gesture-to-action dispatch.
//!
//! One decision per frame, by fixed priority: no touch moves the pointer, a
//! lone index pinch left-clicks, a lone middle pinch right-clicks, any
//! combination involving the ring finger scrolls, and index+middle together
//! is deliberately unrecognized. Click kinds are debounced with non-blocking
//! cooldowns so movement frames keep flowing while a click is on hold.

use crate::gesture::TouchState;
use std::time::{Duration, Instant};

/// Discrete intent selected by the gesture priority chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureIntent {
    /// Track the hand: move the pointer to the mapped fingertip midpoint
    MovePointer,
    /// Single left click
    LeftClick,
    /// Single right click
    RightClick,
    /// Scroll; direction is decided from the mapped pointer height
    Scroll,
}

/// Concrete pointer action after coordinate mapping
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerAction {
    /// Absolute pointer move in screen pixels
    MoveTo {
        /// Target x in screen pixels
        x: f64,
        /// Target y in screen pixels
        y: f64,
    },
    /// Press and release the left button
    LeftClick,
    /// Press and release the right button
    RightClick,
    /// Vertical scroll in wheel units, positive scrolls up
    Scroll {
        /// Signed scroll amount
        delta: f64,
    },
}

/// Turns per-frame touch states into debounced pointer intents
pub struct GestureDispatcher {
    click_cooldown: Duration,
    right_click_cooldown: Duration,
    scroll_step: f64,
    last_left_click: Option<Instant>,
    last_right_click: Option<Instant>,
}

impl GestureDispatcher {
    /// Create a dispatcher with the given click cooldowns and scroll step
    #[must_use]
    pub const fn new(
        click_cooldown: Duration,
        right_click_cooldown: Duration,
        scroll_step: f64,
    ) -> Self {
        Self {
            click_cooldown,
            right_click_cooldown,
            scroll_step,
            last_left_click: None,
            last_right_click: None,
        }
    }

    /// Priority decision without cooldown effects.
    ///
    /// Returns `None` for the index+middle combination, which stays
    /// unrecognized rather than guessing at a composite gesture.
    #[must_use]
    pub fn interpret(touch: TouchState) -> Option<GestureIntent> {
        if !touch.any() {
            Some(GestureIntent::MovePointer)
        } else if touch.index && !(touch.middle || touch.ring) {
            Some(GestureIntent::LeftClick)
        } else if touch.middle && !(touch.index || touch.ring) {
            Some(GestureIntent::RightClick)
        } else if touch.ring {
            Some(GestureIntent::Scroll)
        } else {
            None
        }
    }

    /// Cooldown-gated dispatch for the frame at `now`.
    ///
    /// A click intent inside its cooldown window yields `None` for this
    /// frame — it does not fall through to a lower-priority intent. A
    /// sustained pinch therefore re-fires once per cooldown interval.
    pub fn dispatch(&mut self, touch: TouchState, now: Instant) -> Option<GestureIntent> {
        let intent = Self::interpret(touch)?;

        match intent {
            GestureIntent::LeftClick => {
                if !cooldown_elapsed(self.last_left_click, self.click_cooldown, now) {
                    return None;
                }
                self.last_left_click = Some(now);
            }
            GestureIntent::RightClick => {
                if !cooldown_elapsed(self.last_right_click, self.right_click_cooldown, now) {
                    return None;
                }
                self.last_right_click = Some(now);
            }
            GestureIntent::MovePointer | GestureIntent::Scroll => {}
        }

        Some(intent)
    }

    /// Signed scroll amount for a mapped pointer height: strictly below the
    /// screen midline scrolls down (negative), otherwise up (positive).
    #[must_use]
    pub fn scroll_delta(&self, pointer_y: f64, screen_height: f64) -> f64 {
        if pointer_y > screen_height / 2.0 {
            -self.scroll_step
        } else {
            self.scroll_step
        }
    }
}

fn cooldown_elapsed(last: Option<Instant>, cooldown: Duration, now: Instant) -> bool {
    last.map_or(true, |fired| now.duration_since(fired) >= cooldown)
}
