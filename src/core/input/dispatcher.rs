//=========================================================================
// Input Dispatcher
//=========================================================================
//
// Routes raw platform input to the active state, if and only if that
// state exposes the matching listener capability.
//
// Architecture:
//   Window callback → InputDispatcher → StateSlot (re-read per event)
//                                          ↓
//                          as_key_listener() / as_cursor_listener()
//                                          ↓
//                                   forwarded or dropped
//
// Cursor Y is flipped against the viewport height: the platform reports
// top-left origin with Y down, the engine draws bottom-left origin Y up.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::trace;

//=== Internal Dependencies ===============================================

use super::event::{InputEvent, KeyCode};
use crate::core::state::StateSlot;

//=== InputDispatcher =====================================================

/// Adapter between platform input callbacks and the active state.
///
/// Cheap to clone; every clone observes the same slot. Never caches the
/// state, so events arriving mid-transition are dropped rather than
/// delivered to an unloaded state.
#[derive(Clone)]
pub struct InputDispatcher {
    slot: StateSlot,
    viewport_height: i32,
}

impl InputDispatcher {
    //--- Construction -----------------------------------------------------

    /// Creates a dispatcher reading from `slot`, inverting cursor Y
    /// against `viewport_height`.
    pub fn new(slot: StateSlot, viewport_height: i32) -> Self {
        Self {
            slot,
            viewport_height,
        }
    }

    //--- Dispatch ---------------------------------------------------------

    /// Routes one raw event. Returns `true` if a listener received it.
    pub fn dispatch(&self, event: InputEvent) -> bool {
        match event {
            InputEvent::KeyPressed(key) => self.key_pressed(key),
            InputEvent::KeyReleased(key) => self.key_released(key),
            InputEvent::CursorMoved { x, y } => self.cursor_moved(x, y),
        }
    }

    /// Forwards a key press to the active key listener.
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        let forwarded = self
            .slot
            .with_current(|state| match state.as_key_listener() {
                Some(listener) => {
                    listener.key_pressed(key);
                    true
                }
                None => false,
            })
            .unwrap_or(false);

        trace!(target: "input", "Key pressed {:?} (forwarded: {})", key, forwarded);
        forwarded
    }

    /// Forwards a key release to the active key listener.
    pub fn key_released(&self, key: KeyCode) -> bool {
        let forwarded = self
            .slot
            .with_current(|state| match state.as_key_listener() {
                Some(listener) => {
                    listener.key_released(key);
                    true
                }
                None => false,
            })
            .unwrap_or(false);

        trace!(target: "input", "Key released {:?} (forwarded: {})", key, forwarded);
        forwarded
    }

    /// Forwards a cursor move, in platform coordinates, to the active
    /// cursor listener after flipping the Y axis.
    pub fn cursor_moved(&self, x: i32, y: i32) -> bool {
        let y = self.invert_y(y);
        let forwarded = self
            .slot
            .with_current(|state| match state.as_cursor_listener() {
                Some(listener) => {
                    listener.cursor_moved(x, y);
                    true
                }
                None => false,
            })
            .unwrap_or(false);

        trace!(target: "input", "Cursor moved to ({}, {}) (forwarded: {})", x, y, forwarded);
        forwarded
    }

    //--- Coordinates ------------------------------------------------------

    /// Converts a platform Y coordinate to the engine's Y-up convention.
    pub fn invert_y(&self, y: i32) -> i32 {
        self.viewport_height.saturating_sub(y)
    }

    /// Height the cursor Y axis is inverted against.
    pub fn viewport_height(&self) -> i32 {
        self.viewport_height
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
