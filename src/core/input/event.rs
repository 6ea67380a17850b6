//=========================================================================
// Input Event Types
//
// Engine-side representation of raw platform input.
//
// This module abstracts away platform-specific input (e.g. Winit) into a
// small, portable set of events that the InputDispatcher routes to the
// active state.
//
// Event Flow:
// ```text
// Platform Layer (Winit / headless / test harness)
//         ↓
//    InputEvent (this module)
//         ↓
//    InputDispatcher (capability check, Y inversion)
//         ↓
//    KeyListener / CursorListener of the active state
// ```
//
// Coordinates in `CursorMoved` are raw platform coordinates: origin at
// the top-left corner, Y pointing down.
//
//=========================================================================

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced.
/// `KeyA` is always the same physical key regardless of keyboard layout.
///
/// `Unidentified` is the fallback for keys the platform layer cannot
/// translate. Such keys are dropped before reaching any state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Printable Keys ---------------------------------------------------

    Space, Quote, Comma, Minus, Period, Slash,
    Semicolon, Equal, BracketLeft, Backslash, BracketRight, Backquote,

    /// Non-US keys (ISO extra key next to left shift, and the like).
    IntlBackslash, IntlRo,

    //--- Numeric Keys -----------------------------------------------------

    /// Number row: 0-9
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Editing & Navigation ---------------------------------------------

    Escape, Enter, Tab, Backspace, Insert, Delete,
    ArrowRight, ArrowLeft, ArrowDown, ArrowUp,
    PageUp, PageDown, Home, End,

    //--- Locks & System ---------------------------------------------------

    CapsLock, ScrollLock, NumLock, PrintScreen, Pause, ContextMenu,

    //--- Function Keys ----------------------------------------------------

    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
    F13, F14, F15, F16, F17, F18, F19, F20, F21, F22, F23, F24, F25,

    //--- Keypad -----------------------------------------------------------

    Numpad0, Numpad1, Numpad2, Numpad3, Numpad4,
    Numpad5, Numpad6, Numpad7, Numpad8, Numpad9,
    NumpadDecimal, NumpadDivide, NumpadMultiply, NumpadSubtract,
    NumpadAdd, NumpadEnter, NumpadEqual,

    //--- Modifiers --------------------------------------------------------

    ShiftLeft, ControlLeft, AltLeft, SuperLeft,
    ShiftRight, ControlRight, AltRight, SuperRight,

    //--- Fallback ---------------------------------------------------------

    /// Key not covered by the translation table.
    Unidentified,
}

impl KeyCode {
    /// Whether this key survived translation.
    pub fn is_identified(self) -> bool {
        self != Self::Unidentified
    }
}

//=== InputEvent ==========================================================

/// Raw input event delivered by the platform layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Key pressed down (repeats are filtered by the platform layer).
    KeyPressed(KeyCode),

    /// Key released.
    KeyReleased(KeyCode),

    /// Cursor moved, in platform coordinates (top-left origin, Y down).
    CursorMoved { x: i32, y: i32 },
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unidentified_is_the_only_unidentified_key() {
        assert!(!KeyCode::Unidentified.is_identified());
        assert!(KeyCode::KeyA.is_identified());
        assert!(KeyCode::F25.is_identified());
    }

    #[test]
    fn events_compare_by_payload() {
        assert_eq!(
            InputEvent::KeyPressed(KeyCode::Space),
            InputEvent::KeyPressed(KeyCode::Space)
        );
        assert_ne!(
            InputEvent::KeyPressed(KeyCode::Space),
            InputEvent::KeyReleased(KeyCode::Space)
        );
        assert_ne!(
            InputEvent::CursorMoved { x: 1, y: 2 },
            InputEvent::CursorMoved { x: 1, y: 3 }
        );
    }
}
