//=========================================================================
// Input Processor
//=========================================================================
//
// Converts platform-specific Winit events into engine InputEvents.
//
// Architecture:
//   Winit Events → InputProcessor → InputEvent (engine type) → InputDispatcher
//
// Key repeats are filtered (only press and release reach states), and
// keys outside the translation table are dropped (returns None).
// Cursor positions are expected in logical pixels.
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, KeyEvent},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{InputEvent, KeyCode};

//=== InputProcessor ======================================================

/// Converts Winit events to engine InputEvents.
pub(crate) struct InputProcessor;

impl InputProcessor {
    //--- Construction -----------------------------------------------------

    pub(crate) fn new() -> Self {
        Self
    }

    //--- Event Processing -------------------------------------------------

    /// Converts a Winit KeyEvent to an InputEvent (filters repeats and
    /// unmapped keys).
    pub(crate) fn process_key_event(&self, key_event: &KeyEvent) -> Option<InputEvent> {
        if key_event.repeat {
            return None;
        }

        self.process_key(key_event.physical_key, key_event.state)
    }

    /// Converts a physical key transition to an InputEvent.
    pub(crate) fn process_key(&self, key: PhysicalKey, state: ElementState) -> Option<InputEvent> {
        let key_code = match key {
            PhysicalKey::Code(code) => KeyCode::from(code),
            _ => return None,
        };

        if !key_code.is_identified() {
            return None;
        }

        Some(self.create_key_input_event(key_code, state))
    }

    /// Creates a cursor move event (logical pixels, top-left origin).
    ///
    /// Fractional positions are truncated toward negative infinity.
    pub(crate) fn process_cursor_move(&self, x: f64, y: f64) -> InputEvent {
        InputEvent::CursorMoved {
            x: x.floor() as i32,
            y: y.floor() as i32,
        }
    }

    //--- Internal Helpers -------------------------------------------------

    fn create_key_input_event(&self, key: KeyCode, state: ElementState) -> InputEvent {
        match state {
            ElementState::Pressed => InputEvent::KeyPressed(key),
            ElementState::Released => InputEvent::KeyReleased(key),
        }
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

/// Converts Winit physical key codes to engine key codes.
///
/// Keys without an engine counterpart (media keys, F26+, IME keys, ...)
/// return `KeyCode::Unidentified`.
impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode as W;
        match code {
            //--- Printable ----------------------------------------------------

            W::Space => KeyCode::Space,
            W::Quote => KeyCode::Quote,
            W::Comma => KeyCode::Comma,
            W::Minus => KeyCode::Minus,
            W::Period => KeyCode::Period,
            W::Slash => KeyCode::Slash,
            W::Semicolon => KeyCode::Semicolon,
            W::Equal => KeyCode::Equal,
            W::BracketLeft => KeyCode::BracketLeft,
            W::Backslash => KeyCode::Backslash,
            W::BracketRight => KeyCode::BracketRight,
            W::Backquote => KeyCode::Backquote,
            W::IntlBackslash => KeyCode::IntlBackslash,
            W::IntlRo => KeyCode::IntlRo,

            //--- Digits -------------------------------------------------------

            W::Digit0 => KeyCode::Digit0,
            W::Digit1 => KeyCode::Digit1,
            W::Digit2 => KeyCode::Digit2,
            W::Digit3 => KeyCode::Digit3,
            W::Digit4 => KeyCode::Digit4,
            W::Digit5 => KeyCode::Digit5,
            W::Digit6 => KeyCode::Digit6,
            W::Digit7 => KeyCode::Digit7,
            W::Digit8 => KeyCode::Digit8,
            W::Digit9 => KeyCode::Digit9,

            //--- Letters ------------------------------------------------------

            W::KeyA => KeyCode::KeyA,
            W::KeyB => KeyCode::KeyB,
            W::KeyC => KeyCode::KeyC,
            W::KeyD => KeyCode::KeyD,
            W::KeyE => KeyCode::KeyE,
            W::KeyF => KeyCode::KeyF,
            W::KeyG => KeyCode::KeyG,
            W::KeyH => KeyCode::KeyH,
            W::KeyI => KeyCode::KeyI,
            W::KeyJ => KeyCode::KeyJ,
            W::KeyK => KeyCode::KeyK,
            W::KeyL => KeyCode::KeyL,
            W::KeyM => KeyCode::KeyM,
            W::KeyN => KeyCode::KeyN,
            W::KeyO => KeyCode::KeyO,
            W::KeyP => KeyCode::KeyP,
            W::KeyQ => KeyCode::KeyQ,
            W::KeyR => KeyCode::KeyR,
            W::KeyS => KeyCode::KeyS,
            W::KeyT => KeyCode::KeyT,
            W::KeyU => KeyCode::KeyU,
            W::KeyV => KeyCode::KeyV,
            W::KeyW => KeyCode::KeyW,
            W::KeyX => KeyCode::KeyX,
            W::KeyY => KeyCode::KeyY,
            W::KeyZ => KeyCode::KeyZ,

            //--- Editing & Navigation -----------------------------------------

            W::Escape => KeyCode::Escape,
            W::Enter => KeyCode::Enter,
            W::Tab => KeyCode::Tab,
            W::Backspace => KeyCode::Backspace,
            W::Insert => KeyCode::Insert,
            W::Delete => KeyCode::Delete,
            W::ArrowRight => KeyCode::ArrowRight,
            W::ArrowLeft => KeyCode::ArrowLeft,
            W::ArrowDown => KeyCode::ArrowDown,
            W::ArrowUp => KeyCode::ArrowUp,
            W::PageUp => KeyCode::PageUp,
            W::PageDown => KeyCode::PageDown,
            W::Home => KeyCode::Home,
            W::End => KeyCode::End,

            //--- Locks & System -----------------------------------------------

            W::CapsLock => KeyCode::CapsLock,
            W::ScrollLock => KeyCode::ScrollLock,
            W::NumLock => KeyCode::NumLock,
            W::PrintScreen => KeyCode::PrintScreen,
            W::Pause => KeyCode::Pause,
            W::ContextMenu => KeyCode::ContextMenu,

            //--- Function Keys ------------------------------------------------

            W::F1 => KeyCode::F1,
            W::F2 => KeyCode::F2,
            W::F3 => KeyCode::F3,
            W::F4 => KeyCode::F4,
            W::F5 => KeyCode::F5,
            W::F6 => KeyCode::F6,
            W::F7 => KeyCode::F7,
            W::F8 => KeyCode::F8,
            W::F9 => KeyCode::F9,
            W::F10 => KeyCode::F10,
            W::F11 => KeyCode::F11,
            W::F12 => KeyCode::F12,
            W::F13 => KeyCode::F13,
            W::F14 => KeyCode::F14,
            W::F15 => KeyCode::F15,
            W::F16 => KeyCode::F16,
            W::F17 => KeyCode::F17,
            W::F18 => KeyCode::F18,
            W::F19 => KeyCode::F19,
            W::F20 => KeyCode::F20,
            W::F21 => KeyCode::F21,
            W::F22 => KeyCode::F22,
            W::F23 => KeyCode::F23,
            W::F24 => KeyCode::F24,
            W::F25 => KeyCode::F25,

            //--- Keypad -------------------------------------------------------

            W::Numpad0 => KeyCode::Numpad0,
            W::Numpad1 => KeyCode::Numpad1,
            W::Numpad2 => KeyCode::Numpad2,
            W::Numpad3 => KeyCode::Numpad3,
            W::Numpad4 => KeyCode::Numpad4,
            W::Numpad5 => KeyCode::Numpad5,
            W::Numpad6 => KeyCode::Numpad6,
            W::Numpad7 => KeyCode::Numpad7,
            W::Numpad8 => KeyCode::Numpad8,
            W::Numpad9 => KeyCode::Numpad9,
            W::NumpadDecimal => KeyCode::NumpadDecimal,
            W::NumpadDivide => KeyCode::NumpadDivide,
            W::NumpadMultiply => KeyCode::NumpadMultiply,
            W::NumpadSubtract => KeyCode::NumpadSubtract,
            W::NumpadAdd => KeyCode::NumpadAdd,
            W::NumpadEnter => KeyCode::NumpadEnter,
            W::NumpadEqual => KeyCode::NumpadEqual,

            //--- Modifiers ----------------------------------------------------

            W::ShiftLeft => KeyCode::ShiftLeft,
            W::ControlLeft => KeyCode::ControlLeft,
            W::AltLeft => KeyCode::AltLeft,
            W::SuperLeft => KeyCode::SuperLeft,
            W::ShiftRight => KeyCode::ShiftRight,
            W::ControlRight => KeyCode::ControlRight,
            W::AltRight => KeyCode::AltRight,
            W::SuperRight => KeyCode::SuperRight,

            //--- Unmapped (return Unidentified) -------------------------------

            _ => KeyCode::Unidentified,
        }
    }
}

//=========================================================================
// Tests
//=========================================================================
