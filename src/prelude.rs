//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use tickstate_engine::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Engine core
pub use crate::engine::{Engine, EngineBuilder};
pub use crate::error::EngineError;
pub use crate::core::settings::Settings;
pub use crate::core::clock::Tick;

// State machine
pub use crate::core::state::{CursorListener, KeyListener, State, Transition};

// Input system
pub use crate::core::input::{InputEvent, KeyCode};

// Platform boundary
pub use crate::core::platform_bridge::{Graphics, ImageHandle, ResourceError, ResourceLoader};
