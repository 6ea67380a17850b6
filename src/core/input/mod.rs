//=========================================================================
// Input
//
// Engine-side input model and routing.
//
// Responsibilities:
// - Represent raw key / cursor input in a platform-independent way
// - Route each event to the active state's listener capability, if any
//
// Notes:
// Key-code translation tables live in the platform layer. This module
// only sees already-translated `KeyCode`s.
//
//=========================================================================

//=== Submodules ==========================================================

mod dispatcher;
pub mod event;

//=== Public API ==========================================================

pub use dispatcher::InputDispatcher;
pub use event::{InputEvent, KeyCode};
