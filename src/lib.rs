//=========================================================================
// Tickstate Engine — Library Root
//
// A minimal 2D game engine core: a fixed-tick loop driving a finite
// state machine of game states, with capability-based input routing and
// a strict load → update/draw → unload resource lifecycle.
//
// Responsibilities:
// - Expose the loop driver (`Engine`, `EngineBuilder`)
// - Expose the state contract (`State`, `Transition`, listener traits)
// - Expose the platform boundary and its shipped backends
//
// Typical usage:
// ```no_run
// use tickstate_engine::{EngineBuilder, Settings};
// use tickstate_engine::platform::WinitWindowSystem;
//
// fn main() -> Result<(), tickstate_engine::EngineError> {
//     EngineBuilder::new()
//         .with_settings(Settings::load("settings.toml")?)
//         .build(WinitWindowSystem::new())
//         .start(Box::new(MyTitleState::default()))
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the platform-independent systems: clock, settings, the
// state machine contract, input routing and the platform bridge traits.
//
// `platform` holds the shipped backends (Winit desktop, headless).
//
pub mod core;
pub mod platform;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------

mod engine;
mod error;

//--- Public Exports ------------------------------------------------------

pub use crate::core::settings::{ConfigError, Settings, MAX_FPS};
pub use crate::core::state::{CursorListener, KeyListener, State, Transition};
pub use engine::{Engine, EngineBuilder};
pub use error::EngineError;
