//=========================================================================
// Core Systems
//
// Platform-independent building blocks of the game loop.
//
// Responsibilities:
// - Produce fixed-cadence ticks (`clock`)
// - Define the state contract and its shared slot (`state`)
// - Route raw input to the active state (`input`)
// - Describe the window / resource / graphics boundary (`platform_bridge`)
// - Hold the configuration surface (`settings`)
//
// Notes:
// The loop driver itself lives in `crate::engine`; everything here is
// owned or borrowed by it for the duration of `Engine::start`.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod clock;
pub mod input;
pub mod platform_bridge;
pub mod settings;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

//=== Public API ==========================================================

pub use clock::{Tick, Ticker};
pub use input::{InputDispatcher, InputEvent, KeyCode};
pub use platform_bridge::{
    Graphics, ImageHandle, PlatformError, ResourceError, ResourceLoader, Window, WindowSystem,
};
pub use settings::{ConfigError, Settings, MAX_FPS};
pub use state::{CursorListener, KeyListener, State, StateSlot, Transition};
