//=========================================================================
// State System
//=========================================================================
//
// Defines the unit of application behavior driven by the game loop.
//
// Architecture:
//   Engine
//     └─ StateSlot: Option<Box<dyn State>>  (shared with InputDispatcher)
//
// Lifecycle (enforced by the engine, never by the state):
//   load() → { update() → draw() }* → unload()
//
// Optional capabilities (key / cursor listening) are exposed through
// explicit queries on the trait, so the dispatcher never needs runtime
// type inspection.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::time::Duration;

//=== Internal Dependencies ===============================================

use crate::core::input::KeyCode;
use crate::core::platform_bridge::{Graphics, ResourceError, ResourceLoader};

//=== Module Declarations =================================================

mod slot;

//=== Public API ==========================================================

pub use slot::StateSlot;

//=== Transition ==========================================================

/// Outcome of a state's update step.
///
/// Produced exactly once per tick by the active state.
pub enum Transition {
    /// Keep running the current state. No load/unload happens.
    Continue,

    /// Hand control to a new state instance.
    ///
    /// The current state is unloaded before `next` is loaded. Because the
    /// engine owns the current state, `next` is always a distinct instance,
    /// even if it is structurally identical.
    Switch(Box<dyn State>),

    /// Stop the loop. The current state is unloaded and no further ticks
    /// are issued.
    Terminate,
}

impl Transition {
    /// Convenience constructor for [`Transition::Switch`].
    pub fn switch(next: impl State + 'static) -> Self {
        Self::Switch(Box::new(next))
    }

    /// Returns `true` for [`Transition::Terminate`].
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Terminate)
    }
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Continue => f.write_str("Continue"),
            Self::Switch(next) => write!(f, "Switch({})", next.name()),
            Self::Terminate => f.write_str("Terminate"),
        }
    }
}

//=== Listener Capabilities ===============================================

/// Optional capability: receives key presses and releases.
pub trait KeyListener {
    /// Called once per key press, with the translated key.
    fn key_pressed(&mut self, key: KeyCode);

    /// Called once per key release, with the translated key.
    fn key_released(&mut self, key: KeyCode);
}

/// Optional capability: receives cursor movement.
///
/// Coordinates are in viewport space with the origin at the bottom-left
/// corner and Y pointing up.
pub trait CursorListener {
    fn cursor_moved(&mut self, x: i32, y: i32);
}

//=== State Trait =========================================================

/// A unit of application behavior in the game loop's state machine.
///
/// The engine guarantees, for every instance it is given:
///
/// - `load` is called at most once, before any `update` or `draw`
/// - `unload` is called at most once, and only after `load` succeeded
/// - no method (including input callbacks) is called after `unload`
///
/// Implementations therefore need no guards against repeated calls, but
/// must release in `unload` every resource acquired in `load`.
///
/// # Minimal Implementation
///
/// ```rust
/// use std::time::Duration;
/// use tickstate_engine::prelude::*;
///
/// struct Splash {
///     logo: Option<ImageHandle>,
///     shown_for: Duration,
/// }
///
/// impl State for Splash {
///     fn load(&mut self, loader: &mut dyn ResourceLoader) -> Result<(), ResourceError> {
///         self.logo = Some(loader.load_image("assets/logo.png".as_ref())?);
///         Ok(())
///     }
///
///     fn update(&mut self, delta: Duration) -> Transition {
///         self.shown_for += delta;
///         if self.shown_for > Duration::from_secs(2) {
///             Transition::Terminate
///         } else {
///             Transition::Continue
///         }
///     }
///
///     fn draw(&mut self, graphics: &mut dyn Graphics) {
///         if let Some(logo) = &self.logo {
///             graphics.draw_image(logo, 0, 0);
///         }
///     }
///
///     fn unload(&mut self, loader: &mut dyn ResourceLoader) {
///         if let Some(logo) = self.logo.take() {
///             loader.unload_image(logo);
///         }
///     }
/// }
/// ```
pub trait State: Send {
    /// Acquires the state's resources. Called when the state becomes active.
    ///
    /// A failure is fatal to the run: the engine stops without calling
    /// `unload` on this instance.
    fn load(&mut self, loader: &mut dyn ResourceLoader) -> Result<(), ResourceError>;

    /// Advances the state by the measured time since the previous tick.
    ///
    /// The returned transition is the only effect visible to the engine.
    fn update(&mut self, delta: Duration) -> Transition;

    /// Draws the state into the current frame. May be a no-op.
    fn draw(&mut self, graphics: &mut dyn Graphics);

    /// Releases every resource acquired in `load`.
    fn unload(&mut self, loader: &mut dyn ResourceLoader);

    /// Key-listener capability query. Default: not a key listener.
    fn as_key_listener(&mut self) -> Option<&mut dyn KeyListener> {
        None
    }

    /// Cursor-listener capability query. Default: not a cursor listener.
    fn as_cursor_listener(&mut self) -> Option<&mut dyn CursorListener> {
        None
    }

    /// Human-readable name used in log output.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
