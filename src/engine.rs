//=========================================================================
// Tickstate Engine
//
// Loop driver: runs the state machine at a fixed cadence and enforces
// the resource-lifecycle ordering of its states.
//
// Architecture:
// ```text
//     EngineBuilder  ──build()──>  Engine  ──start(initial)──>  [Session]
//         │                                                       │
//         ├─ with_fps()                          window (scoped) ─┤
//         ├─ with_size()                         loader ──────────┤
//         ├─ with_title()                        ticker ──────────┤
//         └─ with_settings()                     StateSlot ◄──────┴── InputDispatcher
// ```
//
// Per tick:
//   close requested? → unload, stop, exit
//   wait tick → update(delta) → resolve transition → draw → present/poll
//
//=========================================================================

//=== External Dependencies ===============================================

use std::ops::{Deref, DerefMut};

use log::{debug, error, info, trace};

//=== Internal Dependencies ===============================================

use crate::core::clock::{Tick, Ticker};
use crate::core::input::InputDispatcher;
use crate::core::platform_bridge::{ResourceLoader, Window, WindowSystem};
use crate::core::settings::{Settings, MAX_FPS};
use crate::core::state::{State, StateSlot, Transition};
use crate::error::EngineError;

//=== EngineBuilder =======================================================

/// Builder for configuring and constructing an [`Engine`].
///
/// # Default Values
///
/// Starts from [`Settings::default`]: 800×600, "Example game", 60 fps.
///
/// # Examples
///
/// ```no_run
/// use tickstate_engine::EngineBuilder;
/// use tickstate_engine::platform::HeadlessWindowSystem;
/// # use std::time::Duration;
/// # use tickstate_engine::prelude::*;
/// # struct Title;
/// # impl State for Title {
/// #     fn load(&mut self, _: &mut dyn ResourceLoader) -> Result<(), ResourceError> { Ok(()) }
/// #     fn update(&mut self, _: Duration) -> Transition { Transition::Terminate }
/// #     fn draw(&mut self, _: &mut dyn Graphics) {}
/// #     fn unload(&mut self, _: &mut dyn ResourceLoader) {}
/// # }
///
/// EngineBuilder::new()
///     .with_fps(120)
///     .with_title("Headless run")
///     .build(HeadlessWindowSystem::new())
///     .start(Box::new(Title))
///     .unwrap();
/// ```
pub struct EngineBuilder {
    settings: Settings,
}

impl EngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            settings: Settings::default(),
        }
    }

    /// Replaces all settings at once.
    ///
    /// Settings are validated when the engine starts, so invalid values
    /// surface as [`EngineError::Config`] instead of a panic.
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Sets the tick frequency of the game loop.
    ///
    /// # Panics
    ///
    /// Panics if `fps == 0` or `fps > MAX_FPS`.
    pub fn with_fps(mut self, fps: u32) -> Self {
        assert!(fps > 0, "FPS must be positive, got {}", fps);
        assert!(fps <= MAX_FPS, "FPS must not exceed {}, got {}", MAX_FPS, fps);
        self.settings.fps = fps;
        self
    }

    /// Sets the viewport size in logical pixels.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        assert!(
            width > 0 && height > 0,
            "Window size must be positive, got {}x{}",
            width,
            height
        );
        self.settings.width = width;
        self.settings.height = height;
        self
    }

    /// Sets the main window title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.settings.window_title = title.into();
        self
    }

    /// Builds the engine on top of `window_system`.
    pub fn build<W: WindowSystem>(self, window_system: W) -> Engine<W> {
        info!(
            target: "engine",
            "Building engine ({}x{} @ {} fps)",
            self.settings.width,
            self.settings.height,
            self.settings.fps
        );

        Engine {
            window_system,
            settings: self.settings,
        }
    }
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Engine ==============================================================

/// The loop driver.
///
/// Owns the window system and the settings until [`Engine::start`]
/// consumes it. Create via [`EngineBuilder`].
pub struct Engine<W: WindowSystem> {
    window_system: W,
    settings: Settings,
}

impl<W: WindowSystem> Engine<W> {
    /// Settings the engine will run with.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    //--- Execution --------------------------------------------------------

    /// Runs `initial` and its successors until the loop terminates.
    ///
    /// Blocks until a state returns [`Transition::Terminate`] or the
    /// window reports a close request.
    ///
    /// # Lifecycle
    ///
    /// 1. Validates settings and creates the main window
    /// 2. Wires an [`InputDispatcher`] as key and cursor listener
    /// 3. Loads `initial`, then ticks at the configured frequency
    /// 4. On exit: unloads the live state, stops the ticker, destroys the window
    ///
    /// # Guarantees
    ///
    /// - at most one state is live at any time
    /// - each instance is loaded at most once and unloaded at most once,
    ///   and only after a successful load
    /// - on a switch, unload of the old state completes before the new
    ///   state's load begins
    /// - the window is destroyed on every exit path, including errors
    ///
    /// # Errors
    ///
    /// Any platform, configuration or resource failure ends the run and
    /// is returned as is. A state whose `load` failed is dropped without
    /// being unloaded.
    pub fn start(mut self, initial: Box<dyn State>) -> Result<(), EngineError> {
        self.settings.validate()?;
        info!(target: "engine", "Starting engine runtime (fps: {})", self.settings.fps);

        //--- 1. Acquire the window ----------------------------------------
        let window = self.window_system.create_main_window(&self.settings)?;
        let mut session = Session::open(window, &self.settings);

        //--- 2. Drive the state machine -----------------------------------
        let result = session.run(initial, &self.settings);

        //--- 3. Release everything (window destroyed by the guard) --------
        drop(session);

        match &result {
            Ok(()) => info!(target: "engine", "Engine shutdown complete"),
            Err(e) => error!(target: "engine", "Engine stopped: {}", e),
        }
        result
    }
}

//=== Session =============================================================

/// Per-run loop state. Exists only inside [`Engine::start`].
///
/// Field order matters: the loader is dropped before the window.
struct Session {
    loader: Box<dyn ResourceLoader>,
    ticker: Option<Ticker>,
    slot: StateSlot,
    window: ScopedWindow,
    running: bool,
}

impl Session {
    //--- Construction -----------------------------------------------------

    fn open(window: Box<dyn Window>, settings: &Settings) -> Self {
        let mut window = ScopedWindow(window);
        let slot = StateSlot::new();

        let dispatcher = InputDispatcher::new(slot.clone(), settings.viewport_height());
        window.set_key_listener(dispatcher.clone());
        window.set_cursor_listener(dispatcher);

        let loader = window.create_image_loader();
        debug!(target: "engine", "Loop session opened");

        Self {
            loader,
            ticker: None,
            slot,
            window,
            running: false,
        }
    }

    //--- Tick Loop --------------------------------------------------------

    fn run(&mut self, initial: Box<dyn State>, settings: &Settings) -> Result<(), EngineError> {
        let ticker = Ticker::start(settings.tick_interval());
        let mut previous = ticker.started();
        self.ticker = Some(ticker);
        self.activate(initial)?;
        self.running = true;

        while self.running {
            //--- (a) Close request takes priority ------------------------
            if self.window.should_close() {
                info!(target: "engine", "Window close requested");
                self.shutdown();
                break;
            }

            //--- (b) Wait for the tick and update -------------------------
            let Some(time) = self.ticker.as_ref().and_then(Ticker::wait) else {
                break;
            };
            let tick = Tick::since(time, previous);
            trace!(target: "engine", "Tick (delta: {:?})", tick.delta);

            let transition = self
                .slot
                .with_current(|state| state.update(tick.delta))
                .ok_or(EngineError::NoActiveState)?;

            //--- (c) Resolve the transition -------------------------------
            match transition {
                Transition::Continue => {}
                Transition::Switch(next) => {
                    debug!(target: "engine", "Switching to state {}", next.name());
                    self.deactivate();
                    self.activate(next)?;
                }
                Transition::Terminate => {
                    info!(target: "engine", "State requested termination");
                    self.shutdown();
                    break;
                }
            }

            //--- (d) Draw into a freshly cleared frame --------------------
            // Drawn after the transition resolves: never draw an unloaded state.
            self.draw_frame()?;

            //--- (e) Advance, present and poll ----------------------------
            previous = tick.time;
            self.window.update();
        }

        Ok(())
    }

    //--- Lifecycle Helpers ------------------------------------------------

    /// Loads `state` and makes it live. A failed load leaves the slot empty.
    fn activate(&mut self, mut state: Box<dyn State>) -> Result<(), EngineError> {
        state.load(self.loader.as_mut())?;
        info!(target: "engine", "State {} loaded", state.name());

        let stale = self.slot.install(state);
        debug_assert!(stale.is_none(), "two states live at once");
        Ok(())
    }

    /// Takes the live state out of the slot and unloads it.
    fn deactivate(&mut self) {
        if let Some(mut state) = self.slot.take() {
            state.unload(self.loader.as_mut());
            info!(target: "engine", "State {} unloaded", state.name());
        }
    }

    fn shutdown(&mut self) {
        self.deactivate();
        if let Some(ticker) = self.ticker.as_mut() {
            ticker.stop();
        }
        self.running = false;
    }

    fn draw_frame(&mut self) -> Result<(), EngineError> {
        let mut graphics = self.window.create_graphics();
        self.slot
            .with_current(|state| state.draw(&mut *graphics))
            .ok_or(EngineError::NoActiveState)
    }
}

//=== ScopedWindow ========================================================

/// Destroys the wrapped window when dropped.
struct ScopedWindow(Box<dyn Window>);

impl Deref for ScopedWindow {
    type Target = dyn Window;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

impl DerefMut for ScopedWindow {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.0.as_mut()
    }
}

impl Drop for ScopedWindow {
    fn drop(&mut self) {
        self.0.destroy();
        debug!(target: "engine", "Window destroyed");
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
