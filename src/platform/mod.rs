//=========================================================================
// Platform Subsystem
//
// Concrete implementations of the platform bridge.
//
// Architecture:
// ```text
//  Loop driver (engine.rs)
//   │  should_close() / update() / create_graphics()
//   ↓
//  WinitWindow ──pump_app_events(0)──► Winit Event Loop
//   │                                   │
//   │                                   ↓
//   │                           WindowHandler (ApplicationHandler)
//   │                             ├─ CloseRequested → close flag
//   │                             ├─ KeyboardInput ─┐
//   │                             └─ CursorMoved ───┤ InputProcessor
//   │                                               ↓
//   │                                         InputDispatcher → active state
//   ├─ create_image_loader() → DecodedImageLoader ─┐
//   └─ create_graphics()     → FrameGraphics ──────┴─► ImageStore
// ```
//
// Key Design Decisions:
// - **Poll style**: the driver owns the loop. Each `update()` pumps
//   pending OS events with a zero timeout instead of handing control to
//   `run_app()`, so close checks and ticks stay in the driver.
// - **Input on the loop thread**: OS input is forwarded during `update()`;
//   other threads may still dispatch through their own dispatcher clones.
// - **Main thread requirement**: Winit mandates the main thread on
//   macOS, so `Engine::start` must be called from `main` with this backend.
// - **One window per process**: Winit allows a single event loop.
// - **Recorded frames**: `FrameGraphics` only records draw commands and
//   `update()` reports their count. No pixels reach the window surface;
//   a renderer would consume the draw list and `ImageStore` pixels.
//
//=========================================================================

//=== Submodules ==========================================================

mod headless;
mod image_store;
mod input_processor;

pub use headless::{CloseHandle, HeadlessWindowSystem, InputHandle};
pub use image_store::{DecodedImage, DecodedImageLoader, ImageStore};

//=== External Crates =====================================================

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use log::*;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    platform::pump_events::{EventLoopExtPumpEvents, PumpStatus},
    window::{Window as OsWindow, WindowAttributes, WindowId},
};

//=== Internal Imports ====================================================

use crate::core::input::InputDispatcher;
use crate::core::platform_bridge::{
    Graphics, ImageHandle, PlatformError, ResourceLoader, Window, WindowSystem,
};
use crate::core::settings::Settings;
use input_processor::InputProcessor;

//=== Constants ===========================================================

/// Pump rounds allowed for the OS to deliver `resumed` at startup.
const STARTUP_PUMP_ROUNDS: usize = 200;

/// Wait per startup pump round.
const STARTUP_PUMP_TIMEOUT: Duration = Duration::from_millis(5);

//=== WinitWindowSystem ===================================================

/// Desktop [`WindowSystem`] backed by Winit.
#[derive(Debug, Default)]
pub struct WinitWindowSystem;

impl WinitWindowSystem {
    pub fn new() -> Self {
        Self
    }
}

impl WindowSystem for WinitWindowSystem {
    /// Creates the event loop and blocks until the OS window exists.
    ///
    /// # Errors
    ///
    /// - [`PlatformError::EventLoopCreation`] if Winit cannot start (no
    ///   display server, or an event loop already exists in this process)
    /// - [`PlatformError::WindowCreation`] if the OS refuses the window
    /// - [`PlatformError::WindowUnavailable`] if the platform never resumes
    fn create_main_window(&mut self, settings: &Settings) -> Result<Box<dyn Window>, PlatformError> {
        debug!(target: "platform", "Starting Winit event loop");

        let mut event_loop =
            EventLoop::new().map_err(|e| PlatformError::EventLoopCreation(e.to_string()))?;
        let mut handler = WindowHandler::new(window_attributes(settings));

        for _ in 0..STARTUP_PUMP_ROUNDS {
            let status = event_loop.pump_app_events(Some(STARTUP_PUMP_TIMEOUT), &mut handler);

            if let Some(reason) = handler.creation_error.take() {
                return Err(PlatformError::WindowCreation(reason));
            }
            if handler.window.is_some() {
                break;
            }
            if let PumpStatus::Exit(code) = status {
                warn!(target: "platform", "Event loop exited during startup (code {})", code);
                break;
            }
        }

        if handler.window.is_none() {
            return Err(PlatformError::WindowUnavailable);
        }

        Ok(Box::new(WinitWindow {
            handler,
            event_loop,
            images: Rc::new(RefCell::new(ImageStore::new())),
            frame: Vec::new(),
            frames: 0,
            destroyed: false,
        }))
    }
}

/// Non-resizable window with the configured title and logical size.
fn window_attributes(settings: &Settings) -> WindowAttributes {
    WindowAttributes::default()
        .with_title(settings.window_title.clone())
        .with_inner_size(LogicalSize::new(settings.width, settings.height))
        .with_resizable(false)
}

//=== WindowHandler =======================================================

/// Winit callback target. Lives as long as the window.
struct WindowHandler {
    /// Attributes for the window created on first `resumed()`.
    attributes: WindowAttributes,

    /// OS window handle (None until `resumed()`, and after `destroy()`).
    window: Option<OsWindow>,

    /// Set when `resumed()` failed to create the window.
    creation_error: Option<String>,

    close_requested: bool,
    input_processor: InputProcessor,
    key_listener: Option<InputDispatcher>,
    cursor_listener: Option<InputDispatcher>,
}

impl WindowHandler {
    fn new(attributes: WindowAttributes) -> Self {
        Self {
            attributes,
            window: None,
            creation_error: None,
            close_requested: false,
            input_processor: InputProcessor::new(),
            key_listener: None,
            cursor_listener: None,
        }
    }

    fn scale_factor(&self) -> f64 {
        self.window.as_ref().map_or(1.0, |window| window.scale_factor())
    }
}

impl ApplicationHandler for WindowHandler {
    /// Creates the window if it doesn't exist yet.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            debug!(target: "platform", "Window already exists (resume)");
            return;
        }

        match event_loop.create_window(self.attributes.clone()) {
            Ok(window) => {
                info!(
                    target: "platform",
                    "Window created: {}x{} @ {}x DPI",
                    window.inner_size().width,
                    window.inner_size().height,
                    window.scale_factor()
                );
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => {
                error!(target: "platform", "Window creation failed: {}", e);
                self.creation_error = Some(e.to_string());
            }
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested | WindowEvent::Destroyed => {
                info!(target: "platform", "Window close requested");
                self.close_requested = true;
            }

            WindowEvent::KeyboardInput { event: key_event, .. } => {
                let Some(event) = self.input_processor.process_key_event(&key_event) else {
                    trace!(target: "platform::input", "Repeat or unmapped key ignored");
                    return;
                };
                if let Some(dispatcher) = &self.key_listener {
                    dispatcher.dispatch(event);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                let logical = position.to_logical::<f64>(self.scale_factor());
                let event = self.input_processor.process_cursor_move(logical.x, logical.y);
                if let Some(dispatcher) = &self.cursor_listener {
                    dispatcher.dispatch(event);
                }
            }

            _ => {
                // Ignore: Resized, Focused, RedrawRequested, etc.
            }
        }
    }
}

//=== WinitWindow =========================================================

/// Main window handed to the loop driver.
///
/// Field order matters: the handler (and the OS window it owns) is
/// dropped before the event loop.
struct WinitWindow {
    handler: WindowHandler,
    event_loop: EventLoop<()>,
    images: Rc<RefCell<ImageStore>>,
    frame: Vec<DrawCommand>,
    frames: u64,
    destroyed: bool,
}

impl WinitWindow {
    fn pump(&mut self) {
        if let PumpStatus::Exit(code) = self.event_loop.pump_app_events(Some(Duration::ZERO), &mut self.handler) {
            debug!(target: "platform", "Event loop exited (code {})", code);
            self.handler.close_requested = true;
        }
    }
}

impl Window for WinitWindow {
    fn set_key_listener(&mut self, dispatcher: InputDispatcher) {
        self.handler.key_listener = Some(dispatcher);
    }

    fn set_cursor_listener(&mut self, dispatcher: InputDispatcher) {
        self.handler.cursor_listener = Some(dispatcher);
    }

    fn create_image_loader(&mut self) -> Box<dyn ResourceLoader> {
        Box::new(DecodedImageLoader::with_store(Rc::clone(&self.images)))
    }

    fn create_graphics(&mut self) -> Box<dyn Graphics + '_> {
        self.frame.clear();
        Box::new(FrameGraphics {
            commands: &mut self.frame,
            images: &self.images,
        })
    }

    fn should_close(&self) -> bool {
        self.handler.close_requested || self.handler.window.is_none()
    }

    fn update(&mut self) {
        self.frames += 1;
        trace!(
            target: "platform",
            "Presenting frame {} ({} draw commands)",
            self.frames,
            self.frame.len()
        );

        if let Some(window) = &self.handler.window {
            window.request_redraw();
        }
        self.pump();
    }

    fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;

        self.handler.key_listener = None;
        self.handler.cursor_listener = None;
        self.handler.window = None;
        self.frame.clear();

        // Let the OS process the window teardown.
        self.pump();

        let orphaned = self.images.borrow().live_count();
        if orphaned > 0 {
            warn!(target: "platform", "{} image(s) still loaded at window destruction", orphaned);
        }
        info!(target: "platform", "Window destroyed after {} frames", self.frames);
    }
}

//=== Frame Recording =====================================================

/// One queued image blit, viewport coordinates with Y up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DrawCommand {
    image: ImageHandle,
    x: i32,
    y: i32,
}

/// Records draw calls into the window's frame list.
struct FrameGraphics<'a> {
    commands: &'a mut Vec<DrawCommand>,
    images: &'a RefCell<ImageStore>,
}

impl Graphics for FrameGraphics<'_> {
    fn draw_image(&mut self, image: &ImageHandle, x: i32, y: i32) {
        if !self.images.borrow().contains(image) {
            warn!(target: "platform", "Draw of released image #{} skipped", image.id());
            return;
        }
        self.commands.push(DrawCommand { image: *image, x, y });
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
