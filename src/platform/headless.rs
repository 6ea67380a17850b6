//=========================================================================
// Headless Platform
//=========================================================================
//
// Window backend with no OS window and no frame buffer.
//
// States still load, update, draw and unload normally: images are decoded
// through the regular `DecodedImageLoader`, while drawing goes to a no-op
// graphics object. Close is requested from outside through a
// `CloseHandle`, or automatically after a frame limit.
//
// Input can be injected from any thread through an `InputHandle`; it is
// routed exactly like OS input, straight to the registered dispatchers.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use log::{debug, info, trace, warn};

//=== Internal Dependencies ===============================================

use super::image_store::{DecodedImageLoader, ImageStore};
use crate::core::input::{InputDispatcher, InputEvent};
use crate::core::platform_bridge::{
    Graphics, ImageHandle, PlatformError, ResourceLoader, Window, WindowSystem,
};
use crate::core::settings::Settings;

//=== CloseHandle =========================================================

/// Cloneable close request flag, settable from any thread.
#[derive(Debug, Clone, Default)]
pub struct CloseHandle {
    requested: Arc<AtomicBool>,
}

impl CloseHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Asks the window to close; observed at the start of the next tick.
    pub fn request_close(&self) {
        self.requested.store(true, Ordering::SeqCst);
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }
}

//=== InputHandle =========================================================

#[derive(Default)]
struct Listeners {
    key: Option<InputDispatcher>,
    cursor: Option<InputDispatcher>,
}

/// Injects raw input (top-left origin, Y down) into a headless window.
#[derive(Clone, Default)]
pub struct InputHandle {
    listeners: Arc<Mutex<Listeners>>,
}

impl InputHandle {
    /// Routes `event` to the matching registered dispatcher.
    ///
    /// Returns `true` if the active state received it.
    pub fn send(&self, event: InputEvent) -> bool {
        let dispatcher = {
            let listeners = self.listeners.lock().unwrap_or_else(PoisonError::into_inner);
            match event {
                InputEvent::CursorMoved { .. } => listeners.cursor.clone(),
                _ => listeners.key.clone(),
            }
        };

        match dispatcher {
            Some(dispatcher) => dispatcher.dispatch(event),
            None => {
                trace!(target: "platform::input", "No listener registered for {:?}", event);
                false
            }
        }
    }
}

//=== HeadlessWindowSystem ================================================

/// [`WindowSystem`] for tests, servers and CI: no display required.
#[derive(Default)]
pub struct HeadlessWindowSystem {
    close: CloseHandle,
    input: InputHandle,
    frame_limit: Option<u64>,
}

impl HeadlessWindowSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests close automatically after `frames` window updates.
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.frame_limit = Some(frames);
        self
    }

    pub fn close_handle(&self) -> CloseHandle {
        self.close.clone()
    }

    pub fn input_handle(&self) -> InputHandle {
        self.input.clone()
    }
}

impl WindowSystem for HeadlessWindowSystem {
    fn create_main_window(&mut self, settings: &Settings) -> Result<Box<dyn Window>, PlatformError> {
        info!(
            target: "platform",
            "Headless window \"{}\" ({}x{})",
            settings.window_title,
            settings.width,
            settings.height
        );

        Ok(Box::new(HeadlessWindow {
            close: self.close.clone(),
            input: self.input.clone(),
            frame_limit: self.frame_limit,
            frames: 0,
            images: Rc::new(RefCell::new(ImageStore::new())),
            destroyed: false,
        }))
    }
}

//=== HeadlessWindow ======================================================

struct HeadlessWindow {
    close: CloseHandle,
    input: InputHandle,
    frame_limit: Option<u64>,
    frames: u64,
    images: Rc<RefCell<ImageStore>>,
    destroyed: bool,
}

impl Window for HeadlessWindow {
    fn set_key_listener(&mut self, dispatcher: InputDispatcher) {
        let mut listeners = self.input.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        listeners.key = Some(dispatcher);
    }

    fn set_cursor_listener(&mut self, dispatcher: InputDispatcher) {
        let mut listeners = self.input.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        listeners.cursor = Some(dispatcher);
    }

    fn create_image_loader(&mut self) -> Box<dyn ResourceLoader> {
        Box::new(DecodedImageLoader::with_store(Rc::clone(&self.images)))
    }

    fn create_graphics(&mut self) -> Box<dyn Graphics + '_> {
        Box::new(NullGraphics)
    }

    fn should_close(&self) -> bool {
        self.close.is_requested()
    }

    fn update(&mut self) {
        self.frames += 1;
        trace!(target: "platform", "Headless frame {}", self.frames);

        if self.frame_limit.is_some_and(|limit| self.frames >= limit) {
            debug!(target: "platform", "Frame limit reached after {} frames", self.frames);
            self.close.request_close();
        }
    }

    fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;

        let mut listeners = self.input.listeners.lock().unwrap_or_else(PoisonError::into_inner);
        *listeners = Listeners::default();

        let orphaned = self.images.borrow().live_count();
        if orphaned > 0 {
            warn!(target: "platform", "{} image(s) still loaded at window destruction", orphaned);
        }
        info!(target: "platform", "Headless window destroyed after {} frames", self.frames);
    }
}

//=== NullGraphics ========================================================

/// Graphics object that accepts draw calls and discards them.
struct NullGraphics;

impl Graphics for NullGraphics {
    fn draw_image(&mut self, image: &ImageHandle, x: i32, y: i32) {
        trace!(target: "platform", "Discarded draw of image #{} at ({}, {})", image.id(), x, y);
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
