//=========================================================================
// Platform Bridge Interface
//=========================================================================
//
// Contract between the loop driver / states and the platform layer.
//
// Consumed by the driver:  WindowSystem, Window
// Consumed by states:      ResourceLoader (load/unload), Graphics (draw)
//
// Backends (winit, headless, test harness) implement these traits; core
// code never names a backend type.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::path::{Path, PathBuf};

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::input::InputDispatcher;
use crate::core::settings::Settings;

//=== ImageHandle =========================================================

/// Opaque handle to an image owned by a [`ResourceLoader`].
///
/// Only the loader that produced a handle can interpret its id. The
/// handle carries the pixel size so graphics backends can scale quads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle {
    id: u64,
    width: u32,
    height: u32,
}

impl ImageHandle {
    /// Creates a handle. Intended for [`ResourceLoader`] implementations.
    pub fn new(id: u64, width: u32, height: u32) -> Self {
        Self { id, width, height }
    }

    /// Loader-specific identifier.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Pixel size as `(width, height)`.
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

//=== Errors ==============================================================

/// Bootstrap failures of the platform layer. Always fatal.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Event loop creation failed (OS-level issue).
    #[error("event loop creation failed: {0}")]
    EventLoopCreation(String),

    /// The OS refused to create the main window.
    #[error("window creation failed: {0}")]
    WindowCreation(String),

    /// The platform never became ready to host a window.
    #[error("platform did not provide a window")]
    WindowUnavailable,
}

/// Resource load failures. Fatal to the run; no partial recovery.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The file could not be opened.
    #[error("image {path:?} not found on disk: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file was opened but could not be decoded.
    #[error("image {path:?} could not be decoded: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

//=== Window Boundary =====================================================

/// Factory for the main window.
pub trait WindowSystem {
    /// Creates the main window described by `settings`.
    fn create_main_window(&mut self, settings: &Settings) -> Result<Box<dyn Window>, PlatformError>;
}

/// Main window, as seen by the loop driver.
///
/// The driver calls `destroy` exactly once, when the loop exits.
pub trait Window {
    /// Registers the receiver of key press/release events.
    fn set_key_listener(&mut self, dispatcher: InputDispatcher);

    /// Registers the receiver of cursor movement events.
    fn set_cursor_listener(&mut self, dispatcher: InputDispatcher);

    /// Creates the loader states use to acquire and release images.
    fn create_image_loader(&mut self) -> Box<dyn ResourceLoader>;

    /// Clears the frame and returns a handle to draw into it.
    fn create_graphics(&mut self) -> Box<dyn Graphics + '_>;

    /// Whether the user or the OS asked for the window to close.
    fn should_close(&self) -> bool;

    /// Presents the current frame and polls platform events.
    fn update(&mut self);

    /// Releases the window and every platform resource it owns.
    fn destroy(&mut self);
}

//=== Resource Boundary ===================================================

/// Decodes image assets into drawable handles and releases them.
pub trait ResourceLoader {
    /// Loads the image at `path`.
    fn load_image(&mut self, path: &Path) -> Result<ImageHandle, ResourceError>;

    /// Releases an image previously returned by `load_image`.
    fn unload_image(&mut self, image: ImageHandle);
}

//=== Graphics Boundary ===================================================

/// Per-frame drawing surface.
pub trait Graphics {
    /// Draws `image` with its top-left corner at viewport `(x, y)`, Y up.
    fn draw_image(&mut self, image: &ImageHandle, x: i32, y: i32);
}

//=========================================================================
// Unit Tests
//=========================================================================
