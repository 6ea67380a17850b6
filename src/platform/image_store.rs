//=========================================================================
// Image Store
//=========================================================================
//
// CPU-side image registry backing the platform's ResourceLoader.
//
// Architecture:
//   DecodedImageLoader ──load/unload──► ImageStore ◄──lookup── frame graphics
//                         (Rc<RefCell<..>> shared within one window)
//
// Images are decoded to RGBA8 with the `image` crate. The store tracks
// every live handle so the window can report images a state forgot to
// unload.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::{ImageHandle, ResourceError, ResourceLoader};

//=== DecodedImage ========================================================

/// Decoded image pixels, RGBA8, row-major, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

//=== ImageStore ==========================================================

/// Registry of live images keyed by handle id.
#[derive(Debug, Default)]
pub struct ImageStore {
    images: HashMap<u64, DecodedImage>,
    next_id: u64,
}

impl ImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers decoded pixels and returns their handle.
    pub fn insert(&mut self, image: DecodedImage) -> ImageHandle {
        self.next_id += 1;
        let handle = ImageHandle::new(self.next_id, image.width, image.height);
        self.images.insert(handle.id(), image);
        handle
    }

    /// Releases an image. Returns `false` if the handle was not live.
    pub fn remove(&mut self, handle: &ImageHandle) -> bool {
        self.images.remove(&handle.id()).is_some()
    }

    pub fn get(&self, handle: &ImageHandle) -> Option<&DecodedImage> {
        self.images.get(&handle.id())
    }

    pub fn contains(&self, handle: &ImageHandle) -> bool {
        self.images.contains_key(&handle.id())
    }

    /// Number of images loaded and not yet released.
    pub fn live_count(&self) -> usize {
        self.images.len()
    }
}

//=== DecodedImageLoader ==================================================

/// [`ResourceLoader`] decoding PNG/JPEG files into an [`ImageStore`].
#[derive(Clone, Default)]
pub struct DecodedImageLoader {
    store: Rc<RefCell<ImageStore>>,
}

impl DecodedImageLoader {
    /// Creates a loader with its own, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a loader writing into an existing shared store.
    pub(crate) fn with_store(store: Rc<RefCell<ImageStore>>) -> Self {
        Self { store }
    }

    /// Number of images loaded through this store and not yet released.
    pub fn live_images(&self) -> usize {
        self.store.borrow().live_count()
    }
}

impl ResourceLoader for DecodedImageLoader {
    fn load_image(&mut self, path: &Path) -> Result<ImageHandle, ResourceError> {
        let bytes = fs::read(path).map_err(|source| ResourceError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let rgba = image::load_from_memory(&bytes)
            .map_err(|source| ResourceError::Decode {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();

        let (width, height) = rgba.dimensions();
        let handle = self.store.borrow_mut().insert(DecodedImage {
            width,
            height,
            pixels: rgba.into_raw(),
        });

        debug!(target: "platform", "Loaded image {:?} ({}x{}) as #{}", path, width, height, handle.id());
        Ok(handle)
    }

    fn unload_image(&mut self, image: ImageHandle) {
        if self.store.borrow_mut().remove(&image) {
            debug!(target: "platform", "Released image #{}", image.id());
        } else {
            warn!(target: "platform", "Released unknown image #{}", image.id());
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
