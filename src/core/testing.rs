//=========================================================================
// Test Harness
//=========================================================================
//
// Instrumented states and a recording platform backend.
//
// Every observable call (state lifecycle, listener callbacks, window and
// loader activity) is appended to a shared `Journal`, so tests can assert
// exact call order across the driver, the dispatcher and the platform.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::{HashSet, VecDeque};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

//=== Internal Dependencies ===============================================

use crate::core::input::{InputDispatcher, InputEvent, KeyCode};
use crate::core::platform_bridge::{
    Graphics, ImageHandle, PlatformError, ResourceError, ResourceLoader, Window, WindowSystem,
};
use crate::core::settings::Settings;
use crate::core::state::{CursorListener, KeyListener, State, Transition};

//=== Journal =============================================================

/// One observable call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Load(&'static str),
    Update(&'static str),
    Draw(&'static str),
    Unload(&'static str),
    KeyPressed(&'static str, KeyCode),
    KeyReleased(&'static str, KeyCode),
    CursorMoved(&'static str, i32, i32),
    WindowCreated,
    FrameCleared,
    WindowUpdated,
    WindowDestroyed,
    ImageLoaded(String),
    ImageUnloaded(u64),
    ImageDrawn(u64, i32, i32),
}

impl Call {
    fn is_state_lifecycle(&self) -> bool {
        matches!(
            self,
            Self::Load(_) | Self::Update(_) | Self::Draw(_) | Self::Unload(_)
        )
    }
}

/// Shared, thread-safe call log.
#[derive(Clone, Default)]
pub(crate) struct Journal {
    calls: Arc<Mutex<Vec<Call>>>,
    deltas: Arc<Mutex<Vec<Duration>>>,
}

impl Journal {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&self, call: Call) {
        self.calls.lock().expect("journal lock").push(call);
    }

    /// Every recorded call, in order.
    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().expect("journal lock").clone()
    }

    /// Only load/update/draw/unload calls, in order.
    pub(crate) fn lifecycle(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(Call::is_state_lifecycle)
            .collect()
    }

    /// Deltas passed to every `update`, in order.
    pub(crate) fn deltas(&self) -> Vec<Duration> {
        self.deltas.lock().expect("journal lock").clone()
    }

    fn record_delta(&self, delta: Duration) {
        self.deltas.lock().expect("journal lock").push(delta);
    }

    pub(crate) fn count(&self, call: &Call) -> usize {
        self.calls().iter().filter(|c| *c == call).count()
    }
}

//=== ProbeState ==========================================================

type Script = Box<dyn FnMut(u32) -> Transition + Send>;
type LoadHook = Box<dyn FnMut() + Send>;

/// Instrumented state recording every call into a [`Journal`].
///
/// By default it continues forever, listens to nothing and loads no
/// images. The script receives the 1-based update count.
pub(crate) struct ProbeState {
    name: &'static str,
    journal: Journal,
    script: Script,
    updates: u32,
    listens: bool,
    image_path: Option<PathBuf>,
    image: Option<ImageHandle>,
    load_hook: Option<LoadHook>,
}

impl ProbeState {
    pub(crate) fn new(name: &'static str, journal: &Journal) -> Self {
        Self {
            name,
            journal: journal.clone(),
            script: Box::new(|_| Transition::Continue),
            updates: 0,
            listens: false,
            image_path: None,
            image: None,
            load_hook: None,
        }
    }

    /// A probe exposing both the key and the cursor capability.
    pub(crate) fn listener(name: &'static str, journal: &Journal) -> Self {
        Self {
            listens: true,
            ..Self::new(name, journal)
        }
    }

    pub(crate) fn with_script(
        mut self,
        script: impl FnMut(u32) -> Transition + Send + 'static,
    ) -> Self {
        self.script = Box::new(script);
        self
    }

    /// Continues for `ticks` updates, then terminates.
    pub(crate) fn terminating_after(self, ticks: u32) -> Self {
        self.with_script(move |n| {
            if n > ticks {
                Transition::Terminate
            } else {
                Transition::Continue
            }
        })
    }

    /// Runs `hook` inside `load`, after the call is recorded.
    pub(crate) fn on_load(mut self, hook: impl FnMut() + Send + 'static) -> Self {
        self.load_hook = Some(Box::new(hook));
        self
    }

    /// Loads `path` in `load`, draws it every frame, releases it in `unload`.
    pub(crate) fn with_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.image_path = Some(path.into());
        self
    }
}

impl State for ProbeState {
    fn load(&mut self, loader: &mut dyn ResourceLoader) -> Result<(), ResourceError> {
        self.journal.record(Call::Load(self.name));
        if let Some(hook) = self.load_hook.as_mut() {
            hook();
        }
        if let Some(path) = &self.image_path {
            self.image = Some(loader.load_image(path)?);
        }
        Ok(())
    }

    fn update(&mut self, delta: Duration) -> Transition {
        self.updates += 1;
        self.journal.record(Call::Update(self.name));
        self.journal.record_delta(delta);
        (self.script)(self.updates)
    }

    fn draw(&mut self, graphics: &mut dyn Graphics) {
        self.journal.record(Call::Draw(self.name));
        if let Some(image) = &self.image {
            graphics.draw_image(image, 0, 0);
        }
    }

    fn unload(&mut self, loader: &mut dyn ResourceLoader) {
        self.journal.record(Call::Unload(self.name));
        if let Some(image) = self.image.take() {
            loader.unload_image(image);
        }
    }

    fn as_key_listener(&mut self) -> Option<&mut dyn KeyListener> {
        if self.listens {
            Some(self)
        } else {
            None
        }
    }

    fn as_cursor_listener(&mut self) -> Option<&mut dyn CursorListener> {
        if self.listens {
            Some(self)
        } else {
            None
        }
    }

    fn name(&self) -> &str {
        self.name
    }
}

impl KeyListener for ProbeState {
    fn key_pressed(&mut self, key: KeyCode) {
        self.journal.record(Call::KeyPressed(self.name, key));
    }

    fn key_released(&mut self, key: KeyCode) {
        self.journal.record(Call::KeyReleased(self.name, key));
    }
}

impl CursorListener for ProbeState {
    fn cursor_moved(&mut self, x: i32, y: i32) {
        self.journal.record(Call::CursorMoved(self.name, x, y));
    }
}

//=== RecordingWindowSystem ===============================================

/// Window backend that records its activity and replays scripted input.
pub(crate) struct RecordingWindowSystem {
    journal: Journal,
    close: Arc<AtomicBool>,
    close_after_updates: Option<usize>,
    input: VecDeque<(usize, InputEvent)>,
    missing_images: HashSet<PathBuf>,
    live_images: Arc<Mutex<HashSet<u64>>>,
    fail_creation: bool,
}

impl RecordingWindowSystem {
    pub(crate) fn new(journal: &Journal) -> Self {
        Self {
            journal: journal.clone(),
            close: Arc::new(AtomicBool::new(false)),
            close_after_updates: None,
            input: VecDeque::new(),
            missing_images: HashSet::new(),
            live_images: Arc::new(Mutex::new(HashSet::new())),
            fail_creation: false,
        }
    }

    /// Requests close once the window has been updated `updates` times.
    pub(crate) fn closing_after(mut self, updates: usize) -> Self {
        self.close_after_updates = Some(updates);
        self
    }

    /// Delivers `event` while polling during the `update`-th window update.
    pub(crate) fn with_input(mut self, update: usize, event: InputEvent) -> Self {
        self.input.push_back((update, event));
        self
    }

    /// Makes loading `path` fail as if the file were missing.
    pub(crate) fn with_missing_image(mut self, path: impl Into<PathBuf>) -> Self {
        self.missing_images.insert(path.into());
        self
    }

    pub(crate) fn failing(mut self) -> Self {
        self.fail_creation = true;
        self
    }

    /// Close flag shared with the window, settable from outside.
    pub(crate) fn close_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.close)
    }

    /// Ids of images loaded and not yet unloaded.
    pub(crate) fn live_images(&self) -> Arc<Mutex<HashSet<u64>>> {
        Arc::clone(&self.live_images)
    }
}

impl WindowSystem for RecordingWindowSystem {
    fn create_main_window(&mut self, _settings: &Settings) -> Result<Box<dyn Window>, PlatformError> {
        if self.fail_creation {
            return Err(PlatformError::WindowCreation(String::from("no display")));
        }

        self.journal.record(Call::WindowCreated);
        Ok(Box::new(RecordingWindow {
            journal: self.journal.clone(),
            close: Arc::clone(&self.close),
            close_after_updates: self.close_after_updates,
            input: std::mem::take(&mut self.input),
            missing_images: self.missing_images.clone(),
            live_images: Arc::clone(&self.live_images),
            key_listener: None,
            cursor_listener: None,
            updates: 0,
        }))
    }
}

struct RecordingWindow {
    journal: Journal,
    close: Arc<AtomicBool>,
    close_after_updates: Option<usize>,
    input: VecDeque<(usize, InputEvent)>,
    missing_images: HashSet<PathBuf>,
    live_images: Arc<Mutex<HashSet<u64>>>,
    key_listener: Option<InputDispatcher>,
    cursor_listener: Option<InputDispatcher>,
    updates: usize,
}

impl Window for RecordingWindow {
    fn set_key_listener(&mut self, dispatcher: InputDispatcher) {
        self.key_listener = Some(dispatcher);
    }

    fn set_cursor_listener(&mut self, dispatcher: InputDispatcher) {
        self.cursor_listener = Some(dispatcher);
    }

    fn create_image_loader(&mut self) -> Box<dyn ResourceLoader> {
        Box::new(RecordingLoader {
            journal: self.journal.clone(),
            missing: self.missing_images.clone(),
            live: Arc::clone(&self.live_images),
            next_id: 1,
        })
    }

    fn create_graphics(&mut self) -> Box<dyn Graphics + '_> {
        self.journal.record(Call::FrameCleared);
        Box::new(RecordingGraphics {
            journal: &self.journal,
        })
    }

    fn should_close(&self) -> bool {
        self.close.load(Ordering::SeqCst)
    }

    fn update(&mut self) {
        self.updates += 1;
        self.journal.record(Call::WindowUpdated);

        while let Some(&(at, event)) = self.input.front() {
            if at > self.updates {
                break;
            }
            self.input.pop_front();
            let listener = match event {
                InputEvent::CursorMoved { .. } => self.cursor_listener.as_ref(),
                _ => self.key_listener.as_ref(),
            };
            if let Some(dispatcher) = listener {
                dispatcher.dispatch(event);
            }
        }

        if self.close_after_updates.is_some_and(|limit| self.updates >= limit) {
            self.close.store(true, Ordering::SeqCst);
        }
    }

    fn destroy(&mut self) {
        self.journal.record(Call::WindowDestroyed);
    }
}

struct RecordingLoader {
    journal: Journal,
    missing: HashSet<PathBuf>,
    live: Arc<Mutex<HashSet<u64>>>,
    next_id: u64,
}

impl ResourceLoader for RecordingLoader {
    fn load_image(&mut self, path: &Path) -> Result<ImageHandle, ResourceError> {
        self.journal
            .record(Call::ImageLoaded(path.display().to_string()));

        if self.missing.contains(path) {
            return Err(ResourceError::Open {
                path: path.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
            });
        }

        let id = self.next_id;
        self.next_id += 1;
        self.live.lock().expect("live images lock").insert(id);
        Ok(ImageHandle::new(id, 16, 16))
    }

    fn unload_image(&mut self, image: ImageHandle) {
        self.journal.record(Call::ImageUnloaded(image.id()));
        self.live.lock().expect("live images lock").remove(&image.id());
    }
}

struct RecordingGraphics<'a> {
    journal: &'a Journal,
}

impl Graphics for RecordingGraphics<'_> {
    fn draw_image(&mut self, image: &ImageHandle, x: i32, y: i32) {
        self.journal.record(Call::ImageDrawn(image.id(), x, y));
    }
}
