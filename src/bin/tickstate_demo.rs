//=========================================================================
// Tickstate Demo
//=========================================================================
//
// Two-state demo on the Winit backend.
//
//   TitleState ──Enter──► PlayState ──Escape──► TitleState (fresh)
//       └──Escape──► terminate
//
// Usage:
//   tickstate_demo [settings.toml]
//
// Log verbosity follows RUST_LOG (default: info).
//
//=========================================================================

use std::process::ExitCode;
use std::time::Duration;

use log::{error, info};

use tickstate_engine::platform::WinitWindowSystem;
use tickstate_engine::prelude::*;

//=== TitleState ==========================================================

/// Waits for Enter (play) or Escape (quit).
#[derive(Default)]
struct TitleState {
    choice: Option<KeyCode>,
}

impl State for TitleState {
    fn load(&mut self, _loader: &mut dyn ResourceLoader) -> Result<(), ResourceError> {
        info!("Title screen: press Enter to play, Escape to quit");
        Ok(())
    }

    fn update(&mut self, _delta: Duration) -> Transition {
        match self.choice.take() {
            Some(KeyCode::Enter) => Transition::switch(PlayState::default()),
            Some(KeyCode::Escape) => Transition::Terminate,
            _ => Transition::Continue,
        }
    }

    fn draw(&mut self, _graphics: &mut dyn Graphics) {}

    fn unload(&mut self, _loader: &mut dyn ResourceLoader) {}

    fn as_key_listener(&mut self) -> Option<&mut dyn KeyListener> {
        Some(self)
    }

    fn name(&self) -> &str {
        "Title"
    }
}

impl KeyListener for TitleState {
    fn key_pressed(&mut self, key: KeyCode) {
        if matches!(key, KeyCode::Enter | KeyCode::Escape) {
            self.choice = Some(key);
        }
    }

    fn key_released(&mut self, _key: KeyCode) {}
}

//=== PlayState ===========================================================

/// Tracks the cursor and elapsed play time until Escape.
#[derive(Default)]
struct PlayState {
    leave: bool,
    elapsed: Duration,
    cursor: Option<(i32, i32)>,
}

impl State for PlayState {
    fn load(&mut self, _loader: &mut dyn ResourceLoader) -> Result<(), ResourceError> {
        info!("Playing: move the cursor, Escape returns to the title");
        Ok(())
    }

    fn update(&mut self, delta: Duration) -> Transition {
        self.elapsed += delta;
        if self.leave {
            Transition::switch(TitleState::default())
        } else {
            Transition::Continue
        }
    }

    fn draw(&mut self, _graphics: &mut dyn Graphics) {}

    fn unload(&mut self, _loader: &mut dyn ResourceLoader) {
        info!("Played for {:.1}s", self.elapsed.as_secs_f32());
    }

    fn as_key_listener(&mut self) -> Option<&mut dyn KeyListener> {
        Some(self)
    }

    fn as_cursor_listener(&mut self) -> Option<&mut dyn CursorListener> {
        Some(self)
    }

    fn name(&self) -> &str {
        "Play"
    }
}

impl KeyListener for PlayState {
    fn key_pressed(&mut self, key: KeyCode) {
        if key == KeyCode::Escape {
            self.leave = true;
        }
    }

    fn key_released(&mut self, _key: KeyCode) {}
}

impl CursorListener for PlayState {
    fn cursor_moved(&mut self, x: i32, y: i32) {
        if self.cursor != Some((x, y)) {
            info!("Cursor at ({}, {})", x, y);
            self.cursor = Some((x, y));
        }
    }
}

//=== Entry Point =========================================================

fn run() -> Result<(), EngineError> {
    let settings = match std::env::args_os().nth(1) {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    EngineBuilder::new()
        .with_settings(settings)
        .build(WinitWindowSystem::new())
        .start(Box::new(TitleState::default()))
}

fn main() -> ExitCode {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("tickstate_demo failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
