//=========================================================================
// Settings
//=========================================================================
//
// Configuration surface consumed by the loop driver at bootstrap:
// window size, window title and tick frequency.
//
// Settings can be built in code, parsed from TOML, or loaded from a file.
// Missing TOML keys fall back to the defaults.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

//=== ConfigError =========================================================

/// Errors raised while reading or validating [`Settings`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("failed to read settings file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings text is not valid TOML for [`Settings`].
    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field holds a value the engine cannot run with.
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

//=== Settings ============================================================

/// Highest tick frequency with a non-zero tick interval (1 ns).
pub const MAX_FPS: u32 = 1_000_000_000;

/// Window and loop configuration.
///
/// # Default Values
///
/// - **width**: 800
/// - **height**: 600
/// - **window_title**: "Example game"
/// - **fps**: 60
///
/// # Examples
///
/// ```
/// use tickstate_engine::Settings;
///
/// let settings = Settings::from_toml_str("fps = 30\nwindow_title = \"Demo\"").unwrap();
/// assert_eq!(settings.fps, 30);
/// assert_eq!(settings.width, 800);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Viewport width in logical pixels.
    pub width: u32,

    /// Viewport height in logical pixels. Also the reference for cursor
    /// Y-axis inversion.
    pub height: u32,

    /// Title of the main window.
    pub window_title: String,

    /// Tick frequency of the game loop, in ticks per second.
    pub fps: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            window_title: String::from("Example game"),
            fps: 60,
        }
    }
}

impl Settings {
    //--- Loading ----------------------------------------------------------

    /// Parses and validates settings from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let settings: Self = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads, parses and validates settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        debug!("Loading settings from {:?}", path);

        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml_str(&text)
    }

    /// Checks that every field is usable by the engine.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 {
            return Err(ConfigError::Invalid {
                field: "width",
                reason: "must be positive",
            });
        }
        if self.height == 0 {
            return Err(ConfigError::Invalid {
                field: "height",
                reason: "must be positive",
            });
        }
        if self.fps == 0 {
            return Err(ConfigError::Invalid {
                field: "fps",
                reason: "must be positive",
            });
        }
        if self.fps > MAX_FPS {
            return Err(ConfigError::Invalid {
                field: "fps",
                reason: "must not exceed one tick per nanosecond",
            });
        }
        Ok(())
    }

    //--- Derived Values ---------------------------------------------------

    /// Nominal time between two ticks (one second divided by `fps`).
    ///
    /// A zero `fps` is treated as 1 so the result is always positive.
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }

    /// Viewport height as a signed coordinate, saturating at `i32::MAX`.
    pub fn viewport_height(&self) -> i32 {
        i32::try_from(self.height).unwrap_or(i32::MAX)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
