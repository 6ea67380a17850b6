//=========================================================================
// Engine Errors
//=========================================================================
//
// Top-level error taxonomy returned by `Engine::start`.
//
//   Platform  → bootstrap failure (window / event loop)
//   Resource  → a state failed to load an asset
//   Config    → settings could not be read or are invalid
//   NoActiveState → driver invariant broken (should never surface)
//
// Every variant is fatal to the run. There is no retry policy.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::platform_bridge::{PlatformError, ResourceError};
use crate::core::settings::ConfigError;

//=== EngineError =========================================================

/// Fatal failure of an engine run.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Resource(#[from] ResourceError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The driver found no live state where one was required.
    #[error("no active state in the loop session")]
    NoActiveState,
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_errors_convert() {
        let err: EngineError = PlatformError::WindowUnavailable.into();
        assert!(matches!(err, EngineError::Platform(_)));
        assert_eq!(err.to_string(), "platform did not provide a window");
    }

    #[test]
    fn config_errors_convert() {
        let err: EngineError = ConfigError::Invalid {
            field: "fps",
            reason: "must be positive",
        }
        .into();
        assert!(matches!(err, EngineError::Config(_)));
    }
}
