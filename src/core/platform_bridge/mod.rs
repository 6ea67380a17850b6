//=========================================================================
// Platform Bridge
//=========================================================================
//
// Bridges platform backends (winit, headless, ...) with core systems.
//
// This module defines the contract between platform implementations and
// the loop driver, so backends can be swapped without touching core
// code.
//
// Components:
// - `interface`: boundary traits, handles and error definitions
//
//=========================================================================

//=== Module Declarations =================================================

pub(crate) mod interface;

//=== Public API ==========================================================

pub use interface::{
    Graphics, ImageHandle, PlatformError, ResourceError, ResourceLoader, Window, WindowSystem,
};
