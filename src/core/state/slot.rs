//=========================================================================
// State Slot
//=========================================================================
//
// The single value shared between the loop driver and the input path.
//
// Architecture:
//   Engine ──install/take/with_current──┐
//                                       ├─► Arc<Mutex<Option<Box<dyn State>>>>
//   InputDispatcher ──with_current──────┘
//
// The slot is empty while a transition is in flight (between unload of
// the old state and the end of load of the new one). Events observed in
// that window are dropped, never misrouted to an unloaded state.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

//=== Internal Dependencies ===============================================

use super::State;

//=== StateSlot ===========================================================

/// Shared single slot holding the live state, if any.
///
/// Cloning the slot clones the handle, not the state.
#[derive(Clone, Default)]
pub struct StateSlot {
    inner: Arc<Mutex<Option<Box<dyn State>>>>,
}

impl StateSlot {
    /// Creates an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    //--- Driver Side ------------------------------------------------------

    /// Makes `state` the live state, returning the previous occupant.
    pub(crate) fn install(&self, state: Box<dyn State>) -> Option<Box<dyn State>> {
        self.lock().replace(state)
    }

    /// Removes and returns the live state, leaving the slot empty.
    pub(crate) fn take(&self) -> Option<Box<dyn State>> {
        self.lock().take()
    }

    //--- Shared Access ----------------------------------------------------

    /// Runs `f` on the live state while holding the slot.
    ///
    /// Returns `None` without calling `f` if the slot is empty.
    pub fn with_current<R>(&self, f: impl FnOnce(&mut dyn State) -> R) -> Option<R> {
        let mut guard = self.lock();
        guard.as_mut().map(|state| f(state.as_mut()))
    }

    /// Whether a state is currently live.
    pub fn is_occupied(&self) -> bool {
        self.lock().is_some()
    }

    //--- Internal Helpers -------------------------------------------------

    // A panic inside a state callback poisons the lock; the slot itself is
    // still consistent, so keep using it.
    fn lock(&self) -> MutexGuard<'_, Option<Box<dyn State>>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
