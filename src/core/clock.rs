//=========================================================================
// Clock
//=========================================================================
//
// Fixed-cadence tick source for the loop driver.
//
// Architecture:
//   Ticker::start(interval) → crossbeam tick channel → wait() → Instant
//                                                              ↓
//                                               Tick::since(previous)
//
// Ticks are not perfectly periodic. Consumers compute the measured delta
// from the previous tick instead of assuming the nominal interval.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::time::{Duration, Instant};

use crossbeam_channel::{never, tick, Receiver};
use log::{debug, trace};

//=== Tick ================================================================

/// One fixed-cadence step of the game loop.
///
/// Carries the instant the tick fired and the wall-clock time elapsed
/// since the previous tick. `delta` is measured, so states must treat it
/// as variable (but bounded by the scheduler's jitter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Instant at which the ticker fired.
    pub time: Instant,

    /// Elapsed time since the previous tick.
    pub delta: Duration,
}

impl Tick {
    /// Builds a tick from its firing instant and the previous tick's instant.
    ///
    /// A `previous` later than `time` yields a zero delta rather than
    /// panicking.
    pub fn since(time: Instant, previous: Instant) -> Self {
        Self {
            time,
            delta: time.saturating_duration_since(previous),
        }
    }
}

//=== Ticker ==============================================================

/// Emits tick instants at a configured frequency until stopped.
///
/// Backed by [`crossbeam_channel::tick`]. Stopping swaps the receiver for
/// [`crossbeam_channel::never`], which releases the timer and makes any
/// further [`Ticker::wait`] return `None` immediately.
pub struct Ticker {
    receiver: Receiver<Instant>,
    interval: Duration,
    started: Instant,
    running: bool,
}

impl Ticker {
    //--- Construction -----------------------------------------------------

    /// Starts emitting ticks every `interval`.
    ///
    /// # Panics
    ///
    /// Panics if `interval` is zero.
    pub fn start(interval: Duration) -> Self {
        assert!(!interval.is_zero(), "Tick interval must be positive");
        debug!(target: "clock", "Ticker started (interval: {:?})", interval);

        Self {
            started: Instant::now(),
            receiver: tick(interval),
            interval,
            running: true,
        }
    }

    //--- Emission ---------------------------------------------------------

    /// Blocks until the next tick fires and returns its instant.
    ///
    /// Returns `None` once the ticker has been stopped.
    pub fn wait(&self) -> Option<Instant> {
        if !self.running {
            return None;
        }

        match self.receiver.recv() {
            Ok(instant) => {
                trace!(target: "clock", "Tick at {:?}", instant);
                Some(instant)
            }
            Err(_) => None,
        }
    }

    /// Halts emission and releases the underlying timer.
    ///
    /// Stopping an already stopped ticker is a no-op.
    pub fn stop(&mut self) {
        if self.running {
            self.receiver = never();
            self.running = false;
            debug!(target: "clock", "Ticker stopped");
        }
    }

    //--- Queries ----------------------------------------------------------

    /// Nominal interval between ticks.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Instant the ticker started; the first tick fires one interval later.
    pub fn started(&self) -> Instant {
        self.started
    }

    /// Whether the ticker is still emitting.
    pub fn is_running(&self) -> bool {
        self.running
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
