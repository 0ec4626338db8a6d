//! Time source for tap windows, cooldowns and draft timestamps.
//!
//! Gesture timing is evaluated by comparing wall-clock reads, never by
//! scheduling callbacks. Injecting the clock lets tests and replays supply
//! synthetic time instead of sleeping.

use std::cell::Cell;
use std::rc::Rc;

/// A millisecond wall clock.
pub trait Clock {
    /// Milliseconds since the Unix epoch (or any fixed origin for synthetic clocks).
    fn now_ms(&self) -> f64;
}

/// Browser `Date.now()` on wasm, `SystemTime` elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        #[cfg(target_arch = "wasm32")]
        {
            js_sys::Date::now()
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map_or(0.0, |d| d.as_secs_f64() * 1000.0)
        }
    }
}

/// A hand-driven clock. Clones share the same time, so a test can keep one
/// handle while the controller owns another.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Rc<Cell<f64>>,
}

impl ManualClock {
    #[must_use]
    pub fn new(start_ms: f64) -> Self {
        Self { now: Rc::new(Cell::new(start_ms)) }
    }

    pub fn set(&self, now_ms: f64) {
        self.now.set(now_ms);
    }

    pub fn advance(&self, delta_ms: f64) {
        self.now.set(self.now.get() + delta_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}
