//! Double-tap detection with duplicate rejection and a post-toggle cooldown.
//!
//! Both the pointer click path and the controller quick-grab path feed the same
//! detector, so a cooldown started by one blocks the other.

#[cfg(test)]
#[path = "tap_test.rs"]
mod tap_test;

use crate::consts::{DOUBLE_TAP_MAX_MS, DOUBLE_TAP_MIN_MS, TOGGLE_COOLDOWN_MS};

/// What a single tap amounted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// Second tap of a pair: the caller should toggle.
    DoubleTap,
    /// Recorded as the reference for a possible second tap.
    Recorded,
    /// Too soon after the reference tap; same physical tap reported twice.
    Duplicate,
    /// A toggle fired recently; the tap is ignored.
    CoolingDown,
}

/// Per-controller double-tap state.
#[derive(Debug, Clone, Copy, Default)]
pub struct TapDetector {
    last_tap_ms: Option<f64>,
    cooldown_until_ms: Option<f64>,
}

impl TapDetector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Timestamp of the reference tap, if one is pending.
    #[must_use]
    pub fn last_tap_ms(&self) -> Option<f64> {
        self.last_tap_ms
    }

    #[must_use]
    pub fn in_cooldown(&self, now_ms: f64) -> bool {
        self.cooldown_until_ms.is_some_and(|until| now_ms < until)
    }

    /// Classify a tap observed at `now_ms` and update the detector.
    pub fn register(&mut self, now_ms: f64) -> TapOutcome {
        if self.in_cooldown(now_ms) {
            return TapOutcome::CoolingDown;
        }
        self.cooldown_until_ms = None;

        let Some(last) = self.last_tap_ms else {
            self.last_tap_ms = Some(now_ms);
            return TapOutcome::Recorded;
        };

        let elapsed = now_ms - last;
        if (0.0..=DOUBLE_TAP_MIN_MS).contains(&elapsed) {
            return TapOutcome::Duplicate;
        }
        if elapsed > DOUBLE_TAP_MIN_MS && elapsed < DOUBLE_TAP_MAX_MS {
            self.last_tap_ms = None;
            self.cooldown_until_ms = Some(now_ms + TOGGLE_COOLDOWN_MS);
            return TapOutcome::DoubleTap;
        }

        // Too slow, or the clock went backwards: start a fresh pair.
        self.last_tap_ms = Some(now_ms);
        TapOutcome::Recorded
    }
}
