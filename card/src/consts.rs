//! Shared numeric constants for the card crate.

// ── Pose ────────────────────────────────────────────────────────

/// Smallest uniform scale the card can be zoomed down to.
pub const MIN_SCALE: f64 = 0.5;

/// Largest uniform scale the card can be zoomed up to.
pub const MAX_SCALE: f64 = 10.0;

/// Scale on mount.
pub const DEFAULT_SCALE: f64 = 1.0;

/// Mount position in world units: one unit up, two units in front of the viewer.
pub const DEFAULT_POSITION: [f64; 3] = [0.0, 1.0, -2.0];

/// Open-amount change per second while animating toward the open/closed target.
pub const OPEN_RATE_PER_SEC: f64 = 2.0;

/// Hinge angle of the front cover when fully open, in degrees.
pub const HINGE_OPEN_DEGREES: f64 = 180.0;

// ── Geometry ────────────────────────────────────────────────────

/// Width of one card panel (front cover or back cover) in world units at scale 1.
pub const CARD_WIDTH: f64 = 0.6;

/// Height of the card in world units at scale 1.
pub const CARD_HEIGHT: f64 = 0.9;

// ── Gestures ────────────────────────────────────────────────────

/// Scale change per wheel delta unit (pixels, positive = scroll down = shrink).
pub const WHEEL_SCALE_STEP: f64 = 0.001;

/// Multiplicative pinch gain per pixel of finger-distance change.
pub const PINCH_SCALE_GAIN: f64 = 0.01;

/// Drag displacement (world units) beyond which a press no longer counts as a click.
pub const DRAG_MOVE_THRESHOLD: f64 = 0.01;

/// Controller travel (world units) beyond which a grab no longer counts as a tap.
pub const GRAB_MOVE_THRESHOLD: f64 = 0.01;

// ── Taps ────────────────────────────────────────────────────────

/// Taps closer together than this are bounced/synthetic duplicates of one tap.
pub const DOUBLE_TAP_MIN_MS: f64 = 30.0;

/// Taps further apart than this are unrelated single taps.
pub const DOUBLE_TAP_MAX_MS: f64 = 600.0;

/// After a toggle, no further toggle fires for this long.
pub const TOGGLE_COOLDOWN_MS: f64 = 500.0;

/// Controller grabs shorter than this are treated as taps.
pub const QUICK_TAP_MS: f64 = 300.0;
