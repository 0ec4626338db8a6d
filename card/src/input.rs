//! Input model: event payloads, input regimes, and the gesture state machine.
//!
//! Pointer, touch and spatial-controller events carry different fields, so they
//! arrive as one tagged union, [`InputEvent`], and the controller dispatches on
//! it once. `Session` is the drag gesture tracked between pointer-down and
//! pointer-up; `Hold` is the controller grab tracked between select-start and
//! select-end.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::hit::Ray;
use crate::pose::{Point, Vec3};

/// Identifies a spatial controller (hand or tracked input source).
pub type ControllerId = u32;

/// Which input regime is live. The two are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Desktop/mobile 2-D surface: pointer, touch and wheel.
    #[default]
    Surface,
    /// Immersive session: spatial-controller raycasts (touch pinch still works).
    Immersive,
}

/// Mouse/pen/primary-touch events. Points are on the drag plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down { point: Point },
    Move { point: Point },
    Up,
    Click,
    Wheel { delta_y: f64 },
}

/// Multi-touch events. Touch points are in screen pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum TouchEvent {
    Start { touches: Vec<Point> },
    Move { touches: Vec<Point> },
    End { remaining: usize },
}

impl TouchEvent {
    /// Number of fingers down after this event.
    #[must_use]
    pub fn active_count(&self) -> usize {
        match self {
            Self::Start { touches } | Self::Move { touches } => touches.len(),
            Self::End { remaining } => *remaining,
        }
    }
}

/// Distance between the first two touches, if there are at least two.
#[must_use]
pub fn pinch_distance(touches: &[Point]) -> Option<f64> {
    match touches {
        [a, b, ..] => Some(a.distance_to(*b)),
        _ => None,
    }
}

/// Spatial-controller events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerEvent {
    /// Trigger pressed. `ray` is the controller's pointing ray, `grip` its position.
    SelectStart { controller: ControllerId, ray: Ray, grip: Vec3 },
    /// Controller moved.
    Move { controller: ControllerId, grip: Vec3 },
    /// Trigger released.
    SelectEnd { controller: ControllerId },
}

/// Every input the card controller accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Pointer(PointerEvent),
    Touch(TouchEvent),
    Controller(ControllerEvent),
}

impl From<PointerEvent> for InputEvent {
    fn from(ev: PointerEvent) -> Self {
        Self::Pointer(ev)
    }
}

impl From<TouchEvent> for InputEvent {
    fn from(ev: TouchEvent) -> Self {
        Self::Touch(ev)
    }
}

impl From<ControllerEvent> for InputEvent {
    fn from(ev: ControllerEvent) -> Self {
        Self::Controller(ev)
    }
}

/// A pointer drag in progress.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Session {
    /// No pointer is down.
    #[default]
    Idle,
    /// The card follows the pointer.
    Dragging {
        /// Where the press landed; displacement is measured from here.
        origin: Point,
        /// Previous sample. `None` after a touch-count change, so the next
        /// move re-seeds instead of jumping.
        last: Option<Point>,
    },
}

/// Who the card is attached to.
///
/// While held, the card's position is expressed relative to the grabbing
/// controller (`grip + offset`); on release it is committed back to world
/// space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Hold {
    #[default]
    Free,
    HeldBy {
        controller: ControllerId,
        /// Card position minus controller position at grab time.
        offset: Vec3,
        /// Controller position at grab time.
        start_grip: Vec3,
        /// Latest controller position.
        grip: Vec3,
        /// Clock reading at select-start.
        since_ms: f64,
    },
}

impl Hold {
    #[must_use]
    pub fn is_held(&self) -> bool {
        matches!(self, Self::HeldBy { .. })
    }

    /// The controller holding the card, if any.
    #[must_use]
    pub fn holder(&self) -> Option<ControllerId> {
        match self {
            Self::Free => None,
            Self::HeldBy { controller, .. } => Some(*controller),
        }
    }
}
