#[cfg(test)]
#[path = "pose_test.rs"]
mod pose_test;

use crate::consts::{DEFAULT_POSITION, DEFAULT_SCALE, HINGE_OPEN_DEGREES, MAX_SCALE, MIN_SCALE, OPEN_RATE_PER_SEC};

/// A point on the 2-D interaction surface (drag plane or screen).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// A position or direction in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub fn add(self, other: Vec3) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    #[must_use]
    pub fn sub(self, other: Vec3) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    #[must_use]
    pub fn scaled(self, k: f64) -> Self {
        Self::new(self.x * k, self.y * k, self.z * k)
    }

    #[must_use]
    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// Placement of the card in the scene.
///
/// `scale` and `open_amount` are private so every mutation goes through a
/// clamping setter: scale stays in `[MIN_SCALE, MAX_SCALE]` and open-amount in
/// `[0, 1]` regardless of what input produced the change.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// World position of the card's center.
    pub position: Vec3,
    scale: f64,
    open_amount: f64,
    open_target: bool,
}

impl Default for Pose {
    fn default() -> Self {
        let [x, y, z] = DEFAULT_POSITION;
        Self { position: Vec3::new(x, y, z), scale: DEFAULT_SCALE, open_amount: 0.0, open_target: false }
    }
}

impl Pose {
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Set the uniform scale, clamped. Non-finite values are ignored.
    pub fn set_scale(&mut self, scale: f64) {
        if scale.is_finite() {
            self.scale = scale.clamp(MIN_SCALE, MAX_SCALE);
        }
    }

    /// Shift the card within its drag plane. Non-finite deltas are ignored.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        if dx.is_finite() && dy.is_finite() {
            self.position.x += dx;
            self.position.y += dy;
        }
    }

    /// Animation parameter in `[0, 1]`: 0 closed, 1 fully open.
    #[must_use]
    pub fn open_amount(&self) -> f64 {
        self.open_amount
    }

    /// Whether the card is heading toward open (the target, not the current angle).
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open_target
    }

    pub fn set_open(&mut self, open: bool) {
        self.open_target = open;
    }

    /// Flip the open/closed target and return the new target.
    pub fn toggle(&mut self) -> bool {
        self.open_target = !self.open_target;
        self.open_target
    }

    /// Advance open-amount toward the target by `OPEN_RATE_PER_SEC * dt`.
    ///
    /// Negative or non-finite `dt` is treated as zero.
    pub fn advance(&mut self, dt: f64) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let step = OPEN_RATE_PER_SEC * dt;
        self.open_amount = if self.open_target {
            (self.open_amount + step).min(1.0)
        } else {
            (self.open_amount - step).max(0.0)
        };
    }

    /// Front-cover rotation about the vertical axis, in radians (`-openAmount * 180°`).
    #[must_use]
    pub fn hinge_rotation(&self) -> f64 {
        -self.open_amount * HINGE_OPEN_DEGREES.to_radians()
    }
}
