#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::{CARD_HEIGHT, CARD_WIDTH};
use crate::pose::{Pose, Vec3};

/// Below this, a ray is treated as parallel to the card plane.
const PARALLEL_EPSILON: f64 = 1e-9;

/// A ray cast from a spatial controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    #[must_use]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }
}

/// World-space rectangle covered by the card, in the plane `z`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardBounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub z: f64,
}

impl CardBounds {
    #[must_use]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

/// Bounds of the card for `pose`, including the swung-out front cover.
///
/// The back cover spans `[-w/2, w/2]` around the center. The front cover is
/// hinged at the left edge and, past 90°, reaches further left to
/// `-w/2 + w·cos θ`.
#[must_use]
pub fn card_bounds(pose: &Pose) -> CardBounds {
    let half_w = CARD_WIDTH / 2.0;
    let half_h = CARD_HEIGHT / 2.0;
    let theta = -pose.hinge_rotation();
    let cover_edge = -half_w + CARD_WIDTH * theta.cos();
    let left = cover_edge.min(-half_w);

    let s = pose.scale();
    let c = pose.position;
    CardBounds {
        min_x: c.x + left * s,
        max_x: c.x + half_w * s,
        min_y: c.y - half_h * s,
        max_y: c.y + half_h * s,
        z: c.z,
    }
}

/// Whether `ray` meets the card in front of its origin.
#[must_use]
pub fn ray_hits_card(ray: &Ray, pose: &Pose) -> bool {
    if !ray.origin.is_finite() || !ray.direction.is_finite() {
        return false;
    }
    if ray.direction.z.abs() < PARALLEL_EPSILON {
        return false;
    }

    let bounds = card_bounds(pose);
    let t = (bounds.z - ray.origin.z) / ray.direction.z;
    if t < 0.0 {
        return false;
    }

    let hit = ray.origin.add(ray.direction.scaled(t));
    bounds.contains(hit.x, hit.y)
}
