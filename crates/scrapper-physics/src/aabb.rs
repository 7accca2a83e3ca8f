use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned box in world units.
///
/// Invariant: `min.x <= max.x` and `min.y <= max.y`.
/// The constructor enforces this by swapping components if needed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb2 {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb2 {
    /// Create a box from two corners.
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Create a box from a center point and half-extents.
    pub fn from_center_half_extents(center: Vec2, half: Vec2) -> Self {
        let half = half.abs();
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn half_extents(&self) -> Vec2 {
        (self.max - self.min) * 0.5
    }

    /// True if the boxes overlap or touch along an edge.
    pub fn intersects(&self, other: &Aabb2) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }

    /// True only if the boxes share a region of positive area.
    pub fn overlaps(&self, other: &Aabb2) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }

    /// The box grown by `amount` on every side. Negative values shrink it.
    pub fn inflated(&self, amount: f32) -> Aabb2 {
        Aabb2::new(self.min - Vec2::splat(amount), self.max + Vec2::splat(amount))
    }

    /// The same box moved by `offset`.
    pub fn translated(&self, offset: Vec2) -> Aabb2 {
        Aabb2 {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}
