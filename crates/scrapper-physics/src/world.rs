//! Static collider world: moves bodies against solid layers and samples
//! probe contacts.
//!
//! Collision response is axis-separated: the body moves along X, is pushed
//! out of any solid collider it now overlaps, then does the same along Y.
//! Landing on a solid collider zeroes vertical velocity.

use crate::aabb::Aabb2;
use crate::body::Body2D;
use crate::layers::{Layer, LayerMask};
use crate::probe::{ContactSnapshot, Probe};
use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Default world gravity in units/s².
pub const DEFAULT_GRAVITY: Vec2 = Vec2::new(0.0, -9.81);

/// Penetration below this depth is treated as touching, not overlapping.
const CONTACT_SKIN: f32 = 1e-4;

/// A static collider on one layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    pub aabb: Aabb2,
    pub layer: Layer,
}

impl Collider {
    pub fn new(aabb: Aabb2, layer: Layer) -> Self {
        Self { aabb, layer }
    }
}

/// Shape of the two character probes relative to the body box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CharacterProbes {
    /// How far the feet strip reaches below the body box.
    pub feet_depth: f32,
    /// Feet strip width as a fraction of the body width.
    pub feet_width_ratio: f32,
}

impl Default for CharacterProbes {
    fn default() -> Self {
        Self {
            feet_depth: 0.05,
            feet_width_ratio: 0.9,
        }
    }
}

impl CharacterProbes {
    /// World-space box of `probe` for `body`.
    #[must_use]
    pub fn probe_box(&self, body: &Body2D, probe: Probe) -> Aabb2 {
        match probe {
            Probe::Body => body.aabb(),
            Probe::Feet => {
                let half = Vec2::new(
                    body.half_extents.x * self.feet_width_ratio,
                    self.feet_depth * 0.5,
                );
                let center = Vec2::new(
                    body.position.x,
                    body.position.y - body.half_extents.y - half.y,
                );
                Aabb2::from_center_half_extents(center, half)
            }
        }
    }
}

/// Static colliders plus world gravity.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactWorld {
    pub gravity: Vec2,
    colliders: Vec<Collider>,
}

impl Default for ContactWorld {
    fn default() -> Self {
        Self::new(DEFAULT_GRAVITY)
    }
}

impl ContactWorld {
    /// An empty world with the given gravity.
    #[must_use]
    pub fn new(gravity: Vec2) -> Self {
        Self {
            gravity,
            colliders: Vec::new(),
        }
    }

    /// Add a static collider.
    pub fn add_collider(&mut self, collider: Collider) {
        self.colliders.push(collider);
    }

    #[must_use]
    pub fn colliders(&self) -> &[Collider] {
        &self.colliders
    }

    /// Integrate gravity, then move `body` by its velocity over `dt` seconds,
    /// resolving overlaps with solid colliders one axis at a time.
    pub fn step_body(&self, body: &mut Body2D, dt: f32) {
        body.integrate(dt, self.gravity);

        body.position.x += body.velocity.x * dt;
        for collider in self.solid_colliders() {
            let aabb = body.aabb().inflated(-CONTACT_SKIN);
            if !aabb.overlaps(&collider.aabb) {
                continue;
            }
            if body.velocity.x > 0.0 {
                body.position.x = collider.aabb.min.x - body.half_extents.x;
            } else {
                body.position.x = collider.aabb.max.x + body.half_extents.x;
            }
            body.velocity.x = 0.0;
        }

        body.position.y += body.velocity.y * dt;
        for collider in self.solid_colliders() {
            let aabb = body.aabb().inflated(-CONTACT_SKIN);
            if !aabb.overlaps(&collider.aabb) {
                continue;
            }
            if body.velocity.y > 0.0 {
                body.position.y = collider.aabb.min.y - body.half_extents.y;
            } else {
                trace!(layer = %collider.layer, y = collider.aabb.max.y, "landed");
                body.position.y = collider.aabb.max.y + body.half_extents.y;
            }
            body.velocity.y = 0.0;
        }
    }

    /// Layers touched by the body and feet probes of `body`.
    #[must_use]
    pub fn sample(&self, body: &Body2D, probes: &CharacterProbes) -> ContactSnapshot {
        let body_box = probes.probe_box(body, Probe::Body);
        let feet_box = probes.probe_box(body, Probe::Feet);

        let mut contacts = ContactSnapshot::default();
        for collider in &self.colliders {
            let mask = LayerMask::from(collider.layer);
            if body_box.intersects(&collider.aabb) {
                contacts.body |= mask;
            }
            if feet_box.intersects(&collider.aabb) {
                contacts.feet |= mask;
            }
        }
        contacts
    }

    fn solid_colliders(&self) -> impl Iterator<Item = &Collider> {
        self.colliders.iter().filter(|c| c.layer.is_solid())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probe::CollisionQuery;

    const DT: f32 = 1.0 / 60.0;

    /// Floor spanning x in [-10, 10] with its top at y = 0.
    fn floor_world() -> ContactWorld {
        let mut world = ContactWorld::default();
        world.add_collider(Collider::new(
            Aabb2::new(Vec2::new(-10.0, -1.0), Vec2::new(10.0, 0.0)),
            Layer::Ground,
        ));
        world
    }

    fn standing_body(x: f32) -> Body2D {
        let body = Body2D::default();
        Body2D::at(Vec2::new(x, body.half_extents.y))
    }

    #[test]
    fn test_falling_body_lands_on_ground() {
        let world = floor_world();
        let mut body = Body2D::at(Vec2::new(0.0, 3.0));
        for _ in 0..240 {
            world.step_body(&mut body, DT);
        }
        assert!((body.aabb().min.y).abs() < 1e-4, "rests on the floor");
        assert_eq!(body.velocity.y, 0.0);
    }

    #[test]
    fn test_resting_body_stays_put() {
        let world = floor_world();
        let mut body = standing_body(1.0);
        for _ in 0..60 {
            world.step_body(&mut body, DT);
        }
        assert!((body.aabb().min.y).abs() < 1e-4);
        assert!((body.position.x - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_feet_touch_ground_when_standing() {
        let world = floor_world();
        let body = standing_body(0.0);
        let contacts = world.sample(&body, &CharacterProbes::default());
        assert!(contacts.is_touching(Probe::Feet, LayerMask::GROUND));
        assert!(!contacts.is_touching(Probe::Feet, LayerMask::CLIMBABLE));
    }

    #[test]
    fn test_airborne_feet_touch_nothing() {
        let world = floor_world();
        let body = Body2D::at(Vec2::new(0.0, 5.0));
        let contacts = world.sample(&body, &CharacterProbes::default());
        assert!(contacts.feet.is_empty());
        assert!(contacts.body.is_empty());
    }

    #[test]
    fn test_wall_blocks_horizontal_motion() {
        let mut world = floor_world();
        world.add_collider(Collider::new(
            Aabb2::new(Vec2::new(2.0, 0.0), Vec2::new(3.0, 5.0)),
            Layer::Ground,
        ));
        let mut body = standing_body(0.0);
        for _ in 0..120 {
            body.velocity.x = 4.5;
            world.step_body(&mut body, DT);
        }
        assert!(body.aabb().max.x <= 2.0 + 1e-4);
    }

    #[test]
    fn test_trigger_layers_do_not_block() {
        let mut world = floor_world();
        world.add_collider(Collider::new(
            Aabb2::new(Vec2::new(-0.5, 0.0), Vec2::new(0.5, 6.0)),
            Layer::Climbable,
        ));
        let mut body = standing_body(0.0);
        body.velocity.x = 3.0;
        world.step_body(&mut body, 0.1);
        assert!(body.position.x > 0.0);
        let contacts = world.sample(&body, &CharacterProbes::default());
        assert!(contacts.is_touching(Probe::Body, LayerMask::CLIMBABLE));
        assert!(contacts.is_touching(Probe::Feet, LayerMask::CLIMBABLE));
    }
}
