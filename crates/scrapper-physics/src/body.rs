//! Physics body port and a plain 2D body that implements it.

use crate::aabb::Aabb2;
use glam::Vec2;

/// The slice of a physics body the player controller is allowed to touch.
pub trait KinematicBody {
    /// Current velocity.
    fn velocity(&self) -> Vec2;
    /// Overwrite the velocity.
    fn set_velocity(&mut self, velocity: Vec2);
    /// Multiplier applied to world gravity.
    fn gravity_scale(&self) -> f32;
    /// Overwrite the gravity multiplier.
    fn set_gravity_scale(&mut self, scale: f32);
    /// Apply an instantaneous impulse: `velocity += impulse / mass`.
    fn add_impulse(&mut self, impulse: Vec2);
}

/// A box-shaped dynamic body.
#[derive(Debug, Clone, PartialEq)]
pub struct Body2D {
    /// Center of the body in world units.
    pub position: Vec2,
    /// Velocity in units per second.
    pub velocity: Vec2,
    /// Multiplier applied to world gravity.
    pub gravity_scale: f32,
    /// Mass used to turn impulses into velocity changes. Always positive.
    pub mass: f32,
    /// Half width and half height of the body box.
    pub half_extents: Vec2,
}

impl Default for Body2D {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            gravity_scale: 1.0,
            mass: 1.0,
            half_extents: Vec2::new(0.4, 0.9),
        }
    }
}

impl Body2D {
    /// A unit-mass body at `position`.
    #[must_use]
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// World-space box of the body.
    #[must_use]
    pub fn aabb(&self) -> Aabb2 {
        Aabb2::from_center_half_extents(self.position, self.half_extents)
    }

    /// Apply scaled gravity to the velocity for one step of `dt` seconds.
    pub fn integrate(&mut self, dt: f32, gravity: Vec2) {
        self.velocity += gravity * self.gravity_scale * dt;
    }
}

impl KinematicBody for Body2D {
    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    fn gravity_scale(&self) -> f32 {
        self.gravity_scale
    }

    fn set_gravity_scale(&mut self, scale: f32) {
        self.gravity_scale = scale;
    }

    fn add_impulse(&mut self, impulse: Vec2) {
        self.velocity += impulse / self.mass.max(f32::EPSILON);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impulse_divides_by_mass() {
        let mut body = Body2D {
            mass: 2.0,
            velocity: Vec2::new(1.0, 0.0),
            ..Body2D::default()
        };
        body.add_impulse(Vec2::new(10.0, 10.0));
        assert_eq!(body.velocity, Vec2::new(6.0, 5.0));
    }

    #[test]
    fn test_gravity_scaled() {
        let mut body = Body2D::default();
        body.gravity_scale = 0.5;
        body.integrate(0.5, Vec2::new(0.0, -10.0));
        assert_eq!(body.velocity, Vec2::new(0.0, -2.5));

        body.set_gravity_scale(0.0);
        body.integrate(1.0, Vec2::new(0.0, -10.0));
        assert_eq!(body.velocity, Vec2::new(0.0, -2.5));
    }

    #[test]
    fn test_aabb_centered_on_position() {
        let body = Body2D::at(Vec2::new(3.0, 2.0));
        let aabb = body.aabb();
        assert!((aabb.center() - Vec2::new(3.0, 2.0)).length() < 1e-5);
        assert_eq!(aabb.min.y, 2.0 - 0.9);
    }
}
