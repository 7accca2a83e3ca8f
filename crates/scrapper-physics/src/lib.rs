//! 2D collision layers, character probes, and the physics body port.
//!
//! The player controller only sees two traits from here: [`CollisionQuery`]
//! to ask which layers its probes touch, and [`KinematicBody`] to read and
//! write velocity and gravity. [`ContactWorld`] and [`Body2D`] are a small
//! box-collider implementation of both, enough to run the controller
//! headless.

pub mod aabb;
pub mod body;
pub mod layers;
pub mod probe;
pub mod world;

pub use aabb::Aabb2;
pub use body::{Body2D, KinematicBody};
pub use layers::{Layer, LayerMask};
pub use probe::{CollisionQuery, ContactSnapshot, Probe};
pub use world::{CharacterProbes, Collider, ContactWorld, DEFAULT_GRAVITY};
