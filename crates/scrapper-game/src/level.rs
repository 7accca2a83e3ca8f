//! Level description: spawn point, gravity and static colliders.
//!
//! Levels are RON files. Colliders name their layer by string so a typo is
//! reported with the collider index instead of a bare parse error.

use crate::error::GameError;
use glam::Vec2;
use scrapper_physics::{Aabb2, Body2D, Collider, ContactWorld, DEFAULT_GRAVITY, Layer};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One axis-aligned box on a named layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColliderDesc {
    pub layer: String,
    pub min: Vec2,
    pub max: Vec2,
}

impl ColliderDesc {
    fn new(layer: Layer, min: Vec2, max: Vec2) -> Self {
        Self {
            layer: layer.name().to_string(),
            min,
            max,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelDesc {
    pub name: String,
    /// Center of the player body at spawn.
    pub spawn: Vec2,
    pub gravity: Vec2,
    /// Gravity scale of the player body at spawn.
    pub gravity_scale: f32,
    /// Falling below this height kills the player.
    pub kill_y: Option<f32>,
    pub colliders: Vec<ColliderDesc>,
}

impl Default for LevelDesc {
    /// A small test yard: a floor with a spike strip, a ladder up to a
    /// ledge, and an enemy standing at the far end.
    fn default() -> Self {
        Self {
            name: "yard".to_string(),
            spawn: Vec2::new(0.0, 0.9),
            gravity: DEFAULT_GRAVITY,
            gravity_scale: 2.0,
            kill_y: Some(-20.0),
            colliders: vec![
                ColliderDesc::new(Layer::Ground, Vec2::new(-20.0, -1.0), Vec2::new(20.0, 0.0)),
                ColliderDesc::new(Layer::Hazards, Vec2::new(-5.0, 0.0), Vec2::new(-3.0, 0.2)),
                ColliderDesc::new(Layer::Climbable, Vec2::new(6.0, 0.0), Vec2::new(7.0, 6.0)),
                ColliderDesc::new(Layer::Ground, Vec2::new(7.0, 5.5), Vec2::new(12.0, 6.0)),
                ColliderDesc::new(Layer::Enemy, Vec2::new(14.0, 0.0), Vec2::new(15.0, 1.8)),
            ],
        }
    }
}

impl LevelDesc {
    /// Load a level from a RON file.
    pub fn load(path: &Path) -> Result<Self, GameError> {
        read_ron(path)
    }

    /// Build the collider world, checking layer names and box extents.
    pub fn build_world(&self) -> Result<ContactWorld, GameError> {
        let mut world = ContactWorld::new(self.gravity);
        for (index, desc) in self.colliders.iter().enumerate() {
            let layer: Layer = desc
                .layer
                .parse()
                .map_err(|err| GameError::InvalidLevel(format!("collider {index}: {err}")))?;
            if desc.min.cmpgt(desc.max).any() {
                return Err(GameError::InvalidLevel(format!(
                    "collider {index}: min {} exceeds max {}",
                    desc.min, desc.max
                )));
            }
            world.add_collider(Collider::new(Aabb2::new(desc.min, desc.max), layer));
        }
        Ok(world)
    }

    /// The player body at the spawn point.
    #[must_use]
    pub fn spawn_body(&self) -> Body2D {
        Body2D {
            gravity_scale: self.gravity_scale,
            ..Body2D::at(self.spawn)
        }
    }
}

/// Read and deserialize a RON file.
pub(crate) fn read_ron<T: DeserializeOwned>(path: &Path) -> Result<T, GameError> {
    let contents = std::fs::read_to_string(path).map_err(|source| GameError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    ron::from_str(&contents).map_err(|source| GameError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_level_builds() {
        let level = LevelDesc::default();
        let world = level.build_world().unwrap();
        assert_eq!(world.colliders().len(), level.colliders.len());
        assert_eq!(world.gravity, DEFAULT_GRAVITY);
        let body = level.spawn_body();
        assert_eq!(body.position, level.spawn);
        assert_eq!(body.gravity_scale, 2.0);
    }

    #[test]
    fn test_parse_ron_level() {
        let ron_src = r#"(
            name: "pit",
            spawn: (1.0, 2.0),
            colliders: [
                (layer: "Ground", min: (-5.0, -1.0), max: (5.0, 0.0)),
                (layer: "Climbable", min: (2.0, 0.0), max: (3.0, 4.0)),
            ],
        )"#;
        let level: LevelDesc = ron::from_str(ron_src).unwrap();
        assert_eq!(level.name, "pit");
        assert_eq!(level.spawn, Vec2::new(1.0, 2.0));
        // Missing fields fall back to the defaults.
        assert_eq!(level.gravity, DEFAULT_GRAVITY);
        assert_eq!(level.kill_y, Some(-20.0));

        let world = level.build_world().unwrap();
        assert_eq!(world.colliders()[1].layer, Layer::Climbable);
    }

    #[test]
    fn test_unknown_layer_rejected() {
        let level = LevelDesc {
            colliders: vec![ColliderDesc {
                layer: "Lava".to_string(),
                min: Vec2::ZERO,
                max: Vec2::ONE,
            }],
            ..LevelDesc::default()
        };
        let err = level.build_world().unwrap_err();
        assert!(matches!(err, GameError::InvalidLevel(ref msg) if msg.contains("Lava")));
    }

    #[test]
    fn test_inverted_box_rejected() {
        let level = LevelDesc {
            colliders: vec![ColliderDesc::new(Layer::Ground, Vec2::ONE, Vec2::ZERO)],
            ..LevelDesc::default()
        };
        assert!(matches!(level.build_world(), Err(GameError::InvalidLevel(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let err = LevelDesc::load(Path::new("/nonexistent/level.ron")).unwrap_err();
        assert!(matches!(err, GameError::Read { .. }));
    }
}
