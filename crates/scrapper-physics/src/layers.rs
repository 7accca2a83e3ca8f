//! Named collision layers and layer masks.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named collision category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    /// Walkable floor. Solid.
    Ground,
    /// Spikes and the like: hurts on contact, but can be stood on. Solid.
    Hazards,
    /// Ladders and vines. Not solid.
    Climbable,
    /// Enemy bodies. Not solid.
    Enemy,
}

impl Layer {
    /// All layers in declaration order.
    pub const ALL: [Layer; 4] = [Layer::Ground, Layer::Hazards, Layer::Climbable, Layer::Enemy];

    /// Layer name as used in level files.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Layer::Ground => "Ground",
            Layer::Hazards => "Hazards",
            Layer::Climbable => "Climbable",
            Layer::Enemy => "Enemy",
        }
    }

    /// Whether bodies are pushed out of colliders on this layer.
    #[must_use]
    pub fn is_solid(self) -> bool {
        matches!(self, Layer::Ground | Layer::Hazards)
    }

    /// Single-layer mask.
    #[must_use]
    pub fn mask(self) -> LayerMask {
        match self {
            Layer::Ground => LayerMask::GROUND,
            Layer::Hazards => LayerMask::HAZARDS,
            Layer::Climbable => LayerMask::CLIMBABLE,
            Layer::Enemy => LayerMask::ENEMY,
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Layer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Layer::ALL
            .into_iter()
            .find(|layer| layer.name() == s)
            .ok_or_else(|| format!("unknown layer: {s}"))
    }
}

/// Layer bitflags. Combines via bitwise OR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LayerMask(pub u8);

impl LayerMask {
    /// No layers.
    pub const EMPTY: Self = Self(0);
    /// [`Layer::Ground`].
    pub const GROUND: Self = Self(1 << 0);
    /// [`Layer::Hazards`].
    pub const HAZARDS: Self = Self(1 << 1);
    /// [`Layer::Climbable`].
    pub const CLIMBABLE: Self = Self(1 << 2);
    /// [`Layer::Enemy`].
    pub const ENEMY: Self = Self(1 << 3);

    /// Returns true if `self` contains all bits in `other`.
    #[must_use]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns true if `self` and `other` share any bit.
    #[must_use]
    pub fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns true if no layer bits are set.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The layers present in this mask.
    pub fn layers(self) -> impl Iterator<Item = Layer> {
        Layer::ALL
            .into_iter()
            .filter(move |layer| self.contains(layer.mask()))
    }
}

impl From<Layer> for LayerMask {
    fn from(layer: Layer) -> Self {
        layer.mask()
    }
}

impl std::ops::BitOr for LayerMask {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for LayerMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl std::ops::BitAnd for LayerMask {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}
