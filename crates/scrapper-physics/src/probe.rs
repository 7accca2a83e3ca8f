//! Collision probes and the contact query port.

use crate::layers::LayerMask;
use serde::{Deserialize, Serialize};

/// A collision region attached to the character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Probe {
    /// The whole body.
    Body,
    /// A thin strip under the feet.
    Feet,
}

/// Answers "is this probe touching any of these layers" for the current tick.
pub trait CollisionQuery {
    /// True if `probe` touches a collider on any layer in `mask`.
    fn is_touching(&self, probe: Probe, mask: LayerMask) -> bool;
}

/// Layers each probe touched, sampled once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContactSnapshot {
    /// Layers touching the body probe.
    pub body: LayerMask,
    /// Layers touching the feet probe.
    pub feet: LayerMask,
}

impl ContactSnapshot {
    /// Snapshot with the given contacts.
    #[must_use]
    pub fn new(body: LayerMask, feet: LayerMask) -> Self {
        Self { body, feet }
    }

    /// Contacts of one probe.
    #[must_use]
    pub fn probe(&self, probe: Probe) -> LayerMask {
        match probe {
            Probe::Body => self.body,
            Probe::Feet => self.feet,
        }
    }
}

impl CollisionQuery for ContactSnapshot {
    fn is_touching(&self, probe: Probe, mask: LayerMask) -> bool {
        self.probe(probe).intersects(mask)
    }
}
