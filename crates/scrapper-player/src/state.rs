//! Player state enum, events, and the read-only snapshot.

use serde::{Deserialize, Serialize};

/// The behavior state of the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PlayerState {
    /// Free to move, jump, punch, climb and take damage.
    #[default]
    Normal,
    /// Knocked back after a hit.
    Staggered,
    /// Ground punch in progress.
    Punching,
    /// Air punch in progress.
    AirPunching,
    /// Terminal.
    Dead,
}

impl PlayerState {
    /// A timed action owns the player; ordinary input is ignored.
    #[must_use]
    pub fn is_busy(self) -> bool {
        matches!(
            self,
            PlayerState::Staggered | PlayerState::Punching | PlayerState::AirPunching
        )
    }
}

/// The three timed, non-interruptible actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Punch,
    AirPunch,
    Stagger,
}

impl ActionKind {
    /// State held while the action runs.
    #[must_use]
    pub fn state(self) -> PlayerState {
        match self {
            ActionKind::Punch => PlayerState::Punching,
            ActionKind::AirPunch => PlayerState::AirPunching,
            ActionKind::Stagger => PlayerState::Staggered,
        }
    }
}

/// Something that happened during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    Jumped,
    Punched,
    AirPunched,
    /// Health after the hit.
    Hurt { health: i32 },
    /// A punch, air punch, or stagger ran its full length.
    ActionEnded(ActionKind),
    InvulnerabilityEnded,
    Died,
}

/// Read-only view for logs and HUDs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub health: i32,
    pub state: PlayerState,
    pub invulnerable: bool,
    pub alive: bool,
}
