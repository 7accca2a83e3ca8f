//! Key state sampled once per simulation tick.
//!
//! Scripted or host key events land in [`KeyboardState`] between ticks. The
//! player reads held keys for movement and press edges for jump and punch,
//! then the host clears the edges before the next tick.
//!
//! Keys are physical codes, so bindings ignore the keyboard layout.

use std::collections::HashSet;
use winit::event::ElementState;
use winit::keyboard::PhysicalKey;

/// One key transition fed to [`KeyboardState::process_raw`].
#[derive(Debug, Clone, Copy)]
pub struct RawKeyEvent {
    /// The physical key involved.
    pub key: PhysicalKey,
    /// Whether the key was pressed or released.
    pub state: ElementState,
    /// Whether this is a repeat event.
    pub repeat: bool,
}

impl RawKeyEvent {
    /// A non-repeat press or release of `key`.
    #[must_use]
    pub fn new(key: PhysicalKey, pressed: bool) -> Self {
        Self {
            key,
            state: if pressed {
                ElementState::Pressed
            } else {
                ElementState::Released
            },
            repeat: false,
        }
    }
}

/// Held keys plus the press and release edges of the current tick.
#[derive(Debug, Clone, Default)]
pub struct KeyboardState {
    pressed: HashSet<PhysicalKey>,
    just_pressed: HashSet<PhysicalKey>,
    just_released: HashSet<PhysicalKey>,
}

impl KeyboardState {
    /// Creates a new `KeyboardState` with no keys pressed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Processes a [`RawKeyEvent`]. Repeat events are ignored.
    pub fn process_raw(&mut self, event: RawKeyEvent) {
        if event.repeat {
            return;
        }
        match event.state {
            ElementState::Pressed => {
                if self.pressed.insert(event.key) {
                    self.just_pressed.insert(event.key);
                }
            }
            ElementState::Released => {
                if self.pressed.remove(&event.key) {
                    self.just_released.insert(event.key);
                }
            }
        }
    }

    /// Returns `true` while the key is held down.
    #[must_use]
    pub fn is_pressed(&self, key: PhysicalKey) -> bool {
        self.pressed.contains(&key)
    }

    /// Pressed since the last [`clear_transients`](Self::clear_transients).
    #[must_use]
    pub fn just_pressed(&self, key: PhysicalKey) -> bool {
        self.just_pressed.contains(&key)
    }

    /// Released since the last [`clear_transients`](Self::clear_transients).
    #[must_use]
    pub fn just_released(&self, key: PhysicalKey) -> bool {
        self.just_released.contains(&key)
    }

    /// Drop the edges once the tick has read them.
    pub fn clear_transients(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode;

    fn raw(code: KeyCode, state: ElementState, repeat: bool) -> RawKeyEvent {
        RawKeyEvent {
            key: PhysicalKey::Code(code),
            state,
            repeat,
        }
    }

    #[test]
    fn test_initial_state_no_keys_pressed() {
        let kb = KeyboardState::new();
        for k in [KeyCode::KeyA, KeyCode::KeyD, KeyCode::Space, KeyCode::KeyJ] {
            let pk = PhysicalKey::Code(k);
            assert!(!kb.is_pressed(pk));
            assert!(!kb.just_pressed(pk));
            assert!(!kb.just_released(pk));
        }
    }

    #[test]
    fn test_press_event_sets_pressed() {
        let mut kb = KeyboardState::new();
        kb.process_raw(raw(KeyCode::Space, ElementState::Pressed, false));
        let pk = PhysicalKey::Code(KeyCode::Space);
        assert!(kb.is_pressed(pk));
        assert!(kb.just_pressed(pk));
    }

    #[test]
    fn test_release_clears_pressed() {
        let mut kb = KeyboardState::new();
        kb.process_raw(raw(KeyCode::KeyD, ElementState::Pressed, false));
        kb.process_raw(raw(KeyCode::KeyD, ElementState::Released, false));
        let pk = PhysicalKey::Code(KeyCode::KeyD);
        assert!(!kb.is_pressed(pk));
        assert!(kb.just_released(pk));
    }

    #[test]
    fn test_press_edge_lasts_one_tick() {
        let mut kb = KeyboardState::new();
        kb.process_raw(RawKeyEvent::new(PhysicalKey::Code(KeyCode::KeyJ), true));
        let pk = PhysicalKey::Code(KeyCode::KeyJ);
        assert!(kb.just_pressed(pk));
        kb.clear_transients();
        assert!(!kb.just_pressed(pk));
        assert!(kb.is_pressed(pk));
    }

    #[test]
    fn test_release_of_unpressed_key_is_not_an_edge() {
        let mut kb = KeyboardState::new();
        kb.process_raw(raw(KeyCode::KeyA, ElementState::Released, false));
        assert!(!kb.just_released(PhysicalKey::Code(KeyCode::KeyA)));
    }

    #[test]
    fn test_repeat_events_ignored() {
        let mut kb = KeyboardState::new();
        kb.process_raw(raw(KeyCode::KeyA, ElementState::Pressed, false));
        kb.clear_transients();
        kb.process_raw(raw(KeyCode::KeyA, ElementState::Pressed, true));
        let pk = PhysicalKey::Code(KeyCode::KeyA);
        assert!(!kb.just_pressed(pk));
        assert!(kb.is_pressed(pk));
    }
}
