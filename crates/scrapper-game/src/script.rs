//! Scripted keyboard input for headless runs.
//!
//! A script is a list of `(tick, key, pressed)` events in RON. Key names are
//! winit `KeyCode` variant names (`"KeyD"`, `"Space"`).

use crate::error::GameError;
use crate::level::read_ron;
use scrapper_input::{KeyboardState, RawKeyEvent, key_from_name};
use serde::{Deserialize, Serialize};
use std::path::Path;
use winit::keyboard::{KeyCode, PhysicalKey};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptEvent {
    pub tick: u64,
    pub key: String,
    pub pressed: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputScript {
    pub events: Vec<ScriptEvent>,
}

impl InputScript {
    pub fn load(path: &Path) -> Result<Self, GameError> {
        read_ron(path)
    }

    /// Walk right, jump, punch on the ground, climb the ladder, then walk
    /// back left across the spikes.
    #[must_use]
    pub fn demo() -> Self {
        let mut script = Self::default();
        script.hold("KeyD", 10, 60);
        script.tap("Space", 80);
        script.tap("KeyJ", 140);
        script.hold("KeyD", 210, 240);
        script.hold("KeyW", 240, 300);
        script.hold("KeyD", 290, 320);
        script.tap("KeyJ", 305);
        script.hold("KeyA", 400, 560);
        script
    }

    /// Press `key` at `from` and release it at `to`.
    pub fn hold(&mut self, key: &str, from: u64, to: u64) {
        self.push(from, key, true);
        self.push(to, key, false);
    }

    /// Press `key` for a single tick.
    pub fn tap(&mut self, key: &str, tick: u64) {
        self.hold(key, tick, tick + 1);
    }

    fn push(&mut self, tick: u64, key: &str, pressed: bool) {
        self.events.push(ScriptEvent {
            tick,
            key: key.to_string(),
            pressed,
        });
    }

    /// Resolve key names and order events by tick.
    pub fn compile(&self) -> Result<ScriptPlayer, GameError> {
        let mut events = self
            .events
            .iter()
            .enumerate()
            .map(|(index, event)| {
                key_from_name(&event.key)
                    .map(|code| (event.tick, code, event.pressed))
                    .ok_or_else(|| {
                        GameError::InvalidScript(format!(
                            "event {index}: unknown key {:?}",
                            event.key
                        ))
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        // Stable, so same-tick events keep file order.
        events.sort_by_key(|(tick, _, _)| *tick);
        Ok(ScriptPlayer { events, cursor: 0 })
    }
}

/// Feeds compiled script events into a [`KeyboardState`] tick by tick.
#[derive(Debug, Clone)]
pub struct ScriptPlayer {
    events: Vec<(u64, KeyCode, bool)>,
    cursor: usize,
}

impl ScriptPlayer {
    /// Apply every event scheduled at or before `tick` that has not run yet.
    /// Returns how many were applied.
    pub fn apply(&mut self, tick: u64, keyboard: &mut KeyboardState) -> usize {
        let start = self.cursor;
        while let Some(&(at, code, pressed)) = self.events.get(self.cursor)
            && at <= tick
        {
            keyboard.process_raw(RawKeyEvent::new(PhysicalKey::Code(code), pressed));
            self.cursor += 1;
        }
        self.cursor - start
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.events.len()
    }

    /// Tick of the last scripted event.
    pub fn last_tick(&self) -> Option<u64> {
        self.events.last().map(|(tick, _, _)| *tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> PhysicalKey {
        PhysicalKey::Code(code)
    }

    #[test]
    fn test_demo_compiles() {
        let player = InputScript::demo().compile().unwrap();
        assert_eq!(player.last_tick(), Some(560));
        assert!(!player.is_finished());
    }

    #[test]
    fn test_events_applied_on_their_tick() {
        let mut script = InputScript::default();
        script.hold("KeyD", 2, 4);
        let mut player = script.compile().unwrap();
        let mut keyboard = KeyboardState::new();

        assert_eq!(player.apply(0, &mut keyboard), 0);
        assert_eq!(player.apply(1, &mut keyboard), 0);
        assert_eq!(player.apply(2, &mut keyboard), 1);
        assert!(keyboard.just_pressed(key(KeyCode::KeyD)));
        keyboard.clear_transients();

        player.apply(3, &mut keyboard);
        assert!(keyboard.is_pressed(key(KeyCode::KeyD)));
        player.apply(4, &mut keyboard);
        assert!(!keyboard.is_pressed(key(KeyCode::KeyD)));
        assert!(player.is_finished());
    }

    #[test]
    fn test_out_of_order_events_sorted() {
        let script = InputScript {
            events: vec![
                ScriptEvent {
                    tick: 9,
                    key: "Space".to_string(),
                    pressed: true,
                },
                ScriptEvent {
                    tick: 1,
                    key: "KeyJ".to_string(),
                    pressed: true,
                },
            ],
        };
        let mut player = script.compile().unwrap();
        let mut keyboard = KeyboardState::new();
        player.apply(1, &mut keyboard);
        assert!(keyboard.is_pressed(key(KeyCode::KeyJ)));
        assert!(!keyboard.is_pressed(key(KeyCode::Space)));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let mut script = InputScript::default();
        script.tap("KeyD", 0);
        script.tap("Banana", 3);
        let err = script.compile().unwrap_err();
        assert!(matches!(err, GameError::InvalidScript(ref msg) if msg.contains("Banana")));
    }

    #[test]
    fn test_parse_ron_script() {
        let src = r#"(events: [
            (tick: 0, key: "KeyD", pressed: true),
            (tick: 30, key: "KeyD", pressed: false),
        ])"#;
        let script: InputScript = ron::from_str(src).unwrap();
        assert_eq!(script.events.len(), 2);
        assert!(script.compile().is_ok());
    }
}
