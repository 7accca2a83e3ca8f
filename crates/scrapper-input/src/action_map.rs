//! Action mapping: maps the player's named controls to physical keys.
//!
//! [`InputMap`] defines which keys drive which [`Action`]. Buttons (`Jump`,
//! `Punch`) read 0 or 1; axes (`Horizontal`, `Vertical`) read -1, 0 or 1 from
//! a pair of keys. [`ActionState`] is recomputed each tick by
//! [`ActionResolver`] and keeps the previous tick's values for edge detection.

use crate::keyboard::KeyboardState;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::warn;
use winit::keyboard::{KeyCode, PhysicalKey};

/// Serde helper module for [`KeyCode`] which doesn't implement serde natively.
mod keycode_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use winit::keyboard::KeyCode;

    /// Serialize a [`KeyCode`] as its debug string (e.g., `"KeyW"`).
    pub fn serialize<S: Serializer>(code: &KeyCode, s: S) -> Result<S::Ok, S::Error> {
        format!("{code:?}").serialize(s)
    }

    /// Deserialize a [`KeyCode`] from its debug string.
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<KeyCode, D::Error> {
        let name = String::deserialize(d)?;
        super::key_from_name(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown key: {name}")))
    }
}

/// Look up a [`KeyCode`] by the name of its variant (e.g. `"KeyJ"`, `"Space"`).
#[must_use]
pub fn key_from_name(s: &str) -> Option<KeyCode> {
    Some(match s {
        "KeyA" => KeyCode::KeyA,
        "KeyB" => KeyCode::KeyB,
        "KeyC" => KeyCode::KeyC,
        "KeyD" => KeyCode::KeyD,
        "KeyE" => KeyCode::KeyE,
        "KeyF" => KeyCode::KeyF,
        "KeyG" => KeyCode::KeyG,
        "KeyH" => KeyCode::KeyH,
        "KeyI" => KeyCode::KeyI,
        "KeyJ" => KeyCode::KeyJ,
        "KeyK" => KeyCode::KeyK,
        "KeyL" => KeyCode::KeyL,
        "KeyM" => KeyCode::KeyM,
        "KeyN" => KeyCode::KeyN,
        "KeyO" => KeyCode::KeyO,
        "KeyP" => KeyCode::KeyP,
        "KeyQ" => KeyCode::KeyQ,
        "KeyR" => KeyCode::KeyR,
        "KeyS" => KeyCode::KeyS,
        "KeyT" => KeyCode::KeyT,
        "KeyU" => KeyCode::KeyU,
        "KeyV" => KeyCode::KeyV,
        "KeyW" => KeyCode::KeyW,
        "KeyX" => KeyCode::KeyX,
        "KeyY" => KeyCode::KeyY,
        "KeyZ" => KeyCode::KeyZ,
        "Space" => KeyCode::Space,
        "Enter" => KeyCode::Enter,
        "ShiftLeft" => KeyCode::ShiftLeft,
        "ControlLeft" => KeyCode::ControlLeft,
        "ArrowUp" => KeyCode::ArrowUp,
        "ArrowDown" => KeyCode::ArrowDown,
        "ArrowLeft" => KeyCode::ArrowLeft,
        "ArrowRight" => KeyCode::ArrowRight,
        _ => return None,
    })
}

/// The player's named controls.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Horizontal movement axis, left negative.
    Horizontal,
    /// Vertical climbing axis, down negative.
    Vertical,
    /// Jump button.
    Jump,
    /// Punch button (ground or air punch depending on contact).
    Punch,
}

impl Action {
    /// All actions in declaration order.
    pub const ALL: [Action; 4] = [
        Action::Horizontal,
        Action::Vertical,
        Action::Jump,
        Action::Punch,
    ];

    /// The control name used in config files.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Action::Horizontal => "Horizontal",
            Action::Vertical => "Vertical",
            Action::Jump => "Jump",
            Action::Punch => "Punch",
        }
    }

    /// Whether this action is an analog axis rather than a button.
    #[must_use]
    pub fn is_axis(self) -> bool {
        matches!(self, Action::Horizontal | Action::Vertical)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::ALL
            .into_iter()
            .find(|a| a.name() == s)
            .ok_or_else(|| format!("unknown action: {s}"))
    }
}

/// A physical input source that can be bound to an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputBinding {
    /// A single key; reads 1.0 while held.
    Key(#[serde(with = "keycode_serde")] KeyCode),
    /// A key pair forming an axis; reads -1.0, 0.0 or 1.0.
    KeyAxis {
        /// Key driving the axis toward -1.
        #[serde(with = "keycode_serde")]
        negative: KeyCode,
        /// Key driving the axis toward +1.
        #[serde(with = "keycode_serde")]
        positive: KeyCode,
    },
}

/// Maps [`Action`]s to lists of [`InputBinding`]s.
///
/// Multiple bindings per action are summed and clamped, which gives OR logic
/// for buttons. Serializable to RON for user-editable config files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputMap {
    /// The binding table.
    pub bindings: HashMap<Action, Vec<InputBinding>>,
}

impl Default for InputMap {
    fn default() -> Self {
        Self::default_platformer()
    }
}

impl InputMap {
    /// Create an empty input map with no bindings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Default bindings: A/D and arrows to move, W/S and arrows to climb,
    /// Space to jump, J or X to punch.
    #[must_use]
    pub fn default_platformer() -> Self {
        let mut bindings: HashMap<Action, Vec<InputBinding>> = HashMap::new();

        bindings.insert(
            Action::Horizontal,
            vec![
                InputBinding::KeyAxis {
                    negative: KeyCode::KeyA,
                    positive: KeyCode::KeyD,
                },
                InputBinding::KeyAxis {
                    negative: KeyCode::ArrowLeft,
                    positive: KeyCode::ArrowRight,
                },
            ],
        );
        bindings.insert(
            Action::Vertical,
            vec![
                InputBinding::KeyAxis {
                    negative: KeyCode::KeyS,
                    positive: KeyCode::KeyW,
                },
                InputBinding::KeyAxis {
                    negative: KeyCode::ArrowDown,
                    positive: KeyCode::ArrowUp,
                },
            ],
        );
        bindings.insert(Action::Jump, vec![InputBinding::Key(KeyCode::Space)]);
        bindings.insert(
            Action::Punch,
            vec![
                InputBinding::Key(KeyCode::KeyJ),
                InputBinding::Key(KeyCode::KeyX),
            ],
        );

        Self { bindings }
    }

    /// Set the bindings for an action, replacing any existing ones.
    pub fn set_bindings(&mut self, action: Action, bindings: Vec<InputBinding>) {
        self.bindings.insert(action, bindings);
    }

    /// Get the bindings for an action.
    #[must_use]
    pub fn get_bindings(&self, action: &Action) -> &[InputBinding] {
        self.bindings.get(action).map_or(&[], |v| v.as_slice())
    }

    /// Apply `action name -> key name` overrides from the config.
    ///
    /// Button actions are rebound to the single named key. Axis actions take
    /// `"Negative,Positive"`. Unknown actions or keys are logged and skipped.
    /// Returns the number of overrides applied.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) -> usize {
        let mut applied = 0;
        for (action_name, key_spec) in overrides {
            let action = match action_name.parse::<Action>() {
                Ok(action) => action,
                Err(err) => {
                    warn!("Ignoring keybinding override: {err}");
                    continue;
                }
            };

            let binding = if action.is_axis() {
                let mut parts = key_spec.split(',').map(str::trim);
                match (
                    parts.next().and_then(key_from_name),
                    parts.next().and_then(key_from_name),
                ) {
                    (Some(negative), Some(positive)) => {
                        Some(InputBinding::KeyAxis { negative, positive })
                    }
                    _ => None,
                }
            } else {
                key_from_name(key_spec.trim()).map(InputBinding::Key)
            };

            match binding {
                Some(binding) => {
                    self.set_bindings(action, vec![binding]);
                    applied += 1;
                }
                None => warn!("Ignoring keybinding override {action_name} = {key_spec:?}"),
            }
        }
        applied
    }

    /// Serialize to RON string.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    /// Deserialize from RON string.
    ///
    /// # Errors
    /// Returns an error if the RON string is malformed.
    pub fn from_ron(s: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(s)
    }
}

/// Threshold below which an action is considered inactive.
const ACTIVATION_THRESHOLD: f32 = 0.001;

/// Per-tick action state computed by [`ActionResolver`].
#[derive(Debug, Clone, Default)]
pub struct ActionState {
    /// Current tick values.
    values: HashMap<Action, f32>,
    /// Previous tick values (for edge detection).
    prev_values: HashMap<Action, f32>,
}

impl ActionState {
    /// Create a new empty action state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an action's value is above the activation threshold.
    #[must_use]
    pub fn is_action_active(&self, action: Action) -> bool {
        self.action_value(action).abs() > ACTIVATION_THRESHOLD
    }

    /// The raw value of an action, clamped to `[-1.0, 1.0]`.
    #[must_use]
    pub fn action_value(&self, action: Action) -> f32 {
        self.values.get(&action).copied().unwrap_or(0.0)
    }

    /// True only on the tick the action transitioned from inactive to active.
    #[must_use]
    pub fn action_just_activated(&self, action: Action) -> bool {
        let cur = self.action_value(action).abs() > ACTIVATION_THRESHOLD;
        let prev =
            self.prev_values.get(&action).copied().unwrap_or(0.0).abs() > ACTIVATION_THRESHOLD;
        cur && !prev
    }

    /// True only on the tick the action transitioned from active to inactive.
    #[must_use]
    pub fn action_just_deactivated(&self, action: Action) -> bool {
        let cur = self.action_value(action).abs() > ACTIVATION_THRESHOLD;
        let prev =
            self.prev_values.get(&action).copied().unwrap_or(0.0).abs() > ACTIVATION_THRESHOLD;
        !cur && prev
    }
}

/// Reads keyboard state and populates [`ActionState`] each tick.
pub struct ActionResolver;

impl ActionResolver {
    /// Resolve all actions from the current keyboard state.
    ///
    /// Call once per tick after the keyboard state has been updated.
    pub fn resolve(input_map: &InputMap, keyboard: &KeyboardState, state: &mut ActionState) {
        state.prev_values.clone_from(&state.values);
        state.values.clear();

        for (action, bindings) in &input_map.bindings {
            let value: f32 = bindings
                .iter()
                .map(|binding| Self::read_binding(binding, keyboard))
                .sum();
            state.values.insert(*action, value.clamp(-1.0, 1.0));
        }
    }

    fn read_binding(binding: &InputBinding, keyboard: &KeyboardState) -> f32 {
        let held = |code: KeyCode| {
            if keyboard.is_pressed(PhysicalKey::Code(code)) {
                1.0
            } else {
                0.0
            }
        };
        match *binding {
            InputBinding::Key(code) => held(code),
            InputBinding::KeyAxis { negative, positive } => held(positive) - held(negative),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::RawKeyEvent;

    fn press_key(kb: &mut KeyboardState, code: KeyCode) {
        kb.process_raw(RawKeyEvent::new(PhysicalKey::Code(code), true));
    }

    fn release_key(kb: &mut KeyboardState, code: KeyCode) {
        kb.process_raw(RawKeyEvent::new(PhysicalKey::Code(code), false));
    }

    #[test]
    fn test_button_bound_to_key_activates_on_press() {
        let map = InputMap::default();
        let mut kb = KeyboardState::new();
        press_key(&mut kb, KeyCode::Space);

        let mut state = ActionState::new();
        ActionResolver::resolve(&map, &kb, &mut state);

        assert!(state.is_action_active(Action::Jump));
        assert!((state.action_value(Action::Jump) - 1.0).abs() < f32::EPSILON);
        assert!(!state.is_action_active(Action::Punch));
    }

    #[test]
    fn test_key_axis_reads_sign() {
        let map = InputMap::default();
        let mut kb = KeyboardState::new();
        let mut state = ActionState::new();

        press_key(&mut kb, KeyCode::KeyA);
        ActionResolver::resolve(&map, &kb, &mut state);
        assert!((state.action_value(Action::Horizontal) + 1.0).abs() < f32::EPSILON);

        press_key(&mut kb, KeyCode::KeyD);
        ActionResolver::resolve(&map, &kb, &mut state);
        assert!(
            state.action_value(Action::Horizontal).abs() < f32::EPSILON,
            "opposite keys cancel"
        );
    }

    #[test]
    fn test_axis_sum_clamped() {
        let map = InputMap::default();
        let mut kb = KeyboardState::new();
        press_key(&mut kb, KeyCode::KeyD);
        press_key(&mut kb, KeyCode::ArrowRight);

        let mut state = ActionState::new();
        ActionResolver::resolve(&map, &kb, &mut state);
        assert!((state.action_value(Action::Horizontal) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_unbound_action_returns_zero() {
        let map = InputMap::new();
        let kb = KeyboardState::new();
        let mut state = ActionState::new();
        ActionResolver::resolve(&map, &kb, &mut state);

        assert!(!state.is_action_active(Action::Punch));
        assert!(state.action_value(Action::Vertical).abs() < f32::EPSILON);
    }

    #[test]
    fn test_action_just_activated_edge() {
        let map = InputMap::default();
        let mut kb = KeyboardState::new();
        let mut state = ActionState::new();

        press_key(&mut kb, KeyCode::KeyJ);
        ActionResolver::resolve(&map, &kb, &mut state);
        assert!(state.action_just_activated(Action::Punch));

        ActionResolver::resolve(&map, &kb, &mut state);
        assert!(!state.action_just_activated(Action::Punch));
        assert!(state.is_action_active(Action::Punch));

        release_key(&mut kb, KeyCode::KeyJ);
        ActionResolver::resolve(&map, &kb, &mut state);
        assert!(state.action_just_deactivated(Action::Punch));
    }

    #[test]
    fn test_action_names_parse() {
        for action in Action::ALL {
            assert_eq!(action.name().parse::<Action>().unwrap(), action);
        }
        assert!("Crouch".parse::<Action>().is_err());
    }

    #[test]
    fn test_overrides_rebind_button_and_axis() {
        let mut map = InputMap::default();
        let mut overrides = HashMap::new();
        overrides.insert("Punch".to_string(), "KeyK".to_string());
        overrides.insert("Horizontal".to_string(), "KeyQ, KeyE".to_string());
        overrides.insert("Fly".to_string(), "KeyF".to_string());
        overrides.insert("Jump".to_string(), "NoSuchKey".to_string());

        assert_eq!(map.apply_overrides(&overrides), 2);
        assert_eq!(
            map.get_bindings(&Action::Punch),
            &[InputBinding::Key(KeyCode::KeyK)]
        );
        assert_eq!(
            map.get_bindings(&Action::Horizontal),
            &[InputBinding::KeyAxis {
                negative: KeyCode::KeyQ,
                positive: KeyCode::KeyE,
            }]
        );
        assert_eq!(
            map.get_bindings(&Action::Jump),
            &[InputBinding::Key(KeyCode::Space)]
        );
    }

    #[test]
    fn test_input_map_ron_preserves_bindings() {
        let map = InputMap::default();
        let ron_str = map.to_ron().unwrap();
        assert!(ron_str.contains("\"Space\""));
        let parsed = InputMap::from_ron(&ron_str).unwrap();
        assert_eq!(
            parsed.get_bindings(&Action::Horizontal),
            map.get_bindings(&Action::Horizontal)
        );
    }

    #[test]
    fn test_unknown_key_name_rejected_by_ron() {
        let result = InputMap::from_ron("(bindings: {Jump: [Key(\"Banana\")]})");
        assert!(result.is_err());
    }
}
