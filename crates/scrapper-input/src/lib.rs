//! Input abstraction: keyboard keys mapped through configurable bindings to
//! the player's named buttons and axes.

pub mod action_map;
pub mod keyboard;
pub mod smoothing;

pub use action_map::{Action, ActionResolver, ActionState, InputBinding, InputMap, key_from_name};
pub use keyboard::{KeyboardState, RawKeyEvent};
pub use smoothing::SmoothedAxis;
