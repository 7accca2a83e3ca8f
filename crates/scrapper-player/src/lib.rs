//! Side-scrolling brawler player controller.
//!
//! The controller owns the player's health, state and timed effects, and
//! talks to the outside world only through ports: collision queries and a
//! kinematic body from `scrapper_physics`, plus the animation, audio and
//! sprite sinks in [`ports`]. Drive it with [`PlayerController::update`]
//! once per fixed tick.

pub mod controller;
pub mod input;
pub mod ports;
pub mod sound;
pub mod state;
pub mod timer;

pub use controller::{MOVE_EPSILON, PlayerController};
pub use input::PlayerInput;
pub use ports::{AnimParam, AnimTrigger, AnimationSink, AudioSink, PlayerContext, SpriteSink};
pub use sound::{SoundBank, SoundCue, SoundPool};
pub use state::{ActionKind, PlayerEvent, PlayerSnapshot, PlayerState};
pub use timer::{ActionTimer, FlickerPhase, InvulnerabilityWindow};
