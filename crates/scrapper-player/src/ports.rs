//! Output ports the controller drives: animation, audio, and sprite.
//!
//! Collision and body access come from `scrapper_physics`
//! ([`CollisionQuery`], [`KinematicBody`]). [`PlayerContext`] bundles all five
//! for one tick.

use scrapper_physics::{CollisionQuery, KinematicBody};
use std::fmt;

/// Animator parameters the controller writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimParam {
    /// Bool: moving horizontally.
    IsWalking,
    /// Float: facing, -1 or 1.
    MoveX,
    /// Bool: moving on a climbable surface.
    IsClimbing,
    /// Bool: ground punch in progress.
    IsPunching,
    /// Bool: air punch in progress.
    IsAirPunching,
    /// Bool: staggered after a hit.
    IsHurt,
}

impl AnimParam {
    /// Parameter name as the animator knows it.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            AnimParam::IsWalking => "isWalking",
            AnimParam::MoveX => "moveX",
            AnimParam::IsClimbing => "isClimbing",
            AnimParam::IsPunching => "isPunching",
            AnimParam::IsAirPunching => "isAirPunching",
            AnimParam::IsHurt => "isHurt",
        }
    }
}

impl fmt::Display for AnimParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One-shot animator triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimTrigger {
    /// Play the death animation.
    Death,
}

impl AnimTrigger {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            AnimTrigger::Death => "deathTrigger",
        }
    }
}

impl fmt::Display for AnimTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Receives animator parameter writes.
pub trait AnimationSink {
    fn set_bool(&mut self, param: AnimParam, value: bool);
    fn set_float(&mut self, param: AnimParam, value: f32);
    fn set_trigger(&mut self, trigger: AnimTrigger);
}

/// Plays sound clips. Non-blocking; overlapping one-shots are allowed.
pub trait AudioSink {
    fn play_one_shot(&mut self, clip: &str, volume: f32);
}

/// The visual sprite the invulnerability flicker toggles.
pub trait SpriteSink {
    /// `false` renders the sprite fully transparent, `true` opaque white.
    fn set_visible(&mut self, visible: bool);
}

/// Everything the controller reads or writes during one tick.
pub struct PlayerContext<'a> {
    pub contacts: &'a dyn CollisionQuery,
    pub body: &'a mut dyn KinematicBody,
    pub animator: &'a mut dyn AnimationSink,
    pub audio: &'a mut dyn AudioSink,
    pub sprite: &'a mut dyn SpriteSink,
}

/// Recording fakes for unit tests.
#[cfg(test)]
pub(crate) mod fakes {
    use super::*;
    use std::collections::HashMap;

    #[derive(Debug, Default)]
    pub struct RecordingAnimator {
        pub bools: HashMap<AnimParam, bool>,
        pub floats: HashMap<AnimParam, f32>,
        pub triggers: Vec<AnimTrigger>,
    }

    impl RecordingAnimator {
        pub fn flag(&self, param: AnimParam) -> bool {
            self.bools.get(&param).copied().unwrap_or(false)
        }
    }

    impl AnimationSink for RecordingAnimator {
        fn set_bool(&mut self, param: AnimParam, value: bool) {
            self.bools.insert(param, value);
        }

        fn set_float(&mut self, param: AnimParam, value: f32) {
            self.floats.insert(param, value);
        }

        fn set_trigger(&mut self, trigger: AnimTrigger) {
            self.triggers.push(trigger);
        }
    }

    #[derive(Debug, Default)]
    pub struct RecordingAudio {
        pub played: Vec<String>,
    }

    impl AudioSink for RecordingAudio {
        fn play_one_shot(&mut self, clip: &str, _volume: f32) {
            self.played.push(clip.to_string());
        }
    }

    #[derive(Debug)]
    pub struct RecordingSprite {
        pub visible: bool,
        pub toggles: u32,
    }

    impl Default for RecordingSprite {
        fn default() -> Self {
            Self {
                visible: true,
                toggles: 0,
            }
        }
    }

    impl SpriteSink for RecordingSprite {
        fn set_visible(&mut self, visible: bool) {
            if self.visible != visible {
                self.toggles += 1;
            }
            self.visible = visible;
        }
    }
}
