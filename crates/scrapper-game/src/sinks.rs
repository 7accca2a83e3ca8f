//! Headless output sinks that report through `tracing`.

use scrapper_player::{AnimParam, AnimTrigger, AnimationSink, AudioSink, SpriteSink};
use std::collections::HashMap;
use tracing::{debug, info, trace};

/// Remembers animator parameters and logs only actual changes.
#[derive(Debug, Default)]
pub struct LogAnimator {
    bools: HashMap<AnimParam, bool>,
    floats: HashMap<AnimParam, f32>,
    triggers: u32,
}

impl LogAnimator {
    pub fn flag(&self, param: AnimParam) -> bool {
        self.bools.get(&param).copied().unwrap_or(false)
    }

    pub fn float(&self, param: AnimParam) -> f32 {
        self.floats.get(&param).copied().unwrap_or(0.0)
    }

    pub fn trigger_count(&self) -> u32 {
        self.triggers
    }
}

impl AnimationSink for LogAnimator {
    fn set_bool(&mut self, param: AnimParam, value: bool) {
        if self.bools.insert(param, value) != Some(value) {
            debug!(%param, value, "anim");
        }
    }

    fn set_float(&mut self, param: AnimParam, value: f32) {
        if self.floats.insert(param, value) != Some(value) {
            debug!(%param, value, "anim");
        }
    }

    fn set_trigger(&mut self, trigger: AnimTrigger) {
        self.triggers += 1;
        info!(%trigger, "anim trigger");
    }
}

#[derive(Debug, Default)]
pub struct LogAudio {
    played: Vec<String>,
}

impl LogAudio {
    /// Every clip played so far, in order.
    pub fn played(&self) -> &[String] {
        &self.played
    }
}

impl AudioSink for LogAudio {
    fn play_one_shot(&mut self, clip: &str, volume: f32) {
        info!(clip, volume, "sfx");
        self.played.push(clip.to_string());
    }
}

#[derive(Debug)]
pub struct LogSprite {
    visible: bool,
    toggles: u32,
}

impl Default for LogSprite {
    fn default() -> Self {
        Self {
            visible: true,
            toggles: 0,
        }
    }
}

impl LogSprite {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn toggles(&self) -> u32 {
        self.toggles
    }
}

impl SpriteSink for LogSprite {
    fn set_visible(&mut self, visible: bool) {
        if visible != self.visible {
            self.toggles += 1;
            trace!(visible, "sprite");
        }
        self.visible = visible;
    }
}
