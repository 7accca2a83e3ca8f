//! Timed effects advanced by the fixed simulation step.
//!
//! Each effect is a small phase machine holding its own elapsed time. Time
//! left over when a phase ends carries into the next phase, so a multi-phase
//! effect lasts exactly the sum of its phase lengths regardless of tick size.

use crate::ports::SpriteSink;
use scrapper_config::PlayerTuning;

/// Accumulated float error tolerated when comparing elapsed time to a length.
pub(crate) const TIMER_EPSILON: f64 = 1e-6;

/// A single countdown: punch, air punch, or stagger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionTimer {
    duration: f64,
    elapsed: f64,
}

impl ActionTimer {
    pub fn new(duration_secs: f32) -> Self {
        Self {
            duration: f64::from(duration_secs),
            elapsed: 0.0,
        }
    }

    /// Add `dt` seconds. Returns true once the full duration has elapsed.
    pub fn advance(&mut self, dt: f64) -> bool {
        self.elapsed += dt;
        self.is_finished()
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed + TIMER_EPSILON >= self.duration
    }

    pub fn remaining(&self) -> f64 {
        (self.duration - self.elapsed).max(0.0)
    }
}

/// Where the invulnerability window currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlickerPhase {
    /// Invulnerable, sprite untouched.
    Grace,
    /// Sprite transparent for one flash delay.
    Hidden,
    /// Sprite opaque for one flash delay plus padding.
    Visible,
    /// Window over.
    Done,
}

/// Invulnerability after a hit: a grace period, then `flashes` hide/show
/// cycles of the sprite.
#[derive(Debug, Clone, PartialEq)]
pub struct InvulnerabilityWindow {
    phase: FlickerPhase,
    phase_elapsed: f64,
    flashes_done: u32,
    flashes: u32,
    grace: f64,
    hidden: f64,
    visible: f64,
}

impl InvulnerabilityWindow {
    pub fn new(tuning: &PlayerTuning) -> Self {
        let delay = f64::from(tuning.sprite_flash_delay);
        Self {
            phase: FlickerPhase::Grace,
            phase_elapsed: 0.0,
            flashes_done: 0,
            flashes: tuning.invulnerability_flashes,
            grace: f64::from(tuning.invulnerability_grace),
            hidden: delay,
            visible: delay + f64::from(tuning.flash_visible_padding),
        }
    }

    pub fn phase(&self) -> FlickerPhase {
        self.phase
    }

    /// Completed hide/show cycles.
    pub fn flashes_done(&self) -> u32 {
        self.flashes_done
    }

    /// Advance by `dt` seconds, toggling the sprite at phase boundaries.
    /// Returns true once the window is over.
    pub fn advance(&mut self, dt: f64, sprite: &mut dyn SpriteSink) -> bool {
        self.phase_elapsed += dt;
        loop {
            let length = match self.phase {
                FlickerPhase::Grace => self.grace,
                FlickerPhase::Hidden => self.hidden,
                FlickerPhase::Visible => self.visible,
                FlickerPhase::Done => return true,
            };
            if self.phase_elapsed + TIMER_EPSILON < length {
                return false;
            }
            self.phase_elapsed = (self.phase_elapsed - length).max(0.0);
            self.phase = match self.phase {
                FlickerPhase::Grace => self.start_flash_or_finish(sprite),
                FlickerPhase::Hidden => {
                    sprite.set_visible(true);
                    FlickerPhase::Visible
                }
                FlickerPhase::Visible => {
                    self.flashes_done += 1;
                    self.start_flash_or_finish(sprite)
                }
                FlickerPhase::Done => FlickerPhase::Done,
            };
        }
    }

    /// Stop early and leave the sprite visible.
    pub fn cancel(&mut self, sprite: &mut dyn SpriteSink) {
        if self.phase == FlickerPhase::Hidden {
            sprite.set_visible(true);
        }
        self.phase = FlickerPhase::Done;
    }

    fn start_flash_or_finish(&self, sprite: &mut dyn SpriteSink) -> FlickerPhase {
        if self.flashes_done < self.flashes {
            sprite.set_visible(false);
            FlickerPhase::Hidden
        } else {
            FlickerPhase::Done
        }
    }
}
