//! Sound clip pools with uniform random selection.

use rand::Rng;
use scrapper_config::AudioConfig;

/// Which pool a cue draws from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Punch,
    Hurt,
    Death,
}

/// A fixed list of interchangeable clips.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SoundPool {
    clips: Vec<String>,
}

impl SoundPool {
    pub fn new(clips: Vec<String>) -> Self {
        Self { clips }
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Pick one clip uniformly at random. `None` for an empty pool.
    pub fn pick<R: Rng>(&self, rng: &mut R) -> Option<&str> {
        if self.clips.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.clips.len());
        Some(self.clips[index].as_str())
    }
}

/// The controller's three pools plus the effective playback volume.
#[derive(Debug, Clone, PartialEq)]
pub struct SoundBank {
    pub punch: SoundPool,
    pub hurt: SoundPool,
    pub death: SoundPool,
    pub volume: f32,
}

impl SoundBank {
    /// Build from the audio config; volume is master × sfx.
    pub fn from_config(audio: &AudioConfig) -> Self {
        Self {
            punch: SoundPool::new(audio.punch_sounds.clone()),
            hurt: SoundPool::new(audio.hurt_sounds.clone()),
            death: SoundPool::new(audio.death_sounds.clone()),
            volume: (audio.master_volume * audio.sfx_volume).clamp(0.0, 1.0),
        }
    }

    pub fn pool(&self, cue: SoundCue) -> &SoundPool {
        match cue {
            SoundCue::Punch => &self.punch,
            SoundCue::Hurt => &self.hurt,
            SoundCue::Death => &self.death,
        }
    }
}
