//! Configuration structs with sensible defaults and RON persistence.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Player tuning constants.
    pub player: PlayerTuning,
    /// Audio volumes and clip pools.
    pub audio: AudioConfig,
    /// Input settings.
    pub input: InputConfig,
    /// Simulation clock settings.
    pub sim: SimConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Player tuning constants. Set once when the player spawns and never
/// changed during play.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlayerTuning {
    /// Starting health.
    pub health: i32,
    /// Damage dealt by a punch. Not consumed by the player controller itself.
    pub basic_attack_damage: i32,
    /// Horizontal speed at full stick deflection (units/s).
    pub walk_speed: f32,
    /// Vertical velocity added by a jump (units/s).
    pub jump_thrust: f32,
    /// Vertical speed while climbing at full deflection (units/s).
    pub climb_speed: f32,
    /// Impulse applied on hurt/death when moving left.
    pub right_hurt_knockback: Vec2,
    /// Impulse applied on hurt/death otherwise.
    pub left_hurt_knockback: Vec2,
    /// Length of the ground punch in seconds.
    pub punch_delay: f32,
    /// Length of the air punch in seconds.
    pub air_punch_delay: f32,
    /// Length of the stagger after a hit in seconds.
    pub hurt_delay: f32,
    /// Invulnerable time before the sprite starts flashing, in seconds.
    pub invulnerability_grace: f32,
    /// Number of hide/show flash cycles in the invulnerability window.
    pub invulnerability_flashes: u32,
    /// Hidden half of a flash cycle, in seconds.
    pub sprite_flash_delay: f32,
    /// Extra time added to the visible half of a flash cycle, in seconds.
    pub flash_visible_padding: f32,
}

/// Audio configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AudioConfig {
    /// Master volume (0.0 - 1.0).
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0).
    pub sfx_volume: f32,
    /// Clips picked at random when a punch starts.
    pub punch_sounds: Vec<String>,
    /// Clips picked at random when the player is hurt.
    pub hurt_sounds: Vec<String>,
    /// Clips picked at random when the player dies.
    pub death_sounds: Vec<String>,
}

/// Input configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Keybinding overrides (action name -> key name).
    pub keybindings: HashMap<String, String>,
    /// How fast a smoothed axis moves toward its target (units/s).
    pub axis_sensitivity: f32,
    /// How fast a smoothed axis falls back to zero with no input (units/s).
    pub axis_gravity: f32,
    /// Jump straight to zero when the input reverses direction.
    pub axis_snap: bool,
}

/// Simulation clock configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimConfig {
    /// Fixed simulation rate in Hz.
    pub tick_rate: u32,
    /// Seed for the sound pool RNG.
    pub rng_seed: u64,
    /// Number of ticks a headless run simulates.
    pub max_ticks: u64,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            health: 6,
            basic_attack_damage: 1,
            walk_speed: 4.5,
            jump_thrust: 10.0,
            climb_speed: 10.0,
            right_hurt_knockback: Vec2::new(10.0, 10.0),
            left_hurt_knockback: Vec2::new(-10.0, 10.0),
            punch_delay: 1.0,
            air_punch_delay: 0.32,
            hurt_delay: 0.2,
            invulnerability_grace: 0.5,
            invulnerability_flashes: 100,
            sprite_flash_delay: 0.1,
            flash_visible_padding: 0.15,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            master_volume: 1.0,
            sfx_volume: 1.0,
            punch_sounds: vec!["punch_01".to_string(), "punch_02".to_string()],
            hurt_sounds: vec!["hurt_01".to_string(), "hurt_02".to_string()],
            death_sounds: vec!["death_01".to_string()],
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            keybindings: HashMap::new(),
            axis_sensitivity: 3.0,
            axis_gravity: 3.0,
            axis_snap: true,
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_rate: 60,
            rng_seed: 0x5c4a_9e11,
            max_ticks: 600,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl PlayerTuning {
    /// Total length of the invulnerability window in seconds: the grace
    /// period followed by every hide/show flash cycle.
    #[must_use]
    pub fn invulnerability_duration(&self) -> f64 {
        let delay = f64::from(self.sprite_flash_delay);
        let cycle = delay + delay + f64::from(self.flash_visible_padding);
        f64::from(self.invulnerability_grace) + f64::from(self.invulnerability_flashes) * cycle
    }
}

impl SimConfig {
    /// Fixed timestep in seconds.
    #[must_use]
    pub fn fixed_dt(&self) -> f64 {
        1.0 / f64::from(self.tick_rate.max(1))
    }
}

// --- Validation ---

fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be a positive number, got {value}"),
        })
    }
}

fn require_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be zero or positive, got {value}"),
        })
    }
}

fn require_clips(field: &'static str, pool: &[String]) -> Result<(), ConfigError> {
    if pool.is_empty() {
        return Err(ConfigError::Invalid {
            field,
            reason: "sound pool is empty".to_string(),
        });
    }
    if pool.iter().any(|clip| clip.trim().is_empty()) {
        return Err(ConfigError::Invalid {
            field,
            reason: "sound pool contains a blank clip name".to_string(),
        });
    }
    Ok(())
}

impl Config {
    /// Reject values the player controller cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.player;
        require_non_negative("player.walk_speed", p.walk_speed)?;
        require_non_negative("player.jump_thrust", p.jump_thrust)?;
        require_non_negative("player.climb_speed", p.climb_speed)?;
        require_positive("player.punch_delay", p.punch_delay)?;
        require_positive("player.air_punch_delay", p.air_punch_delay)?;
        require_positive("player.hurt_delay", p.hurt_delay)?;
        require_non_negative("player.invulnerability_grace", p.invulnerability_grace)?;
        require_positive("player.sprite_flash_delay", p.sprite_flash_delay)?;
        require_non_negative("player.flash_visible_padding", p.flash_visible_padding)?;

        require_clips("audio.punch_sounds", &self.audio.punch_sounds)?;
        require_clips("audio.hurt_sounds", &self.audio.hurt_sounds)?;
        require_clips("audio.death_sounds", &self.audio.death_sounds)?;

        if self.sim.tick_rate == 0 {
            return Err(ConfigError::Invalid {
                field: "sim.tick_rate",
                reason: "must be at least 1 Hz".to_string(),
            });
        }
        Ok(())
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Platform config directory for scrapper, e.g. `~/.config/scrapper`.
    #[must_use]
    pub fn default_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("scrapper"))
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
