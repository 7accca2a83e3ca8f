//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Scrapper command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "scrapper", about = "Headless brawler player simulation")]
pub struct CliArgs {
    /// Starting player health.
    #[arg(long)]
    pub health: Option<i32>,

    /// Seed for the sound pool RNG.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of simulation ticks to run.
    #[arg(long)]
    pub ticks: Option<u64>,

    /// Simulation rate in Hz.
    #[arg(long)]
    pub tick_rate: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Level description (RON). A built-in test level is used when absent.
    #[arg(long)]
    pub level: Option<PathBuf>,

    /// Input script (RON). A built-in demo script is used when absent.
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Pace ticks against the wall clock instead of running flat out.
    #[arg(long)]
    pub realtime: bool,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(health) = args.health {
            self.player.health = health;
        }
        if let Some(seed) = args.seed {
            self.sim.rng_seed = seed;
        }
        if let Some(ticks) = args.ticks {
            self.sim.max_ticks = ticks;
        }
        if let Some(rate) = args.tick_rate {
            self.sim.tick_rate = rate;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            health: Some(1),
            seed: Some(42),
            log_level: Some("debug".to_string()),
            ..CliArgs::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.player.health, 1);
        assert_eq!(config.sim.rng_seed, 42);
        assert_eq!(config.debug.log_level, "debug");
        // Non-overridden fields retain defaults
        assert_eq!(config.sim.tick_rate, 60);
        assert_eq!(config.player.walk_speed, 4.5);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args =
            CliArgs::try_parse_from(["scrapper", "--ticks", "120", "--level", "arena.ron"])
                .unwrap();
        assert_eq!(args.ticks, Some(120));
        assert_eq!(args.level, Some(PathBuf::from("arena.ron")));
        assert!(args.script.is_none());
        assert!(!args.realtime);
    }
}
