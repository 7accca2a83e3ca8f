//! Scrapper: headless run of the brawler player controller.
//!
//! Loads the config, a level and an input script, then drives the player
//! through the fixed-timestep loop and logs what it does.
//!
//! Run with: `cargo run -p scrapper-game -- --ticks 600`

mod error;
mod game_loop;
mod level;
mod script;
mod sim;
mod sinks;

use clap::Parser;
use error::GameError;
use game_loop::{FixedStepLoop, FrameClock};
use level::LevelDesc;
use scrapper_config::{CliArgs, Config};
use scrapper_player::AnimParam;
use script::InputScript;
use sim::Simulation;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let (mut config, source) = match load_config(&args) {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("scrapper: {err}");
            return ExitCode::FAILURE;
        }
    };
    config.apply_cli_overrides(&args);

    let log_dir = Config::default_dir().map(|dir| dir.join("logs"));
    scrapper_log::init_logging(log_dir.as_deref(), cfg!(debug_assertions), Some(&config));
    match &source {
        ConfigSource::Loaded(path) => info!("Loaded config from {}", path.display()),
        ConfigSource::Created(path) => info!("Created default config at {}", path.display()),
        ConfigSource::Defaults => info!("No config dir, using built-in defaults"),
    }

    match run(&args, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

/// Where the run's config came from. Reported once logging is up.
#[derive(Debug, PartialEq)]
enum ConfigSource {
    Loaded(PathBuf),
    Created(PathBuf),
    Defaults,
}

/// `--config` dir, else the platform config dir, else built-in defaults.
fn load_config(args: &CliArgs) -> Result<(Config, ConfigSource), GameError> {
    let Some(dir) = args.config.clone().or_else(Config::default_dir) else {
        return Ok((Config::default(), ConfigSource::Defaults));
    };
    let path = dir.join("config.ron");
    let existed = path.exists();
    let config = Config::load_or_create(&dir)?;
    let source = if existed {
        ConfigSource::Loaded(path)
    } else {
        ConfigSource::Created(path)
    };
    Ok((config, source))
}

fn run(args: &CliArgs, config: &Config) -> Result<(), GameError> {
    config.validate()?;

    let level = match &args.level {
        Some(path) => LevelDesc::load(path)?,
        None => LevelDesc::default(),
    };
    let script = match &args.script {
        Some(path) => InputScript::load(path)?,
        None => InputScript::demo(),
    };

    info!("Scrapper");
    info!(
        "Tick rate: {} Hz | Ticks: {} | Seed: {:#x}",
        config.sim.tick_rate, config.sim.max_ticks, config.sim.rng_seed
    );

    let script = script.compile()?;
    if let Some(last) = script.last_tick() {
        info!("Input script ends at tick {last}");
    }

    let mut sim = Simulation::new(config, &level, script)?;
    let mut game_loop = FixedStepLoop::new(config.sim.fixed_dt());
    let max_ticks = config.sim.max_ticks;

    if args.realtime {
        let mut clock = FrameClock::new();
        let pause = Duration::from_secs_f64(game_loop.fixed_dt() * 0.5);
        while game_loop.update_count() < max_ticks {
            game_loop.advance(clock.frame_time(), |dt, index| {
                if index < max_ticks {
                    sim.step(dt);
                }
            });
            std::thread::sleep(pause);
        }
    } else {
        let frame_time = game_loop.fixed_dt();
        while game_loop.update_count() < max_ticks {
            game_loop.advance(frame_time, |dt, _| {
                sim.step(dt);
            });
        }
    }

    let snapshot = sim.snapshot();
    info!(
        ticks = sim.tick(),
        sim_time = game_loop.total_sim_time(),
        frames = game_loop.frame_count(),
        leftover_alpha = game_loop.alpha(),
        health = snapshot.health,
        state = ?snapshot.state,
        alive = snapshot.alive,
        x = sim.body().position.x,
        y = sim.body().position.y,
        contacts = ?sim.contacts(),
        facing = sim.animator().float(AnimParam::MoveX),
        walking = sim.animator().flag(AnimParam::IsWalking),
        death_triggers = sim.animator().trigger_count(),
        sounds = sim.audio().played().len(),
        sprite_visible = sim.sprite().is_visible(),
        flashes = sim.sprite().toggles() / 2,
        script_done = sim.script_finished(),
        "Run finished"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_source_created_then_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let args = CliArgs {
            config: Some(dir.path().to_path_buf()),
            ..CliArgs::default()
        };
        let path = dir.path().join("config.ron");

        let (config, source) = load_config(&args).unwrap();
        assert_eq!(source, ConfigSource::Created(path.clone()));
        assert_eq!(config, Config::default());
        assert!(path.exists());

        let (_, source) = load_config(&args).unwrap();
        assert_eq!(source, ConfigSource::Loaded(path));
    }

    #[test]
    fn test_broken_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.ron"), "(player: (health: ").unwrap();
        let args = CliArgs {
            config: Some(dir.path().to_path_buf()),
            ..CliArgs::default()
        };
        assert!(matches!(load_config(&args), Err(GameError::Config(_))));
    }
}
