//! One headless run: level, scripted keyboard, player and sinks.

use crate::error::GameError;
use crate::level::LevelDesc;
use crate::script::ScriptPlayer;
use crate::sinks::{LogAnimator, LogAudio, LogSprite};
use scrapper_config::Config;
use scrapper_input::{Action, ActionResolver, ActionState, InputMap, KeyboardState, SmoothedAxis};
use scrapper_physics::{Body2D, CharacterProbes, ContactSnapshot, ContactWorld};
use scrapper_player::{
    PlayerContext, PlayerController, PlayerEvent, PlayerInput, PlayerSnapshot, SoundBank,
};
use tracing::{debug, info, warn};

pub struct Simulation {
    world: ContactWorld,
    probes: CharacterProbes,
    body: Body2D,
    contacts: ContactSnapshot,
    kill_y: Option<f32>,

    keyboard: KeyboardState,
    input_map: InputMap,
    actions: ActionState,
    vertical: SmoothedAxis,
    script: ScriptPlayer,

    player: PlayerController,
    animator: LogAnimator,
    audio: LogAudio,
    sprite: LogSprite,

    tick: u64,
}

impl Simulation {
    pub fn new(
        config: &Config,
        level: &LevelDesc,
        script: ScriptPlayer,
    ) -> Result<Self, GameError> {
        let world = level.build_world()?;
        let probes = CharacterProbes::default();
        let body = level.spawn_body();
        let contacts = world.sample(&body, &probes);

        let mut input_map = InputMap::default_platformer();
        let overrides = input_map.apply_overrides(&config.input.keybindings);
        if overrides > 0 {
            info!("Applied {overrides} keybinding override(s)");
        }

        let mut animator = LogAnimator::default();
        let player = PlayerController::spawn(
            config.player.clone(),
            SoundBank::from_config(&config.audio),
            config.sim.rng_seed,
            &body,
            &mut animator,
        );
        info!(
            level = %level.name,
            colliders = world.colliders().len(),
            "Simulation ready"
        );

        Ok(Self {
            world,
            probes,
            body,
            contacts,
            kill_y: level.kill_y,
            keyboard: KeyboardState::new(),
            input_map,
            actions: ActionState::new(),
            vertical: SmoothedAxis::new(
                config.input.axis_sensitivity,
                config.input.axis_gravity,
                config.input.axis_snap,
            ),
            script,
            player,
            animator,
            audio: LogAudio::default(),
            sprite: LogSprite::default(),
            tick: 0,
        })
    }

    /// Run one tick of `dt` seconds and return what the player did.
    pub fn step(&mut self, dt: f64) -> Vec<PlayerEvent> {
        self.script.apply(self.tick, &mut self.keyboard);
        ActionResolver::resolve(&self.input_map, &self.keyboard, &mut self.actions);

        let input = PlayerInput {
            horizontal: self.actions.action_value(Action::Horizontal),
            vertical: self
                .vertical
                .update(self.actions.action_value(Action::Vertical), dt as f32),
            jump_pressed: self.actions.action_just_activated(Action::Jump),
            punch_pressed: self.actions.action_just_activated(Action::Punch),
        };

        let mut ctx = PlayerContext {
            contacts: &self.contacts,
            body: &mut self.body,
            animator: &mut self.animator,
            audio: &mut self.audio,
            sprite: &mut self.sprite,
        };
        let events = self.player.update(dt, &input, &mut ctx);
        for event in &events {
            debug!(tick = self.tick, ?event, "player event");
        }

        self.world.step_body(&mut self.body, dt as f32);
        if let Some(kill_y) = self.kill_y
            && self.body.position.y < kill_y
            && self.player.health() > 0
        {
            warn!(tick = self.tick, y = self.body.position.y, "player fell out of the level");
            self.player.kill();
        }
        self.contacts = self.world.sample(&self.body, &self.probes);

        self.keyboard.clear_transients();
        self.tick += 1;
        events
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        self.player.snapshot()
    }

    pub fn body(&self) -> &Body2D {
        &self.body
    }

    pub fn contacts(&self) -> ContactSnapshot {
        self.contacts
    }

    pub fn animator(&self) -> &LogAnimator {
        &self.animator
    }

    pub fn audio(&self) -> &LogAudio {
        &self.audio
    }

    pub fn sprite(&self) -> &LogSprite {
        &self.sprite
    }

    pub fn script_finished(&self) -> bool {
        self.script.is_finished()
    }
}
