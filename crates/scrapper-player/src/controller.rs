//! The player behavior loop.
//!
//! [`PlayerController::update`] runs once per fixed tick:
//!
//! 1. Dead players do nothing.
//! 2. Running timed effects advance by `dt` (punch, air punch, stagger,
//!    invulnerability flicker). An action that runs out returns the state
//!    to [`PlayerState::Normal`].
//! 3. Health at or below zero kills the player.
//! 4. Unless a timed action owns the player, the checks run in order:
//!    movement, jump, ground punch, air punch, climb, and damage intake when
//!    not invulnerable. Later checks read the velocity earlier ones wrote.
//!
//! A hit taken on the tick a punch starts replaces the punch with the
//! stagger, so at most one of punch, air punch and stagger is ever active.

use crate::input::PlayerInput;
use crate::ports::{AnimParam, AnimTrigger, AnimationSink, PlayerContext};
use crate::sound::{SoundBank, SoundCue};
use crate::state::{ActionKind, PlayerEvent, PlayerSnapshot, PlayerState};
use crate::timer::{ActionTimer, InvulnerabilityWindow};
use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use scrapper_config::PlayerTuning;
use scrapper_physics::{KinematicBody, LayerMask, Probe};
use tracing::{debug, info, warn};

/// Speeds at or below this count as standing still.
pub const MOVE_EPSILON: f32 = f32::EPSILON;

#[derive(Debug, Clone, Copy)]
struct TimedAction {
    kind: ActionKind,
    timer: ActionTimer,
}

/// A single player character.
#[derive(Debug, Clone)]
pub struct PlayerController {
    tuning: PlayerTuning,
    sounds: SoundBank,
    rng: ChaCha8Rng,
    health: i32,
    state: PlayerState,
    invulnerable: bool,
    alive: bool,
    gravity_scale_at_start: f32,
    action: Option<TimedAction>,
    invulnerability: Option<InvulnerabilityWindow>,
}

impl PlayerController {
    /// Create the player for a freshly spawned body.
    ///
    /// Captures the body's gravity scale so climbing can restore it, and
    /// faces the animator right.
    pub fn spawn(
        tuning: PlayerTuning,
        sounds: SoundBank,
        seed: u64,
        body: &dyn KinematicBody,
        animator: &mut dyn AnimationSink,
    ) -> Self {
        animator.set_float(AnimParam::MoveX, 1.0);
        debug!(health = tuning.health, seed, "player spawned");
        Self {
            health: tuning.health,
            tuning,
            sounds,
            rng: ChaCha8Rng::seed_from_u64(seed),
            state: PlayerState::Normal,
            invulnerable: false,
            alive: true,
            gravity_scale_at_start: body.gravity_scale(),
            action: None,
            invulnerability: None,
        }
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn tuning(&self) -> &PlayerTuning {
        &self.tuning
    }

    /// Damage a punch deals to whatever it hits.
    pub fn attack_damage(&self) -> i32 {
        self.tuning.basic_attack_damage
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            health: self.health,
            state: self.state,
            invulnerable: self.invulnerable,
            alive: self.alive,
        }
    }

    /// Drop health to zero regardless of invulnerability, e.g. after falling
    /// out of the level. Death is handled on the next tick.
    pub fn kill(&mut self) {
        if self.state != PlayerState::Dead {
            self.health = self.health.min(0);
        }
    }

    /// Run one tick of `dt` seconds.
    pub fn update(
        &mut self,
        dt: f64,
        input: &PlayerInput,
        ctx: &mut PlayerContext<'_>,
    ) -> Vec<PlayerEvent> {
        let mut events = Vec::new();
        if self.state == PlayerState::Dead {
            return events;
        }

        self.advance_timers(dt, ctx, &mut events);

        if self.health <= 0 {
            self.die(ctx, &mut events);
            return events;
        }

        if self.state.is_busy() {
            return events;
        }

        self.run(input, ctx);
        self.jump(input, ctx, &mut events);
        if !self.punch(input, ctx, &mut events) {
            self.air_punch(input, ctx, &mut events);
        }
        self.climb(input, ctx);
        if !self.invulnerable {
            self.hurt(ctx, &mut events);
        }
        events
    }

    fn advance_timers(
        &mut self,
        dt: f64,
        ctx: &mut PlayerContext<'_>,
        events: &mut Vec<PlayerEvent>,
    ) {
        if let Some(action) = self.action.as_mut()
            && action.timer.advance(dt)
        {
            let kind = action.kind;
            self.action = None;
            ctx.animator.set_bool(action_flag(kind), false);
            self.state = PlayerState::Normal;
            debug!(?kind, "timed action ended");
            events.push(PlayerEvent::ActionEnded(kind));
        }

        if let Some(window) = self.invulnerability.as_mut()
            && window.advance(dt, ctx.sprite)
        {
            self.invulnerability = None;
            self.invulnerable = false;
            debug!("invulnerability ended");
            events.push(PlayerEvent::InvulnerabilityEnded);
        }
    }

    fn run(&mut self, input: &PlayerInput, ctx: &mut PlayerContext<'_>) {
        let control_throw = input.horizontal.clamp(-1.0, 1.0) * self.tuning.walk_speed;
        let velocity = Vec2::new(control_throw, ctx.body.velocity().y);
        ctx.body.set_velocity(velocity);

        let walking = velocity.x.abs() > MOVE_EPSILON;
        ctx.animator.set_bool(AnimParam::IsWalking, walking);
        if walking {
            ctx.animator.set_float(AnimParam::MoveX, velocity.x.signum());
        }
    }

    fn jump(
        &mut self,
        input: &PlayerInput,
        ctx: &mut PlayerContext<'_>,
        events: &mut Vec<PlayerEvent>,
    ) {
        let grounded = ctx
            .contacts
            .is_touching(Probe::Feet, LayerMask::GROUND | LayerMask::HAZARDS);
        if grounded && input.jump_pressed {
            ctx.body
                .set_velocity(ctx.body.velocity() + Vec2::new(0.0, self.tuning.jump_thrust));
            debug!("jump");
            events.push(PlayerEvent::Jumped);
        }
    }

    fn punch(
        &mut self,
        input: &PlayerInput,
        ctx: &mut PlayerContext<'_>,
        events: &mut Vec<PlayerEvent>,
    ) -> bool {
        let on_ground = ctx.contacts.is_touching(Probe::Feet, LayerMask::GROUND);
        if !(on_ground && input.punch_pressed) {
            return false;
        }
        ctx.body.set_velocity(Vec2::ZERO);
        self.start_action(ActionKind::Punch, self.tuning.punch_delay, ctx);
        self.play(SoundCue::Punch, ctx);
        events.push(PlayerEvent::Punched);
        true
    }

    fn air_punch(
        &mut self,
        input: &PlayerInput,
        ctx: &mut PlayerContext<'_>,
        events: &mut Vec<PlayerEvent>,
    ) {
        let airborne = !ctx.contacts.is_touching(
            Probe::Feet,
            LayerMask::GROUND | LayerMask::HAZARDS | LayerMask::CLIMBABLE,
        );
        if !(airborne && input.punch_pressed) {
            return;
        }
        self.start_action(ActionKind::AirPunch, self.tuning.air_punch_delay, ctx);
        self.play(SoundCue::Punch, ctx);
        events.push(PlayerEvent::AirPunched);
    }

    fn climb(&mut self, input: &PlayerInput, ctx: &mut PlayerContext<'_>) {
        if !ctx.contacts.is_touching(Probe::Feet, LayerMask::CLIMBABLE) {
            ctx.animator.set_bool(AnimParam::IsClimbing, false);
            ctx.body.set_gravity_scale(self.gravity_scale_at_start);
            return;
        }

        let climb_speed = input.vertical.clamp(-1.0, 1.0) * self.tuning.climb_speed;
        let velocity = Vec2::new(ctx.body.velocity().x, climb_speed);
        ctx.body.set_velocity(velocity);
        ctx.body.set_gravity_scale(0.0);
        ctx.animator
            .set_bool(AnimParam::IsClimbing, velocity.y.abs() > MOVE_EPSILON);
    }

    fn hurt(&mut self, ctx: &mut PlayerContext<'_>, events: &mut Vec<PlayerEvent>) {
        let contacts = ctx.contacts;
        let hit = contacts.is_touching(Probe::Body, LayerMask::HAZARDS)
            || contacts.is_touching(Probe::Feet, LayerMask::HAZARDS)
            || contacts.is_touching(Probe::Body, LayerMask::ENEMY);
        if !hit {
            return;
        }

        self.health -= 1;
        info!(health = self.health, "player hurt");
        events.push(PlayerEvent::Hurt {
            health: self.health,
        });

        // At zero health the death check owns knockback on the next tick.
        if self.health >= 1 {
            if let Some(action) = self.action.take() {
                debug!(kind = ?action.kind, "action interrupted by hit");
                ctx.animator.set_bool(action_flag(action.kind), false);
            }
            self.knockback(ctx);
            self.invulnerable = true;
            self.invulnerability = Some(InvulnerabilityWindow::new(&self.tuning));
            self.start_action(ActionKind::Stagger, self.tuning.hurt_delay, ctx);
            self.play(SoundCue::Hurt, ctx);
        }
    }

    fn die(&mut self, ctx: &mut PlayerContext<'_>, events: &mut Vec<PlayerEvent>) {
        if let Some(action) = self.action.take() {
            ctx.animator.set_bool(action_flag(action.kind), false);
        }
        if let Some(mut window) = self.invulnerability.take() {
            window.cancel(ctx.sprite);
        }
        self.invulnerable = false;
        self.state = PlayerState::Dead;
        self.alive = false;

        self.knockback(ctx);
        ctx.animator.set_trigger(AnimTrigger::Death);
        self.play(SoundCue::Death, ctx);
        info!(health = self.health, "player died");
        events.push(PlayerEvent::Died);
    }

    /// Moving left pushes with `right_hurt_knockback`; anything else,
    /// including standing still, with `left_hurt_knockback`.
    fn knockback(&self, ctx: &mut PlayerContext<'_>) {
        let impulse = if ctx.body.velocity().x < 0.0 {
            self.tuning.right_hurt_knockback
        } else {
            self.tuning.left_hurt_knockback
        };
        ctx.body.add_impulse(impulse);
    }

    fn start_action(&mut self, kind: ActionKind, delay: f32, ctx: &mut PlayerContext<'_>) {
        self.state = kind.state();
        ctx.animator.set_bool(action_flag(kind), true);
        self.action = Some(TimedAction {
            kind,
            timer: ActionTimer::new(delay),
        });
        debug!(?kind, delay, "timed action started");
    }

    fn play(&mut self, cue: SoundCue, ctx: &mut PlayerContext<'_>) {
        match self.sounds.pool(cue).pick(&mut self.rng) {
            Some(clip) => ctx.audio.play_one_shot(clip, self.sounds.volume),
            None => warn!(?cue, "sound pool is empty, nothing played"),
        }
    }
}

fn action_flag(kind: ActionKind) -> AnimParam {
    match kind {
        ActionKind::Punch => AnimParam::IsPunching,
        ActionKind::AirPunch => AnimParam::IsAirPunching,
        ActionKind::Stagger => AnimParam::IsHurt,
    }
}
