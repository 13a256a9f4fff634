// Player character - per-tick gameplay state machine

use glam::Vec3;

use super::animation::{params, AnimationSink};
use super::checkpoint::RespawnController;
use super::config::CharacterConfig;
use super::effects::{EffectKind, EffectScheduler, FollowUp, TimedEffect};
use super::items::{ItemPouch, ThrownItem};
use super::motion::{MotionEvent, MotionState, MotionStateMachine};
use super::stamina::StaminaLedger;
use crate::core::math;
use crate::engine::input::{Action, Axis, InputBuffer, PlayerInput, PlayerSlot, MOVE_DEADZONE};
use crate::engine::physics::PhysicalMotor;
use crate::game::events::{GameEvent, SoundCue};
use crate::game::GameError;

/// A player-controlled character
///
/// The character owns its gameplay state only. The physical body and the
/// animator belong to the host and are passed in for every call that needs
/// them, so the character never holds on to either.
#[derive(Debug)]
pub struct Character {
    slot: PlayerSlot,
    name: String,
    config: CharacterConfig,

    /// Position read back from the motor at the end of the last tick
    position: Vec3,
    /// Facing in degrees around +Y
    yaw: f32,

    stamina: StaminaLedger,
    motion: MotionStateMachine,
    effects: EffectScheduler,
    items: ItemPouch,
    respawner: RespawnController,

    kill_count: u32,
    /// Product of every active speed penalty, 1.0 at baseline
    move_speed_multiplier: f32,
    visible: bool,
    crouching: bool,
    /// Last non-zero world-space movement direction (unit length)
    last_movement_direction: Vec3,
    jump_buffer: InputBuffer,

    /// Stamina value last reported to the HUD
    reported_stamina: Option<f32>,
    events: Vec<GameEvent>,
}

impl Character {
    pub fn new(slot: PlayerSlot, name: &str, config: CharacterConfig, spawn: Vec3, yaw: f32) -> Self {
        Self {
            slot,
            name: name.to_string(),
            position: spawn,
            yaw,
            stamina: StaminaLedger::new(&config),
            motion: MotionStateMachine::new(),
            effects: EffectScheduler::new(),
            items: ItemPouch::new(config.max_items),
            respawner: RespawnController::new(spawn, config.respawn_offset),
            kill_count: 0,
            move_speed_multiplier: 1.0,
            visible: true,
            crouching: false,
            last_movement_direction: Vec3::ZERO,
            jump_buffer: InputBuffer::new(),
            reported_stamina: None,
            events: Vec::new(),
            config,
        }
    }

    pub fn slot(&self) -> PlayerSlot {
        self.slot
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &CharacterConfig {
        &self.config
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn stamina(&self) -> &StaminaLedger {
        &self.stamina
    }

    pub fn motion_state(&self) -> MotionState {
        self.motion.state()
    }

    pub fn effects(&self) -> &EffectScheduler {
        &self.effects
    }

    pub fn items(&self) -> &ItemPouch {
        &self.items
    }

    pub fn last_checkpoint(&self) -> Vec3 {
        self.respawner.last_checkpoint()
    }

    pub fn respawn_count(&self) -> u32 {
        self.respawner.respawn_count()
    }

    pub fn kill_count(&self) -> u32 {
        self.kill_count
    }

    pub fn move_speed_multiplier(&self) -> f32 {
        self.move_speed_multiplier
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_crouching(&self) -> bool {
        self.crouching
    }

    pub fn last_movement_direction(&self) -> Vec3 {
        self.last_movement_direction
    }

    /// Take the events produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Run one simulation tick
    pub fn tick(
        &mut self,
        dt: f32,
        input: &PlayerInput,
        motor: &mut dyn PhysicalMotor,
        animator: &mut dyn AnimationSink,
    ) {
        self.position = motor.position();

        self.jump_buffer.update(dt);
        if input.just_pressed(Action::Jump) {
            self.jump_buffer
                .push(Action::Jump, self.config.jump_button_grace_period);
        }

        // Stamina: moving on the ground drains, everything else regenerates
        let intensity = input.movement_magnitude().min(1.0);
        let moving_on_ground = intensity > MOVE_DEADZONE && motor.is_grounded();
        self.stamina.tick(dt, intensity, moving_on_ground);

        self.yaw = (self.yaw + input.axis(Axis::LookX) * self.config.rotation_speed * dt)
            .rem_euclid(360.0);
        self.crouching = input.is_pressed(Action::Crouch);
        self.move_speed_multiplier = self.speed_penalty();

        let suppressed = animator.is_in_hit_reaction() || self.effects.is_active(EffectKind::Stun);
        if suppressed {
            motor.move_with(Vec3::ZERO, dt);
        } else {
            self.apply_movement(dt, input, motor);
        }

        match self
            .motion
            .update(dt, motor.is_grounded(), input.has_movement(), &self.config)
        {
            Some(MotionEvent::Landed) => {
                self.effects.start(TimedEffect::landing(
                    self.config.landing_speed_factor,
                    self.config.landing_duration,
                ));
                animator.trigger(params::LANDING);
            }
            Some(MotionEvent::StartedFalling) => log::trace!("{} started falling", self.slot),
            None => {}
        }

        if !suppressed && self.motion.state().can_jump() && self.jump_buffer.consume(Action::Jump) {
            self.try_jump();
        }

        self.advance_effects(dt, motor);

        self.write_animation(input, animator);
        self.position = motor.position();
        self.report_stamina();
    }

    /// Multiplicative speed penalties from effects, crouching and exhaustion
    fn speed_penalty(&self) -> f32 {
        let mut factor = self.effects.speed_factor();
        if self.crouching {
            factor *= self.config.crouch_speed_factor;
        }
        if self.stamina.is_exhausted() {
            factor *= self.config.exhausted_speed_factor;
        }
        factor
    }

    fn apply_movement(&mut self, dt: f32, input: &PlayerInput, motor: &mut dyn PhysicalMotor) {
        let airborne = self.motion.state().is_airborne();

        let (strafe, forward) = input.movement();
        let mut local = Vec3::new(strafe, 0.0, forward);
        if airborne && !self.motion.can_move_in_air() {
            local = Vec3::ZERO;
        }
        if local.length_squared() > 1.0 {
            local = local.normalize();
        }

        let base_speed = if airborne {
            self.config.jump_horizontal_speed
        } else {
            self.config.move_speed
        };

        let direction = math::yaw_rotation(self.yaw) * local;
        if direction.length_squared() > 0.0 {
            self.last_movement_direction = direction.normalize();
        }

        let velocity = direction * base_speed * self.move_speed_multiplier
            + Vec3::Y * self.motion.vertical_speed();
        motor.move_with(velocity, dt);
    }

    fn try_jump(&mut self) -> bool {
        if !self.stamina.debit(self.config.jump_stamina_cost) {
            log::debug!(
                "{} cannot jump: stamina {:.1} < {:.1}",
                self.slot,
                self.stamina.current(),
                self.config.jump_stamina_cost
            );
            return false;
        }
        if !self.motion.jump(self.config.jump_speed) {
            return false;
        }
        if self.effects.cancel(EffectKind::Landing).is_some() {
            log::trace!("{} jumped out of a landing", self.slot);
        }
        true
    }

    fn advance_effects(&mut self, dt: f32, motor: &mut dyn PhysicalMotor) {
        let tick = self.effects.advance(dt);

        if let Some(step) = tick.knockback {
            motor.move_with(step.velocity, step.duration);
        }
        if let Some(visible) = tick.visibility {
            self.set_visible(visible);
        }

        for effect in tick.completed {
            log::trace!("{} {:?} finished", self.slot, effect.kind());
            match effect.on_complete() {
                FollowUp::None => {}
                FollowUp::FinishLanding => self.motion.finish_landing(),
                FollowUp::StartBlink => {
                    self.effects.start(TimedEffect::blink(
                        self.config.blink_duration,
                        self.config.blink_interval,
                    ));
                }
                FollowUp::Respawn => {
                    // Everything else was cancelled by the respawn
                    self.respawn(motor);
                    break;
                }
            }
        }
    }

    fn write_animation(&self, input: &PlayerInput, animator: &mut dyn AnimationSink) {
        let state = self.motion.state();
        let (strafe, forward) = input.movement();
        animator.set_bool(params::IS_GROUNDED, state.is_grounded());
        animator.set_bool(params::IS_JUMPING, state == MotionState::Jumping);
        animator.set_bool(params::IS_FALLING, state == MotionState::Falling);
        animator.set_bool(params::IS_CROUCHING, self.crouching);
        animator.set_float(params::MOVE_X, strafe);
        animator.set_float(params::MOVE_Y, forward);
    }

    fn report_stamina(&mut self) {
        let current = self.stamina.current();
        if self.reported_stamina == Some(current) {
            return;
        }
        self.reported_stamina = Some(current);
        let reading = self.stamina.reading();
        self.events.push(GameEvent::StaminaChanged {
            player: self.slot,
            value: reading.value,
            ratio: reading.ratio,
            tier: reading.tier,
        });
    }

    fn set_visible(&mut self, visible: bool) {
        if self.visible != visible {
            self.visible = visible;
            self.events.push(GameEvent::VisibilityChanged {
                player: self.slot,
                visible,
            });
        }
    }

    /// Return to the last checkpoint, dropping every active effect
    pub fn respawn(&mut self, motor: &mut dyn PhysicalMotor) -> Vec3 {
        let position = self.respawner.respawn(&mut self.effects, motor);

        self.motion.reset();
        self.jump_buffer.clear();
        self.move_speed_multiplier = 1.0;
        self.set_visible(true);
        self.position = position;

        log::info!("{} respawned at {}", self.slot, position);
        self.events.push(GameEvent::Respawned {
            player: self.slot,
            position,
        });
        position
    }

    pub fn set_checkpoint(&mut self, position: Vec3) {
        self.respawner.set_checkpoint(position);
        self.events.push(GameEvent::CheckpointReached {
            player: self.slot,
            position,
        });
    }

    /// Start a knockback sequence (knockback, blink, respawn).
    /// Ignored while a sequence is already running.
    pub fn start_knockback(&mut self, direction: Vec3) -> bool {
        self.push_back(direction, self.config.knockback_strength)
    }

    fn push_back(&mut self, direction: Vec3, strength: f32) -> bool {
        if self.effects.is_active(EffectKind::Knockback) || self.effects.is_active(EffectKind::Blink) {
            log::trace!("{} already knocked back", self.slot);
            return false;
        }
        self.effects.start(TimedEffect::knockback(
            direction,
            strength,
            self.config.knockback_duration,
        ))
    }

    /// Knock the character away from `source`.
    pub fn knockback_from(&mut self, source: Option<Vec3>) -> bool {
        let direction = self.away_from(source);
        self.start_knockback(direction)
    }

    /// Horizontal direction pointing away from `source`.
    ///
    /// Without a usable source this is against the last movement direction,
    /// or backwards when the character never moved.
    fn away_from(&self, source: Option<Vec3>) -> Vec3 {
        let away = source
            .map(|source| math::flatten(self.position - source))
            .filter(|away| away.length_squared() > f32::EPSILON);
        match away {
            Some(away) => away,
            None if self.last_movement_direction != Vec3::ZERO => -self.last_movement_direction,
            None => -math::forward(self.yaw),
        }
    }

    /// Struck by an enemy at `source`: hit reaction, then a push whose
    /// strength scales with the blow's damage
    pub fn receive_strike(&mut self, animator: &mut dyn AnimationSink, source: Vec3, damage: i32) -> bool {
        self.receive_hit(animator);
        let strength = self.config.knockback_strength * damage.max(1) as f32;
        let direction = self.away_from(Some(source));
        self.push_back(direction, strength)
    }

    /// Play the hit reaction and lock movement briefly
    pub fn receive_hit(&mut self, animator: &mut dyn AnimationSink) {
        animator.trigger(params::TAKE_HIT);
        self.effects
            .start(TimedEffect::stun(self.config.hit_stun_duration));
    }

    /// A thrown mushroom landed on this character
    pub fn apply_item_hit(&mut self, animator: &mut dyn AnimationSink) {
        self.receive_hit(animator);
        self.effects.start(TimedEffect::slow(
            self.config.slow_factor,
            self.config.slow_duration,
        ));
    }

    /// Spend stamina for an action. Fails without change when short.
    pub fn spend_stamina(&mut self, cost: f32) -> bool {
        self.stamina.debit(cost)
    }

    /// Add stamina from a pickup
    pub fn restore_stamina(&mut self, amount: f32) {
        self.stamina.restore(amount);
    }

    pub fn add_kill(&mut self) {
        self.kill_count += 1;
        self.events.push(GameEvent::KillCountChanged {
            player: self.slot,
            kills: self.kill_count,
        });
    }

    pub fn play_sound(&mut self, cue: SoundCue) {
        self.events.push(GameEvent::Sound {
            player: self.slot,
            cue,
        });
    }

    /// Pick up a mushroom. Returns false when the pouch is full.
    pub fn collect_item(&mut self) -> bool {
        if !self.items.collect() {
            return false;
        }
        self.push_item_count();
        true
    }

    /// Put the mushroom in hand or away
    pub fn toggle_item_selection(&mut self) -> bool {
        if !self.items.toggle_selection() {
            log::debug!(
                "{} cannot select: {}/{} mushrooms",
                self.slot,
                self.items.held(),
                self.items.max()
            );
            return false;
        }
        self.events.push(GameEvent::ItemSelectionChanged {
            player: self.slot,
            in_hand: self.items.is_selected(),
        });
        true
    }

    /// Throw the selected mushroom at `target`.
    ///
    /// `target_position` is `None` when the target is not in the arena. Every
    /// failed precondition is a no-op.
    pub fn try_throw(
        &mut self,
        target: PlayerSlot,
        target_position: Option<Vec3>,
        animator: &mut dyn AnimationSink,
    ) -> Option<ThrownItem> {
        if !self.items.can_throw() {
            log::debug!("{} cannot throw: no mushroom in hand", self.slot);
            return None;
        }
        let Some(target_position) = target_position else {
            log::warn!("{}", GameError::MissingTarget(target));
            return None;
        };
        let distance = self.position.distance(target_position);
        if distance > self.config.throw_range {
            log::debug!("{} cannot throw: {target} is {distance:.1} away", self.slot);
            return None;
        }

        self.items.take_all();
        self.push_item_count();
        self.events.push(GameEvent::ItemSelectionChanged {
            player: self.slot,
            in_hand: false,
        });
        animator.trigger(params::THROW);
        self.play_sound(SoundCue::Throw);
        self.events.push(GameEvent::ItemThrown {
            from: self.slot,
            to: target,
        });

        let origin = self.position + math::yaw_rotation(self.yaw) * self.config.throw_origin_offset;
        Some(ThrownItem::new(
            self.slot,
            target,
            origin,
            self.config.throw_duration,
            self.config.throw_arc_height,
        ))
    }

    fn push_item_count(&mut self) {
        self.events.push(GameEvent::ItemCountChanged {
            player: self.slot,
            held: self.items.held(),
            max: self.items.max(),
        });
    }
}
