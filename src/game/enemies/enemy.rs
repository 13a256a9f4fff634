// Enemy entity

use glam::Vec3;
use rand::Rng;

use super::behavior::{decide, EnemyState, Perception};
use super::config::EnemyConfig;
use super::EnemyId;
use crate::core::math;
use crate::engine::input::PlayerSlot;

/// An attack that connected with a player this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyStrike {
    pub enemy: EnemyId,
    pub target: PlayerSlot,
    /// Where the blow came from
    pub source: Vec3,
    pub damage: i32,
}

/// Result of dealing damage to an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Already dead, nothing happened
    Ignored,
    Damaged { health: i32 },
    Killed,
}

/// AI-controlled enemy
#[derive(Debug, Clone)]
pub struct Enemy {
    id: EnemyId,
    kind: &'static str,
    config: EnemyConfig,

    position: Vec3,
    original_position: Vec3,
    patrol_destination: Option<Vec3>,

    health: i32,
    state: EnemyState,
    /// Simulation time at which the last attack started
    last_attack_time: Option<f32>,
    recovery_remaining: f32,

    collision_enabled: bool,
    removal_remaining: f32,
    killed_by: Option<PlayerSlot>,
}

impl Enemy {
    pub fn new(id: EnemyId, kind: &'static str, config: EnemyConfig, position: Vec3) -> Self {
        Self {
            id,
            kind,
            health: config.max_health,
            removal_remaining: config.removal_delay,
            config,
            position,
            original_position: position,
            patrol_destination: None,
            state: EnemyState::Patrol,
            last_attack_time: None,
            recovery_remaining: 0.0,
            collision_enabled: true,
            killed_by: None,
        }
    }

    pub fn id(&self) -> EnemyId {
        self.id
    }

    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn config(&self) -> &EnemyConfig {
        &self.config
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Place the enemy (scripted scenarios)
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn original_position(&self) -> Vec3 {
        self.original_position
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn max_health(&self) -> i32 {
        self.config.max_health
    }

    pub fn state(&self) -> EnemyState {
        self.state
    }

    pub fn last_attack_time(&self) -> Option<f32> {
        self.last_attack_time
    }

    pub fn killed_by(&self) -> Option<PlayerSlot> {
        self.killed_by
    }

    pub fn is_alive(&self) -> bool {
        self.state != EnemyState::Dead
    }

    pub fn collision_enabled(&self) -> bool {
        self.collision_enabled
    }

    /// Whether player attacks can select this enemy
    pub fn is_targetable(&self) -> bool {
        self.is_alive() && self.collision_enabled
    }

    /// Dead long enough for the death animation to finish
    pub fn should_remove(&self) -> bool {
        self.state == EnemyState::Dead && self.removal_remaining <= 0.0
    }

    fn set_state(&mut self, state: EnemyState) {
        if self.state != state {
            log::trace!("Enemy {} {} -> {}", self.id, self.state.name(), state.name());
            self.state = state;
        }
    }

    /// Apply damage. Health at or below zero kills the enemy.
    pub fn take_damage(&mut self, amount: i32, attacker: Option<PlayerSlot>) -> DamageOutcome {
        if !self.is_alive() {
            return DamageOutcome::Ignored;
        }

        self.health -= amount;
        if self.health > 0 {
            return DamageOutcome::Damaged {
                health: self.health,
            };
        }

        self.health = 0;
        self.set_state(EnemyState::Dead);
        self.collision_enabled = false;
        self.recovery_remaining = 0.0;
        self.removal_remaining = self.config.removal_delay;
        self.killed_by = attacker;
        log::info!("Enemy {} ({}) died", self.id, self.kind);
        DamageOutcome::Killed
    }

    /// Run one tick of perception, decision and movement.
    ///
    /// `players` lists every player's current position. Returns the strike
    /// when an attack starts this tick.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        dt: f32,
        now: f32,
        players: &[(PlayerSlot, Vec3)],
        rng: &mut R,
    ) -> Option<EnemyStrike> {
        if !self.is_alive() {
            self.removal_remaining = (self.removal_remaining - dt).max(0.0);
            return None;
        }

        if self.recovery_remaining > 0.0 {
            self.recovery_remaining -= dt;
            if self.recovery_remaining > 0.0 {
                return None;
            }
        }

        let nearest = nearest_player(self.position, players);
        let perception = Perception {
            nearest_distance: nearest.map(|(_, position)| self.position.distance(position)),
            distance_from_origin: math::flatten(self.original_position - self.position).length(),
            attack_ready: self
                .last_attack_time
                .map_or(true, |last| now - last >= self.config.attack_cooldown),
        };

        let next = decide(self.state, &perception, &self.config);
        self.set_state(next);

        match next {
            EnemyState::Attack => {
                let (target, _) = nearest?;
                self.last_attack_time = Some(now);
                self.recovery_remaining = self.config.attack_recovery;
                log::debug!("Enemy {} attacks {}", self.id, target);
                return Some(EnemyStrike {
                    enemy: self.id,
                    target,
                    source: self.position,
                    damage: self.config.attack_damage,
                });
            }
            EnemyState::Chase => {
                if let Some((_, target)) = nearest {
                    let stop = self.config.attack_range * 0.5;
                    self.move_towards(target, self.config.chase_speed * dt, stop);
                }
            }
            EnemyState::ReturnToOrigin => {
                self.patrol_destination = None;
                self.move_towards(self.original_position, self.config.patrol_speed * dt, 0.0);
            }
            EnemyState::Patrol => self.patrol(dt, rng),
            EnemyState::Dead => {}
        }
        None
    }

    fn patrol<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) {
        let arrived = self.patrol_destination.map_or(true, |destination| {
            math::flatten(destination - self.position).length() <= self.config.arrive_distance
        });
        if arrived {
            let range = self.config.patrol_range;
            let offset = Vec3::new(
                rng.gen_range(-1.0f32..=1.0) * range,
                0.0,
                rng.gen_range(-1.0f32..=1.0) * range,
            );
            self.patrol_destination = Some(self.original_position + offset);
        }

        if let Some(destination) = self.patrol_destination {
            self.move_towards(destination, self.config.patrol_speed * dt, 0.0);
        }
    }

    /// Walk on the horizontal plane toward `target`, stopping `stop` short of it
    fn move_towards(&mut self, target: Vec3, max_step: f32, stop: f32) {
        let delta = math::flatten(target - self.position);
        let distance = delta.length();
        if distance <= stop {
            return;
        }
        let step = max_step.min(distance - stop);
        self.position += delta / distance * step;
    }
}

/// Nearest player by squared distance; the first one wins ties
fn nearest_player(from: Vec3, players: &[(PlayerSlot, Vec3)]) -> Option<(PlayerSlot, Vec3)> {
    let mut nearest: Option<(PlayerSlot, Vec3, f32)> = None;
    for &(slot, position) in players {
        let distance_sq = from.distance_squared(position);
        match nearest {
            Some((_, _, best)) if distance_sq >= best => {}
            _ => nearest = Some((slot, position, distance_sq)),
        }
    }
    nearest.map(|(slot, position, _)| (slot, position))
}
