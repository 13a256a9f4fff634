// Course layout - pickups, checkpoints, obstacles, finish line, gate and timer

use glam::Vec3;

use crate::engine::input::PlayerSlot;
use crate::engine::physics::{PhysicalMotor, TriggerVolume};
use crate::game::characters::Character;
use crate::game::events::GameEvent;
use crate::game::GameError;

/// Offset from a checkpoint marker to the recorded checkpoint position
pub const CHECKPOINT_OFFSET: Vec3 = Vec3::new(0.0, 0.0, 0.5);

/// Course-wide tuning
#[derive(Debug, Clone)]
pub struct CourseConfig {
    /// Race time limit (seconds)
    pub time_limit: f32,
    /// Kills each player needs before the gate opens
    pub required_kills: u32,
    /// Characters below this height are respawned
    pub kill_height: f32,
    pub pickup_radius: f32,
    pub checkpoint_radius: f32,
    pub obstacle_radius: f32,
    pub finish_radius: f32,
}

pub const BASE_COURSE: CourseConfig = CourseConfig {
    time_limit: 300.0,
    required_kills: 1,
    kill_height: -20.0,
    pickup_radius: 1.0,
    checkpoint_radius: 2.0,
    obstacle_radius: 1.0,
    finish_radius: 3.0,
};

impl Default for CourseConfig {
    fn default() -> Self {
        BASE_COURSE
    }
}

impl CourseConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        let positive = [
            ("time_limit", self.time_limit),
            ("pickup_radius", self.pickup_radius),
            ("checkpoint_radius", self.checkpoint_radius),
            ("obstacle_radius", self.obstacle_radius),
            ("finish_radius", self.finish_radius),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(GameError::InvalidConfig {
                    field,
                    reason: format!("must be positive, got {value}"),
                });
            }
        }
        Ok(())
    }
}

/// What a pickup gives
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PickupKind {
    Mushroom,
    Stamina(f32),
}

/// Collectible that disappears on first touch
#[derive(Debug, Clone)]
pub struct Pickup {
    pub kind: PickupKind,
    volume: TriggerVolume,
    consumed: bool,
}

impl Pickup {
    pub fn position(&self) -> Vec3 {
        self.volume.center()
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed
    }
}

/// Checkpoint marker
#[derive(Debug, Clone)]
pub struct CheckpointMarker {
    volume: TriggerVolume,
    activated: bool,
}

impl CheckpointMarker {
    pub fn is_activated(&self) -> bool {
        self.activated
    }

    /// Position recorded for players passing this marker
    pub fn respawn_point(&self) -> Vec3 {
        self.volume.center() + CHECKPOINT_OFFSET
    }
}

/// Once both players have enough kills the gate opens for good
#[derive(Debug, Clone)]
pub struct Gate {
    required_kills: u32,
    open: bool,
}

impl Gate {
    pub fn new(required_kills: u32) -> Self {
        Self {
            required_kills,
            open: false,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Returns true on the tick the gate opens
    pub fn update(&mut self, kills: [u32; 2]) -> bool {
        if self.open {
            return false;
        }
        self.open = kills.iter().all(|&count| count >= self.required_kills);
        self.open
    }
}

/// Race timer counting down to zero
#[derive(Debug, Clone)]
pub struct Countdown {
    remaining: f32,
    expired: bool,
}

impl Countdown {
    pub fn new(seconds: f32) -> Self {
        Self {
            remaining: seconds,
            expired: false,
        }
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn is_expired(&self) -> bool {
        self.expired
    }

    /// Returns true on the tick the timer runs out
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.expired {
            return false;
        }
        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            self.expired = true;
            return true;
        }
        false
    }

    /// HUD text: `mm:ss`, or "Time's Up!" once expired
    pub fn display(&self) -> String {
        if self.expired {
            "Time's Up!".to_string()
        } else {
            format_time(self.remaining)
        }
    }
}

/// Format seconds as `mm:ss`
pub fn format_time(seconds: f32) -> String {
    let seconds = seconds.max(0.0);
    let minutes = (seconds / 60.0).floor() as u32;
    let secs = (seconds % 60.0).floor() as u32;
    format!("{minutes:02}:{secs:02}")
}

/// Every trigger-driven piece of the course
#[derive(Debug)]
pub struct Course {
    config: CourseConfig,
    pickups: Vec<Pickup>,
    checkpoints: Vec<CheckpointMarker>,
    obstacles: Vec<TriggerVolume>,
    finish: Option<TriggerVolume>,
    winner: Option<PlayerSlot>,
    gate: Gate,
    countdown: Countdown,
    events: Vec<GameEvent>,
}

impl Course {
    pub fn new(config: CourseConfig) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self {
            gate: Gate::new(config.required_kills),
            countdown: Countdown::new(config.time_limit),
            config,
            pickups: Vec::new(),
            checkpoints: Vec::new(),
            obstacles: Vec::new(),
            finish: None,
            winner: None,
            events: Vec::new(),
        })
    }

    pub fn add_pickup(&mut self, kind: PickupKind, position: Vec3) -> &mut Self {
        self.pickups.push(Pickup {
            kind,
            volume: TriggerVolume::new(position, self.config.pickup_radius),
            consumed: false,
        });
        self
    }

    pub fn add_checkpoint(&mut self, position: Vec3) -> &mut Self {
        self.checkpoints.push(CheckpointMarker {
            volume: TriggerVolume::new(position, self.config.checkpoint_radius),
            activated: false,
        });
        self
    }

    pub fn add_obstacle(&mut self, position: Vec3) -> &mut Self {
        self.obstacles
            .push(TriggerVolume::new(position, self.config.obstacle_radius));
        self
    }

    pub fn set_finish(&mut self, position: Vec3) -> &mut Self {
        self.finish = Some(TriggerVolume::new(position, self.config.finish_radius));
        self
    }

    pub fn pickups(&self) -> &[Pickup] {
        &self.pickups
    }

    pub fn checkpoints(&self) -> &[CheckpointMarker] {
        &self.checkpoints
    }

    pub fn gate(&self) -> &Gate {
        &self.gate
    }

    pub fn countdown(&self) -> &Countdown {
        &self.countdown
    }

    pub fn winner(&self) -> Option<PlayerSlot> {
        self.winner
    }

    pub fn kill_height(&self) -> f32 {
        self.config.kill_height
    }

    /// Run every trigger against one character
    pub fn update_character(&mut self, character: &mut Character, motor: &mut dyn PhysicalMotor) {
        let slot = character.slot();
        let position = character.position();

        if position.y < self.config.kill_height {
            log::info!("{} fell off the course", slot);
            character.respawn(motor);
            self.forget(slot);
            return;
        }

        for pickup in self.pickups.iter_mut().filter(|pickup| !pickup.consumed) {
            if !pickup.volume.update(slot, position) {
                continue;
            }
            pickup.consumed = true;
            match pickup.kind {
                PickupKind::Mushroom => {
                    character.collect_item();
                }
                PickupKind::Stamina(amount) => character.restore_stamina(amount),
            }
        }

        for marker in &mut self.checkpoints {
            if marker.volume.update(slot, position) {
                if !marker.activated {
                    marker.activated = true;
                    log::info!("Checkpoint at {} activated by {}", marker.volume.center(), slot);
                }
                character.set_checkpoint(marker.respawn_point());
            }
        }

        for obstacle in &mut self.obstacles {
            if obstacle.update(slot, position) {
                character.knockback_from(Some(obstacle.center()));
            }
        }

        if let Some(finish) = self.finish.as_mut() {
            if finish.update(slot, position) && self.winner.is_none() {
                self.winner = Some(slot);
                log::info!("{} reached the finish first", slot);
                self.events.push(GameEvent::RaceFinished { winner: slot });
            }
        }
    }

    /// Per-tick course state that does not depend on a single character
    pub fn tick(&mut self, dt: f32, kills: [u32; 2]) {
        if self.gate.update(kills) {
            log::info!("Gate opened");
            self.events.push(GameEvent::GateOpened);
        }
        if self.winner.is_none() && self.countdown.tick(dt) {
            log::info!("Time's up");
            self.events.push(GameEvent::TimeUp);
        }
    }

    /// Drop trigger occupancy for a teleported character
    pub fn forget(&mut self, slot: PlayerSlot) {
        for pickup in &mut self.pickups {
            pickup.volume.clear(slot);
        }
        for marker in &mut self.checkpoints {
            marker.volume.clear(slot);
        }
        for obstacle in &mut self.obstacles {
            obstacle.clear(slot);
        }
        if let Some(finish) = self.finish.as_mut() {
            finish.clear(slot);
        }
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
