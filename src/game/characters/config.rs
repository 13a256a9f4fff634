// Character tuning - both players share one configuration
// Values that differed between controller variants live here instead of in logic

use glam::Vec3;

use crate::game::GameError;

/// Tuning for a player character
#[derive(Debug, Clone)]
pub struct CharacterConfig {
    // Movement
    /// Ground movement speed (units/second)
    pub move_speed: f32,
    /// Turning speed for the look axis (degrees/second)
    pub rotation_speed: f32,
    /// Multiplier while crouching
    pub crouch_speed_factor: f32,
    /// Multiplier while stamina is critical
    pub exhausted_speed_factor: f32,

    // Jumping
    /// Initial vertical speed of a jump
    pub jump_speed: f32,
    /// Horizontal speed while airborne
    pub jump_horizontal_speed: f32,
    /// How long an early jump press stays valid (seconds)
    pub jump_button_grace_period: f32,
    /// Vertical acceleration (negative = down)
    pub gravity: f32,
    /// Vertical speed held while grounded to keep ground contact
    pub ground_stick_speed: f32,
    /// Vertical speed below which walking off a ledge counts as falling
    pub fall_speed_threshold: f32,
    /// Speed multiplier right after landing
    pub landing_speed_factor: f32,
    /// Duration of the landing slowdown (seconds)
    pub landing_duration: f32,

    // Stamina
    pub max_stamina: f32,
    pub starting_stamina: f32,
    /// Drain per second at full movement input
    pub stamina_depletion_rate: f32,
    /// Regeneration per second while idle or airborne
    pub stamina_regen_rate: f32,
    pub jump_stamina_cost: f32,
    pub attack_stamina_cost: f32,
    /// Absolute stamina at or below which the character is exhausted
    pub critical_stamina: f32,

    // Combat
    pub attack_range: f32,
    pub damage_dealt: i32,
    /// Movement lock after taking a hit (seconds)
    pub hit_stun_duration: f32,

    // Items
    pub max_items: u32,
    pub throw_range: f32,
    /// Flight time of a thrown item (seconds)
    pub throw_duration: f32,
    /// Height of the throw arc control point above the midpoint
    pub throw_arc_height: f32,
    /// Spawn point of thrown items relative to the character (local space)
    pub throw_origin_offset: Vec3,
    pub slow_factor: f32,
    pub slow_duration: f32,

    // Knockback and respawn
    pub knockback_strength: f32,
    pub knockback_duration: f32,
    pub blink_duration: f32,
    pub blink_interval: f32,
    /// Offset added to the checkpoint on respawn
    pub respawn_offset: Vec3,
}

/// The one configuration used by both players
pub const BASE_CONFIG: CharacterConfig = CharacterConfig {
    move_speed: 7.0,
    rotation_speed: 360.0,
    crouch_speed_factor: 0.5,
    exhausted_speed_factor: 0.5,

    jump_speed: 5.0,
    jump_horizontal_speed: 3.0,
    jump_button_grace_period: 0.2,
    gravity: -9.81,
    ground_stick_speed: -0.5,
    fall_speed_threshold: -2.0,
    landing_speed_factor: 0.5,
    landing_duration: 0.3,

    max_stamina: 20.0,
    starting_stamina: 20.0,
    stamina_depletion_rate: 5.0,
    stamina_regen_rate: 3.0,
    jump_stamina_cost: 10.0,
    attack_stamina_cost: 15.0,
    critical_stamina: 3.0,

    attack_range: 3.0,
    damage_dealt: 2,
    hit_stun_duration: 0.6,

    max_items: 3,
    throw_range: 30.0,
    throw_duration: 0.75,
    throw_arc_height: 2.0,
    throw_origin_offset: Vec3::new(0.3, 1.4, 0.5),
    slow_factor: 0.2,
    slow_duration: 5.0,

    knockback_strength: 3.0,
    knockback_duration: 0.5,
    blink_duration: 0.5,
    blink_interval: 0.3,
    respawn_offset: Vec3::new(0.0, -0.4, 0.0),
};

impl Default for CharacterConfig {
    fn default() -> Self {
        BASE_CONFIG
    }
}

impl CharacterConfig {
    /// Reject tunings the simulation cannot run with
    pub fn validate(&self) -> Result<(), GameError> {
        let positive = [
            ("move_speed", self.move_speed),
            ("max_stamina", self.max_stamina),
            ("jump_button_grace_period", self.jump_button_grace_period),
            ("landing_duration", self.landing_duration),
            ("attack_range", self.attack_range),
            ("hit_stun_duration", self.hit_stun_duration),
            ("throw_range", self.throw_range),
            ("throw_duration", self.throw_duration),
            ("slow_duration", self.slow_duration),
            ("knockback_duration", self.knockback_duration),
            ("blink_duration", self.blink_duration),
            ("blink_interval", self.blink_interval),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(GameError::InvalidConfig {
                    field,
                    reason: format!("must be positive, got {value}"),
                });
            }
        }

        let non_negative = [
            ("jump_stamina_cost", self.jump_stamina_cost),
            ("attack_stamina_cost", self.attack_stamina_cost),
            ("stamina_regen_rate", self.stamina_regen_rate),
            ("stamina_depletion_rate", self.stamina_depletion_rate),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(GameError::InvalidConfig {
                    field,
                    reason: format!("must not be negative, got {value}"),
                });
            }
        }

        if self.gravity >= 0.0 {
            return Err(GameError::InvalidConfig {
                field: "gravity",
                reason: "must point down".to_string(),
            });
        }
        if self.max_items == 0 {
            return Err(GameError::InvalidConfig {
                field: "max_items",
                reason: "must allow at least one item".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.slow_factor) {
            return Err(GameError::InvalidConfig {
                field: "slow_factor",
                reason: format!("must be within 0..=1, got {}", self.slow_factor),
            });
        }

        Ok(())
    }
}
