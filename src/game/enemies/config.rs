// Enemy tuning and the enemy kinds a spawner can pick from

use crate::game::GameError;

/// Tuning for one enemy kind
#[derive(Debug, Clone)]
pub struct EnemyConfig {
    pub max_health: i32,
    /// Distance at which a player is noticed
    pub sight_range: f32,
    pub attack_range: f32,
    /// Minimum time between attack starts (seconds)
    pub attack_cooldown: f32,
    /// Time spent in the attack before moving again (seconds)
    pub attack_recovery: f32,
    pub chase_speed: f32,
    pub patrol_speed: f32,
    /// Half extent of the square patrol destinations are picked from
    pub patrol_range: f32,
    /// Distance at which a destination counts as reached
    pub arrive_distance: f32,
    pub attack_damage: i32,
    /// Time a dead enemy stays in the arena for its death animation
    pub removal_delay: f32,
}

pub const BASE_ENEMY: EnemyConfig = EnemyConfig {
    max_health: 3,
    sight_range: 12.0,
    attack_range: 2.0,
    attack_cooldown: 1.5,
    attack_recovery: 0.8,
    chase_speed: 3.5,
    patrol_speed: 2.0,
    patrol_range: 10.0,
    arrive_distance: 1.0,
    attack_damage: 1,
    removal_delay: 2.0,
};

impl Default for EnemyConfig {
    fn default() -> Self {
        BASE_ENEMY
    }
}

impl EnemyConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.max_health <= 0 {
            return Err(GameError::InvalidConfig {
                field: "max_health",
                reason: format!("must be positive, got {}", self.max_health),
            });
        }

        let positive = [
            ("sight_range", self.sight_range),
            ("attack_range", self.attack_range),
            ("attack_cooldown", self.attack_cooldown),
            ("arrive_distance", self.arrive_distance),
            ("removal_delay", self.removal_delay),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(GameError::InvalidConfig {
                    field,
                    reason: format!("must be positive, got {value}"),
                });
            }
        }

        if self.attack_recovery < 0.0 {
            return Err(GameError::InvalidConfig {
                field: "attack_recovery",
                reason: "must not be negative".to_string(),
            });
        }
        Ok(())
    }
}

/// A named enemy variant
#[derive(Debug, Clone)]
pub struct EnemyKind {
    pub name: &'static str,
    pub config: EnemyConfig,
}

/// The variants placed by the standard course
pub fn standard_kinds() -> Vec<EnemyKind> {
    vec![
        EnemyKind {
            name: "Grunt",
            config: BASE_ENEMY,
        },
        EnemyKind {
            name: "Brute",
            config: EnemyConfig {
                max_health: 5,
                chase_speed: 2.5,
                attack_damage: 2,
                attack_cooldown: 2.0,
                ..BASE_ENEMY
            },
        },
        EnemyKind {
            name: "Scout",
            config: EnemyConfig {
                max_health: 2,
                sight_range: 16.0,
                chase_speed: 5.0,
                patrol_speed: 3.0,
                ..BASE_ENEMY
            },
        },
    ]
}
