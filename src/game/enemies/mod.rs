// Enemy system
//
// - `config`: Enemy tuning and kinds
// - `behavior`: Patrol/Chase/Attack/Return/Dead decisions
// - `enemy`: Enemy entity, damage and per-tick behaviour
// - `spawner`: Level-start placement and delayed respawns

pub mod behavior;
pub mod config;
pub mod enemy;
pub mod spawner;

use std::fmt;

pub use config::standard_kinds;
pub use enemy::{DamageOutcome, Enemy, EnemyStrike};
pub use spawner::{EnemySpawner, DEFAULT_RESPAWN_DELAY};

/// Unique identifier for an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(pub u32);

impl fmt::Display for EnemyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
