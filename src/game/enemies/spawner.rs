// Enemy spawner - initial placement and delayed respawns

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::config::EnemyKind;
use super::enemy::Enemy;
use super::EnemyId;
use crate::game::GameError;

/// Default delay before a dead enemy comes back (seconds)
pub const DEFAULT_RESPAWN_DELAY: f32 = 15.0;

#[derive(Debug, Clone)]
struct PendingRespawn {
    position: Vec3,
    remaining: f32,
}

/// Places one enemy per spawn point and brings dead ones back
///
/// Kind picks and patrol destinations share one seeded RNG so a match replays
/// identically for the same seed.
#[derive(Debug)]
pub struct EnemySpawner {
    kinds: Vec<EnemyKind>,
    spawn_points: Vec<Vec3>,
    respawn_delay: f32,
    pending: Vec<PendingRespawn>,
    next_id: u32,
    rng: ChaCha8Rng,
}

impl EnemySpawner {
    pub fn new(
        kinds: Vec<EnemyKind>,
        spawn_points: Vec<Vec3>,
        respawn_delay: f32,
        seed: u64,
    ) -> Result<Self, GameError> {
        if kinds.is_empty() {
            return Err(GameError::InvalidConfig {
                field: "enemy_kinds",
                reason: "at least one enemy kind is required".to_string(),
            });
        }
        if respawn_delay < 0.0 {
            return Err(GameError::InvalidConfig {
                field: "respawn_delay",
                reason: format!("must not be negative, got {respawn_delay}"),
            });
        }
        for kind in &kinds {
            kind.config.validate()?;
        }

        Ok(Self {
            kinds,
            spawn_points,
            respawn_delay,
            pending: Vec::new(),
            next_id: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    pub fn spawn_points(&self) -> &[Vec3] {
        &self.spawn_points
    }

    /// Number of respawns waiting for their delay
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Shared RNG for enemy decisions
    pub fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Spawn one enemy at every spawn point (level start)
    pub fn spawn_all(&mut self) -> Vec<Enemy> {
        let points = self.spawn_points.clone();
        points.into_iter().map(|point| self.spawn_at(point)).collect()
    }

    /// Spawn a random kind at `position`
    pub fn spawn_at(&mut self, position: Vec3) -> Enemy {
        let index = self.rng.gen_range(0..self.kinds.len());
        let kind = &self.kinds[index];

        let id = EnemyId(self.next_id);
        self.next_id += 1;

        log::debug!("Spawning enemy {} ({}) at {}", id, kind.name, position);
        Enemy::new(id, kind.name, kind.config.clone(), position)
    }

    /// Queue a respawn at `position` after the respawn delay
    pub fn schedule_respawn(&mut self, position: Vec3) {
        self.pending.push(PendingRespawn {
            position,
            remaining: self.respawn_delay,
        });
    }

    /// Count down queued respawns and spawn the ones that are due
    pub fn tick(&mut self, dt: f32) -> Vec<Enemy> {
        for pending in &mut self.pending {
            pending.remaining -= dt;
        }

        let (due, waiting): (Vec<_>, Vec<_>) = self
            .pending
            .drain(..)
            .partition(|pending| pending.remaining <= 0.0);
        self.pending = waiting;

        due.into_iter()
            .map(|pending| self.spawn_at(pending.position))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::enemies::config::standard_kinds;

    fn spawner(seed: u64) -> EnemySpawner {
        let points = vec![Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 10.0)];
        EnemySpawner::new(standard_kinds(), points, DEFAULT_RESPAWN_DELAY, seed)
            .expect("valid spawner")
    }

    #[test]
    fn test_rejects_empty_kind_list() {
        let result = EnemySpawner::new(Vec::new(), vec![Vec3::ZERO], 15.0, 1);
        assert!(result.is_err());
    }

    #[test]
    fn test_spawns_one_per_point_with_unique_ids() {
        let mut spawner = spawner(1);
        let enemies = spawner.spawn_all();
        assert_eq!(enemies.len(), 3);
        assert_eq!(enemies[1].position(), Vec3::new(10.0, 0.0, 0.0));
        assert_ne!(enemies[0].id(), enemies[1].id());
        assert_ne!(enemies[1].id(), enemies[2].id());
    }

    #[test]
    fn test_same_seed_same_kinds() {
        let kinds_a: Vec<_> = spawner(42).spawn_all().iter().map(Enemy::kind).collect();
        let kinds_b: Vec<_> = spawner(42).spawn_all().iter().map(Enemy::kind).collect();
        assert_eq!(kinds_a, kinds_b);
    }

    #[test]
    fn test_respawn_after_delay_at_original_position() {
        let mut spawner = spawner(3);
        let position = Vec3::new(4.0, 0.0, 4.0);
        spawner.schedule_respawn(position);

        assert!(spawner.tick(14.0).is_empty());
        assert_eq!(spawner.pending_count(), 1);

        let respawned = spawner.tick(1.0);
        assert_eq!(respawned.len(), 1);
        assert_eq!(respawned[0].position(), position);
        assert_eq!(spawner.pending_count(), 0);
    }
}
