// Player melee attacks against enemies

use crate::game::characters::{params, AnimationSink, Character};
use crate::game::enemies::{DamageOutcome, Enemy, EnemyId};
use crate::game::events::SoundCue;

/// Result of an attack attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackOutcome {
    /// Not enough stamina; nothing changed
    NoStamina,
    /// Swung at nothing; no stamina spent
    NoTarget,
    Hit {
        enemy: EnemyId,
        health: i32,
        max_health: i32,
        killed: bool,
    },
}

/// Index of the nearest targetable enemy within `range`.
/// Ties go to the first enemy in scan order.
pub fn nearest_target(from: glam::Vec3, enemies: &[Enemy], range: f32) -> Option<usize> {
    let range_sq = range * range;
    let mut best: Option<(usize, f32)> = None;

    for (index, enemy) in enemies.iter().enumerate() {
        if !enemy.is_targetable() {
            continue;
        }
        let distance_sq = from.distance_squared(enemy.position());
        if distance_sq > range_sq {
            continue;
        }
        match best {
            Some((_, best_sq)) if distance_sq >= best_sq => {}
            _ => best = Some((index, distance_sq)),
        }
    }

    best.map(|(index, _)| index)
}

/// Swing at the nearest enemy in reach
pub fn attempt_attack(
    attacker: &mut Character,
    enemies: &mut [Enemy],
    animator: &mut dyn AnimationSink,
) -> AttackOutcome {
    let config = attacker.config();
    let (cost, range, damage) = (config.attack_stamina_cost, config.attack_range, config.damage_dealt);

    if attacker.stamina().current() < cost {
        log::debug!(
            "{} cannot attack: stamina {:.1} < {:.1}",
            attacker.slot(),
            attacker.stamina().current(),
            cost
        );
        return AttackOutcome::NoStamina;
    }

    animator.trigger(params::ATTACK);

    let Some(index) = nearest_target(attacker.position(), enemies, range) else {
        return AttackOutcome::NoTarget;
    };

    if !attacker.spend_stamina(cost) {
        return AttackOutcome::NoStamina;
    }
    attacker.play_sound(SoundCue::Punch);

    let enemy = &mut enemies[index];
    let killed = match enemy.take_damage(damage, Some(attacker.slot())) {
        DamageOutcome::Killed => {
            attacker.add_kill();
            true
        }
        DamageOutcome::Damaged { .. } | DamageOutcome::Ignored => false,
    };

    AttackOutcome::Hit {
        enemy: enemy.id(),
        health: enemy.health(),
        max_health: enemy.max_health(),
        killed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::PlayerSlot;
    use crate::game::characters::config::CharacterConfig;
    use crate::game::characters::{AnimationParams, BASE_CONFIG};
    use crate::game::enemies::config::BASE_ENEMY;
    use approx::assert_abs_diff_eq;
    use glam::Vec3;

    fn attacker(stamina: f32) -> Character {
        let config = CharacterConfig {
            starting_stamina: stamina,
            ..BASE_CONFIG
        };
        Character::new(PlayerSlot::One, "Hero", config, Vec3::ZERO, 0.0)
    }

    fn enemies_at(distances: &[f32]) -> Vec<Enemy> {
        distances
            .iter()
            .enumerate()
            .map(|(i, d)| Enemy::new(EnemyId(i as u32), "Grunt", BASE_ENEMY, Vec3::new(*d, 0.0, 0.0)))
            .collect()
    }

    #[test]
    fn test_nearest_enemy_in_range_is_hit() {
        let mut character = attacker(20.0);
        let mut enemies = enemies_at(&[2.9, 1.5, 5.0]);
        let mut animator = AnimationParams::new();

        let outcome = attempt_attack(&mut character, &mut enemies, &mut animator);

        assert!(matches!(outcome, AttackOutcome::Hit { enemy: EnemyId(1), .. }));
        assert_eq!(enemies[1].health(), 1);
        assert_eq!(enemies[0].health(), 3);
        assert_eq!(enemies[2].health(), 3);
        assert_abs_diff_eq!(character.stamina().current(), 5.0);
        assert!(animator.was_triggered(params::ATTACK));
    }

    #[test]
    fn test_insufficient_stamina_changes_nothing() {
        let mut character = attacker(14.0);
        let mut enemies = enemies_at(&[1.5, 2.9, 5.0]);
        let mut animator = AnimationParams::new();

        let outcome = attempt_attack(&mut character, &mut enemies, &mut animator);

        assert_eq!(outcome, AttackOutcome::NoStamina);
        assert!(enemies.iter().all(|enemy| enemy.health() == 3));
        assert_eq!(character.stamina().current(), 14.0);
    }

    #[test]
    fn test_no_target_spends_nothing() {
        let mut character = attacker(20.0);
        let mut enemies = enemies_at(&[3.5, 8.0]);
        let mut animator = AnimationParams::new();

        assert_eq!(
            attempt_attack(&mut character, &mut enemies, &mut animator),
            AttackOutcome::NoTarget
        );
        assert_eq!(character.stamina().current(), 20.0);
    }

    #[test]
    fn test_tie_goes_to_first_enemy() {
        let enemies = vec![
            Enemy::new(EnemyId(0), "Grunt", BASE_ENEMY, Vec3::new(2.0, 0.0, 0.0)),
            Enemy::new(EnemyId(1), "Grunt", BASE_ENEMY, Vec3::new(-2.0, 0.0, 0.0)),
        ];
        assert_eq!(nearest_target(Vec3::ZERO, &enemies, 3.0), Some(0));
    }

    #[test]
    fn test_dead_enemies_are_skipped() {
        let mut enemies = enemies_at(&[1.0, 2.0]);
        enemies[0].take_damage(10, None);
        assert_eq!(nearest_target(Vec3::ZERO, &enemies, 3.0), Some(1));
    }

    #[test]
    fn test_killing_blow_counts() {
        let mut character = attacker(20.0);
        let mut enemies = enemies_at(&[1.0]);
        enemies[0].take_damage(2, None);
        let mut animator = AnimationParams::new();

        let outcome = attempt_attack(&mut character, &mut enemies, &mut animator);

        assert!(matches!(outcome, AttackOutcome::Hit { killed: true, .. }));
        assert_eq!(character.kill_count(), 1);
        assert!(!enemies[0].is_alive());
    }
}
