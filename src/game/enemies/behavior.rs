// Enemy decision state machine
//
// Patrol -> Chase -> Attack -> (recovery) -> Chase/Patrol
// Losing the target while away from home sends the enemy back to its origin
// before it patrols again. Dead is terminal.

use super::config::EnemyConfig;

/// Enemy behaviour states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyState {
    /// Wandering between random destinations around the origin
    Patrol,
    /// Moving toward the nearest player
    Chase,
    /// Swinging at the nearest player, then recovering
    Attack,
    /// Walking back to the spawn position after losing the target
    ReturnToOrigin,
    /// Terminal; removed after the death animation
    Dead,
}

impl Default for EnemyState {
    fn default() -> Self {
        Self::Patrol
    }
}

impl EnemyState {
    pub fn name(self) -> &'static str {
        match self {
            Self::Patrol => "patrol",
            Self::Chase => "chase",
            Self::Attack => "attack",
            Self::ReturnToOrigin => "return",
            Self::Dead => "dead",
        }
    }
}

/// What the enemy knows about its surroundings this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perception {
    /// Distance to the nearest player, `None` when there are no players
    pub nearest_distance: Option<f32>,
    /// Distance from the current position to the spawn position
    pub distance_from_origin: f32,
    /// Whether the cooldown since the last attack start has elapsed
    pub attack_ready: bool,
}

/// Pick the next state. Pure, so every rule can be checked in isolation.
pub fn decide(current: EnemyState, perception: &Perception, config: &EnemyConfig) -> EnemyState {
    if current == EnemyState::Dead {
        return EnemyState::Dead;
    }

    match perception.nearest_distance {
        Some(distance) if distance <= config.attack_range => {
            if perception.attack_ready {
                EnemyState::Attack
            } else {
                // In reach but cooling down: hold on to the target
                EnemyState::Chase
            }
        }
        Some(distance) if distance <= config.sight_range => EnemyState::Chase,
        _ => {
            let away = perception.distance_from_origin > config.arrive_distance;
            match current {
                EnemyState::ReturnToOrigin | EnemyState::Chase | EnemyState::Attack if away => {
                    EnemyState::ReturnToOrigin
                }
                _ => EnemyState::Patrol,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::enemies::config::BASE_ENEMY;

    fn sees(distance: f32, ready: bool) -> Perception {
        Perception {
            nearest_distance: Some(distance),
            distance_from_origin: 0.0,
            attack_ready: ready,
        }
    }

    fn alone(distance_from_origin: f32) -> Perception {
        Perception {
            nearest_distance: Some(50.0),
            distance_from_origin,
            attack_ready: true,
        }
    }

    #[test]
    fn test_far_player_keeps_patrolling() {
        assert_eq!(decide(EnemyState::Patrol, &alone(0.0), &BASE_ENEMY), EnemyState::Patrol);
    }

    #[test]
    fn test_no_players_patrols() {
        let perception = Perception {
            nearest_distance: None,
            distance_from_origin: 0.0,
            attack_ready: true,
        };
        assert_eq!(decide(EnemyState::Patrol, &perception, &BASE_ENEMY), EnemyState::Patrol);
    }

    #[test]
    fn test_player_in_sight_is_chased() {
        assert_eq!(decide(EnemyState::Patrol, &sees(8.0, true), &BASE_ENEMY), EnemyState::Chase);
    }

    #[test]
    fn test_player_in_reach_is_attacked() {
        assert_eq!(decide(EnemyState::Chase, &sees(1.5, true), &BASE_ENEMY), EnemyState::Attack);
    }

    #[test]
    fn test_cooldown_holds_attack() {
        assert_eq!(decide(EnemyState::Chase, &sees(1.5, false), &BASE_ENEMY), EnemyState::Chase);
    }

    #[test]
    fn test_lost_target_returns_home() {
        assert_eq!(
            decide(EnemyState::Chase, &alone(6.0), &BASE_ENEMY),
            EnemyState::ReturnToOrigin
        );
        assert_eq!(
            decide(EnemyState::Attack, &alone(6.0), &BASE_ENEMY),
            EnemyState::ReturnToOrigin
        );
    }

    #[test]
    fn test_return_is_completed_before_patrol() {
        assert_eq!(
            decide(EnemyState::ReturnToOrigin, &alone(3.0), &BASE_ENEMY),
            EnemyState::ReturnToOrigin
        );
        assert_eq!(
            decide(EnemyState::ReturnToOrigin, &alone(0.5), &BASE_ENEMY),
            EnemyState::Patrol
        );
    }

    #[test]
    fn test_patrol_far_from_origin_stays_patrol() {
        assert_eq!(decide(EnemyState::Patrol, &alone(8.0), &BASE_ENEMY), EnemyState::Patrol);
    }

    #[test]
    fn test_dead_is_terminal() {
        assert_eq!(decide(EnemyState::Dead, &sees(1.0, true), &BASE_ENEMY), EnemyState::Dead);
    }
}
