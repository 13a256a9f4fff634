use crate::engine::input::PlayerSlot;
use crate::game::enemies::EnemyId;

/// Gameplay errors
///
/// Only covers misconfiguration and missing collaborators. Gameplay
/// preconditions (not enough stamina, nothing in range, ...) are ordinary
/// outcomes and never surface as errors.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("Invalid config field `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Player not in arena: {0}")]
    MissingPlayer(PlayerSlot),

    #[error("Throw target not found: {0}")]
    MissingTarget(PlayerSlot),

    #[error("Unknown enemy: {0}")]
    UnknownEnemy(EnemyId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_error_display() {
        let err = GameError::MissingTarget(PlayerSlot::Two);
        assert_eq!(err.to_string(), "Throw target not found: P2");

        let err = GameError::InvalidConfig {
            field: "max_stamina",
            reason: "must be positive".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid config field `max_stamina`: must be positive"
        );
    }
}
