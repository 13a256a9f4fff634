// One-way notifications for audio and HUD collaborators

use glam::Vec3;
use std::fmt;

use crate::engine::input::PlayerSlot;
use crate::game::characters::StaminaTier;
use crate::game::enemies::EnemyId;

/// Sound cues the host plays as one-shots
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Punch,
    Throw,
}

/// Something the HUD or audio layer may want to react to
///
/// Events flow out of the simulation only; nothing in the core reads them back.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    StaminaChanged {
        player: PlayerSlot,
        value: f32,
        ratio: f32,
        tier: StaminaTier,
    },
    ItemCountChanged {
        player: PlayerSlot,
        held: u32,
        max: u32,
    },
    ItemSelectionChanged {
        player: PlayerSlot,
        in_hand: bool,
    },
    KillCountChanged {
        player: PlayerSlot,
        kills: u32,
    },
    VisibilityChanged {
        player: PlayerSlot,
        visible: bool,
    },
    Sound {
        player: PlayerSlot,
        cue: SoundCue,
    },
    CheckpointReached {
        player: PlayerSlot,
        position: Vec3,
    },
    Respawned {
        player: PlayerSlot,
        position: Vec3,
    },
    ItemThrown {
        from: PlayerSlot,
        to: PlayerSlot,
    },
    ItemLanded {
        from: PlayerSlot,
        target: PlayerSlot,
    },
    EnemyDamaged {
        enemy: EnemyId,
        health: i32,
        max_health: i32,
    },
    EnemyDied {
        enemy: EnemyId,
        killer: Option<PlayerSlot>,
    },
    EnemyRemoved {
        enemy: EnemyId,
    },
    EnemySpawned {
        enemy: EnemyId,
        kind: &'static str,
        position: Vec3,
    },
    GateOpened,
    RaceFinished {
        winner: PlayerSlot,
    },
    TimeUp,
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StaminaChanged {
                player,
                value,
                ratio,
                tier,
            } => write!(
                f,
                "{player} stamina {value:.1} ({:.0}%, {})",
                ratio * 100.0,
                tier.name()
            ),
            Self::ItemCountChanged { player, held, max } => {
                write!(f, "{player} Mushrooms: {held} / {max}")
            }
            Self::ItemSelectionChanged { player, in_hand } => {
                if *in_hand {
                    write!(f, "{player} readies a mushroom")
                } else {
                    write!(f, "{player} puts the mushroom away")
                }
            }
            Self::KillCountChanged { player, kills } => {
                write!(f, "{player} Enemy Count: {kills}")
            }
            Self::VisibilityChanged { player, visible } => {
                write!(f, "{player} visible: {visible}")
            }
            Self::Sound { player, cue } => write!(f, "{player} plays {cue:?}"),
            Self::CheckpointReached { player, position } => {
                write!(f, "{player} reached checkpoint at {position}")
            }
            Self::Respawned { player, position } => {
                write!(f, "{player} respawned at {position}")
            }
            Self::ItemThrown { from, to } => write!(f, "{from} throws a mushroom at {to}"),
            Self::ItemLanded { from, target } => write!(f, "{from}'s mushroom hits {target}"),
            Self::EnemyDamaged {
                enemy,
                health,
                max_health,
            } => write!(f, "Enemy {enemy} health {health}/{max_health}"),
            Self::EnemyDied { enemy, killer } => match killer {
                Some(player) => write!(f, "Enemy {enemy} defeated by {player}"),
                None => write!(f, "Enemy {enemy} defeated"),
            },
            Self::EnemyRemoved { enemy } => write!(f, "Enemy {enemy} removed"),
            Self::EnemySpawned {
                enemy,
                kind,
                position,
            } => write!(f, "Enemy {enemy} ({kind}) spawned at {position}"),
            Self::GateOpened => f.write_str("Gate opened"),
            Self::RaceFinished { winner } => write!(f, "{winner} reached the finish first"),
            Self::TimeUp => f.write_str("Time's Up!"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hud_text() {
        let event = GameEvent::ItemCountChanged {
            player: PlayerSlot::One,
            held: 2,
            max: 3,
        };
        assert_eq!(event.to_string(), "P1 Mushrooms: 2 / 3");

        let event = GameEvent::KillCountChanged {
            player: PlayerSlot::Two,
            kills: 4,
        };
        assert_eq!(event.to_string(), "P2 Enemy Count: 4");
    }

    #[test]
    fn test_time_up_text() {
        assert_eq!(GameEvent::TimeUp.to_string(), "Time's Up!");
    }
}
