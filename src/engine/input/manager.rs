// Input manager - holds the input state of both local players

use super::action::{Action, PlayerSlot};
use super::player::PlayerInput;

/// Input state for both local players
#[derive(Debug, Clone)]
pub struct InputManager {
    players: [PlayerInput; 2],
}

impl InputManager {
    /// Create a new input manager
    pub fn new() -> Self {
        Self {
            players: [
                PlayerInput::new(PlayerSlot::One),
                PlayerInput::new(PlayerSlot::Two),
            ],
        }
    }

    /// Input state for a player slot
    pub fn player(&self, slot: PlayerSlot) -> &PlayerInput {
        &self.players[slot.index()]
    }

    /// Mutable input state for a player slot
    pub fn player_mut(&mut self, slot: PlayerSlot) -> &mut PlayerInput {
        &mut self.players[slot.index()]
    }

    /// Clear per-tick edges for every player.
    /// Call once after every simulation tick.
    pub fn update(&mut self) {
        for player in &mut self.players {
            player.update();
        }
    }

    /// Check if any player pressed a specific action this tick
    pub fn any_player_just_pressed(&self, action: Action) -> bool {
        self.players.iter().any(|p| p.just_pressed(action))
    }

    /// Reset all player input states
    pub fn reset_all(&mut self) {
        for player in &mut self.players {
            player.reset();
        }
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}
