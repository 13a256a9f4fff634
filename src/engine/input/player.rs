// Per-player input state management

use super::action::{Action, Axis, PlayerSlot};
use std::collections::{HashMap, HashSet};

/// Input magnitude below which movement counts as "no input"
pub const MOVE_DEADZONE: f32 = 0.1;

/// Represents the input state for a single player
///
/// The host feeds it with `press`/`release`/`set_axis` between ticks; the
/// simulation only queries it.
#[derive(Debug, Clone)]
pub struct PlayerInput {
    slot: PlayerSlot,

    /// Actions that are currently held
    pressed: HashSet<Action>,

    /// Actions that were pressed since the last `update`
    just_pressed: HashSet<Action>,

    /// Actions that were released since the last `update`
    just_released: HashSet<Action>,

    /// Continuous axis values, clamped to -1.0..=1.0
    axes: HashMap<Axis, f32>,
}

impl PlayerInput {
    /// Create a new player input state
    pub fn new(slot: PlayerSlot) -> Self {
        Self {
            slot,
            pressed: HashSet::new(),
            just_pressed: HashSet::new(),
            just_released: HashSet::new(),
            axes: HashMap::new(),
        }
    }

    /// Get the player slot
    pub fn slot(&self) -> PlayerSlot {
        self.slot
    }

    /// Check if an action is currently held
    pub fn is_pressed(&self, action: Action) -> bool {
        self.pressed.contains(&action)
    }

    /// Check if an action was pressed this tick
    pub fn just_pressed(&self, action: Action) -> bool {
        self.just_pressed.contains(&action)
    }

    /// Check if an action was released this tick
    pub fn just_released(&self, action: Action) -> bool {
        self.just_released.contains(&action)
    }

    /// Current value of an axis (0.0 when never set)
    pub fn axis(&self, axis: Axis) -> f32 {
        self.axes.get(&axis).copied().unwrap_or(0.0)
    }

    /// Register an action press
    pub fn press(&mut self, action: Action) {
        if self.pressed.insert(action) {
            self.just_pressed.insert(action);
        }
    }

    /// Register an action release
    pub fn release(&mut self, action: Action) {
        if self.pressed.remove(&action) {
            self.just_released.insert(action);
        }
    }

    /// Set an axis value
    pub fn set_axis(&mut self, axis: Axis, value: f32) {
        self.axes.insert(axis, value.clamp(-1.0, 1.0));
    }

    /// Clear per-tick edges. Call once after every simulation tick.
    pub fn update(&mut self) {
        self.just_pressed.clear();
        self.just_released.clear();
    }

    /// Reset all input state
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.just_pressed.clear();
        self.just_released.clear();
        self.axes.clear();
    }

    /// Movement input as (strafe, forward)
    pub fn movement(&self) -> (f32, f32) {
        (self.axis(Axis::MoveX), self.axis(Axis::MoveY))
    }

    /// Length of the movement input vector
    pub fn movement_magnitude(&self) -> f32 {
        let (h, v) = self.movement();
        (h * h + v * v).sqrt()
    }

    /// Whether any movement axis is non-zero
    pub fn has_movement(&self) -> bool {
        let (h, v) = self.movement();
        h != 0.0 || v != 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_input_creation() {
        let input = PlayerInput::new(PlayerSlot::One);
        assert_eq!(input.slot(), PlayerSlot::One);
        assert!(!input.is_pressed(Action::Jump));
        assert_eq!(input.axis(Axis::MoveX), 0.0);
    }

    #[test]
    fn test_press_and_release() {
        let mut input = PlayerInput::new(PlayerSlot::One);
        input.press(Action::Jump);
        assert!(input.is_pressed(Action::Jump));
        assert!(input.just_pressed(Action::Jump));

        input.update();
        input.release(Action::Jump);
        assert!(!input.is_pressed(Action::Jump));
        assert!(input.just_released(Action::Jump));
    }

    #[test]
    fn test_just_pressed_cleared_on_update() {
        let mut input = PlayerInput::new(PlayerSlot::Two);
        input.press(Action::Attack);
        input.update();
        assert!(input.is_pressed(Action::Attack));
        assert!(!input.just_pressed(Action::Attack));
    }

    #[test]
    fn test_repeat_press_is_not_a_new_edge() {
        let mut input = PlayerInput::new(PlayerSlot::One);
        input.press(Action::Throw);
        input.update();
        input.press(Action::Throw);
        assert!(!input.just_pressed(Action::Throw));
    }

    #[test]
    fn test_release_unpressed_action() {
        let mut input = PlayerInput::new(PlayerSlot::One);
        input.release(Action::Jump);
        assert!(!input.just_released(Action::Jump));
    }

    #[test]
    fn test_axis_clamped() {
        let mut input = PlayerInput::new(PlayerSlot::One);
        input.set_axis(Axis::MoveY, 3.0);
        input.set_axis(Axis::MoveX, -2.0);
        assert_eq!(input.movement(), (-1.0, 1.0));
    }

    #[test]
    fn test_movement_magnitude() {
        let mut input = PlayerInput::new(PlayerSlot::One);
        assert!(!input.has_movement());
        input.set_axis(Axis::MoveX, 0.6);
        input.set_axis(Axis::MoveY, 0.8);
        assert!((input.movement_magnitude() - 1.0).abs() < 1e-6);
        assert!(input.has_movement());
    }

    #[test]
    fn test_reset() {
        let mut input = PlayerInput::new(PlayerSlot::One);
        input.press(Action::Jump);
        input.set_axis(Axis::LookX, 0.5);
        input.reset();
        assert!(!input.is_pressed(Action::Jump));
        assert_eq!(input.axis(Axis::LookX), 0.0);
    }
}
