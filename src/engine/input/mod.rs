// Input handling system
//
// The host engine owns device mapping. This module only holds the per-player
// state the simulation queries each tick: named buttons, named axes and a
// time-windowed buffer for early presses.
//
// ## Architecture
//
// - `action`: Player slots, button actions and axes
// - `buffer`: Time-windowed input buffering (jump grace period)
// - `player`: Per-player input state
// - `manager`: Input state for both local players
//
// ## Usage Example
//
// ```rust
// use engine::input::{Action, Axis, InputManager, PlayerSlot};
//
// let mut inputs = InputManager::new();
//
// // Host feeds device state between ticks
// inputs.player_mut(PlayerSlot::One).set_axis(Axis::MoveY, 1.0);
// inputs.player_mut(PlayerSlot::One).press(Action::Jump);
//
// arena.tick(dt, &inputs);
//
// // Clear per-tick edges
// inputs.update();
// ```

pub mod action;
pub mod buffer;
pub mod manager;
pub mod player;

// Re-export commonly used types
pub use action::{Action, Axis, PlayerSlot};
pub use buffer::InputBuffer;
pub use manager::InputManager;
pub use player::{PlayerInput, MOVE_DEADZONE};
