// Physics collaborators
//
// Collision resolution belongs to the host engine. Gameplay code talks to it
// through the `PhysicalMotor` trait and uses `TriggerVolume` for sensor zones.

pub mod motor;
pub mod trigger;

pub use motor::{FlatGroundMotor, PhysicalMotor};
pub use trigger::TriggerVolume;
