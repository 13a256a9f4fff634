// Character system
//
// This module contains everything related to playable characters:
// - Character tick and actions
// - Tuning shared by both players
// - Stamina pool, vertical motion state machine and timed effects
// - Mushroom pouch, thrown mushrooms and respawn handling
// - Animation intent written to the host animator

pub mod animation;
pub mod character;
pub mod checkpoint;
pub mod config;
pub mod effects;
pub mod items;
pub mod motion;
pub mod stamina;

// Re-export commonly used types
pub use animation::{params, AnimationParams, AnimationSink};
pub use character::Character;
pub use config::BASE_CONFIG;
pub use effects::EffectKind;
pub use items::{ArcStep, ThrownItem};
pub use stamina::StaminaTier;
