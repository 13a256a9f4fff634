// Gameplay: characters, enemies, combat, course and the arena tying them together

pub mod arena;
pub mod characters;
pub mod combat;
pub mod course;
pub mod enemies;
pub mod error;
pub mod events;

pub use error::GameError;
