// Engine modules: fixed-step loop, input, physics seams

pub mod game_loop;
pub mod input;
pub mod physics;
