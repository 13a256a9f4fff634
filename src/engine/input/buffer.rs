// Input buffering so that early presses still register

use super::action::Action;
use std::collections::VecDeque;

/// Maximum number of buffered inputs to store
const MAX_BUFFER_SIZE: usize = 8;

/// Represents a single buffered input
#[derive(Debug, Clone, Copy)]
pub struct BufferedInput {
    pub action: Action,
    /// Seconds until this press stops counting
    pub remaining: f32,
}

impl BufferedInput {
    /// Create a new buffered input that stays valid for `window` seconds
    pub fn new(action: Action, window: f32) -> Self {
        Self {
            action,
            remaining: window,
        }
    }

    /// Age the input by `dt` seconds
    pub fn age(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    /// Check if this input has expired
    pub fn is_expired(&self) -> bool {
        self.remaining <= 0.0
    }
}

/// Time-windowed input buffer for a single player
///
/// A jump pressed slightly before touching the ground is kept for the grace
/// period and fires as soon as the character is able to jump.
#[derive(Debug)]
pub struct InputBuffer {
    buffer: VecDeque<BufferedInput>,
}

impl InputBuffer {
    /// Create a new input buffer
    pub fn new() -> Self {
        Self {
            buffer: VecDeque::with_capacity(MAX_BUFFER_SIZE),
        }
    }

    /// Add an input to the buffer, valid for `window` seconds.
    /// Pressing again refreshes the window of an already buffered action.
    pub fn push(&mut self, action: Action, window: f32) {
        if let Some(existing) = self.buffer.iter_mut().find(|input| input.action == action) {
            existing.remaining = window;
            return;
        }

        self.buffer.push_back(BufferedInput::new(action, window));
        if self.buffer.len() > MAX_BUFFER_SIZE {
            self.buffer.pop_front();
        }
    }

    /// Check if an action is currently buffered
    pub fn has(&self, action: Action) -> bool {
        self.buffer.iter().any(|input| input.action == action)
    }

    /// Consume an action from the buffer if it exists
    /// Returns true if the action was found and consumed
    pub fn consume(&mut self, action: Action) -> bool {
        if let Some(pos) = self.buffer.iter().position(|input| input.action == action) {
            self.buffer.remove(pos);
            true
        } else {
            false
        }
    }

    /// Age all inputs by `dt` and remove expired ones
    pub fn update(&mut self, dt: f32) {
        for input in &mut self.buffer {
            input.age(dt);
        }
        self.buffer.retain(|input| !input.is_expired());
    }

    /// Clear all buffered inputs
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Get the number of buffered inputs
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl Default for InputBuffer {
    fn default() -> Self {
        Self::new()
    }
}
