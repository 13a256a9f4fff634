// Character animation intent
//
// Gameplay code never blends clips. It writes named parameters into the host's
// animator and reads back a single fact: whether the hit reaction is playing.

use std::collections::HashMap;

/// Animator parameter and trigger names shared with the host
pub mod params {
    pub const IS_GROUNDED: &str = "isGrounded";
    pub const IS_JUMPING: &str = "isJumping";
    pub const IS_FALLING: &str = "isFalling";
    pub const IS_CROUCHING: &str = "isCrouching";
    pub const MOVE_X: &str = "MoveX";
    pub const MOVE_Y: &str = "MoveY";

    pub const ATTACK: &str = "Attack";
    pub const THROW: &str = "Throw";
    pub const LANDING: &str = "Landing";
    pub const TAKE_HIT: &str = "TakeHit";

    /// Animator state entered by the `TakeHit` trigger
    pub const HIT_REACTION_STATE: &str = "Take hit";
}

/// Write-only view of the host animator plus the hit-reaction query
pub trait AnimationSink {
    fn set_bool(&mut self, name: &'static str, value: bool);
    fn set_float(&mut self, name: &'static str, value: f32);
    fn trigger(&mut self, name: &'static str);
    /// Whether the animator is currently in the hit-reaction state
    fn is_in_hit_reaction(&self) -> bool;

    /// Advance clip playback. Host animators run on their own clock.
    fn advance(&mut self, _dt: f32) {}
}

/// A one-shot animator state entered through a trigger
#[derive(Debug, Clone)]
pub struct OneShotClip {
    /// Animator state name (e.g. "Take hit")
    pub state: &'static str,
    /// Length of the clip in seconds
    pub duration: f32,
}

impl OneShotClip {
    pub fn new(state: &'static str, duration: f32) -> Self {
        Self { state, duration }
    }
}

/// In-process animator stand-in
///
/// Records every parameter written, remembers fired triggers until drained
/// and plays one-shot states for their clip duration so that the hit-reaction
/// query behaves like the real animator.
#[derive(Debug, Default)]
pub struct AnimationParams {
    bools: HashMap<&'static str, bool>,
    floats: HashMap<&'static str, f32>,
    /// Triggers fired since the last `drain_triggers`
    fired: Vec<&'static str>,
    /// Trigger name -> one-shot state it enters
    clips: HashMap<&'static str, OneShotClip>,
    /// Currently playing one-shot and its remaining time
    current: Option<(&'static str, f32)>,
}

impl AnimationParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Animator with the standard character one-shots
    pub fn with_standard_clips() -> Self {
        let mut animator = Self::new();
        animator.add_clip(
            params::TAKE_HIT,
            OneShotClip::new(params::HIT_REACTION_STATE, 0.6),
        );
        animator.add_clip(params::ATTACK, OneShotClip::new("Punch", 0.5));
        animator.add_clip(params::THROW, OneShotClip::new("Throw", 0.6));
        animator.add_clip(params::LANDING, OneShotClip::new("Landing", 0.3));
        animator
    }

    /// Register the one-shot state entered by a trigger
    pub fn add_clip(&mut self, trigger: &'static str, clip: OneShotClip) {
        self.clips.insert(trigger, clip);
    }

    /// Advance the playing one-shot (called every tick)
    pub fn update(&mut self, dt: f32) {
        if let Some((_, remaining)) = self.current.as_mut() {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.current = None;
            }
        }
    }

    pub fn get_bool(&self, name: &str) -> bool {
        self.bools.get(name).copied().unwrap_or(false)
    }

    pub fn get_float(&self, name: &str) -> f32 {
        self.floats.get(name).copied().unwrap_or(0.0)
    }

    /// Name of the one-shot state currently playing, if any
    pub fn current_state(&self) -> Option<&'static str> {
        self.current.map(|(state, _)| state)
    }

    /// Check whether a trigger fired since the last drain
    pub fn was_triggered(&self, name: &str) -> bool {
        self.fired.iter().any(|fired| *fired == name)
    }

    /// Take all triggers fired since the last drain
    pub fn drain_triggers(&mut self) -> Vec<&'static str> {
        std::mem::take(&mut self.fired)
    }
}

impl AnimationSink for AnimationParams {
    fn set_bool(&mut self, name: &'static str, value: bool) {
        self.bools.insert(name, value);
    }

    fn set_float(&mut self, name: &'static str, value: f32) {
        self.floats.insert(name, value);
    }

    fn trigger(&mut self, name: &'static str) {
        self.fired.push(name);
        if let Some(clip) = self.clips.get(name) {
            // A hit reaction is never cut short by a lower priority one-shot
            let in_hit = self.current_state() == Some(params::HIT_REACTION_STATE);
            if !in_hit || clip.state == params::HIT_REACTION_STATE {
                self.current = Some((clip.state, clip.duration));
            }
        }
    }

    fn is_in_hit_reaction(&self) -> bool {
        self.current_state() == Some(params::HIT_REACTION_STATE)
    }

    fn advance(&mut self, dt: f32) {
        self.update(dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_recorded() {
        let mut animator = AnimationParams::new();
        animator.set_bool(params::IS_GROUNDED, true);
        animator.set_float(params::MOVE_X, 0.5);

        assert!(animator.get_bool(params::IS_GROUNDED));
        assert!(!animator.get_bool(params::IS_JUMPING));
        assert_eq!(animator.get_float(params::MOVE_X), 0.5);
    }

    #[test]
    fn test_triggers_drained() {
        let mut animator = AnimationParams::new();
        animator.trigger(params::ATTACK);
        assert!(animator.was_triggered(params::ATTACK));

        let fired = animator.drain_triggers();
        assert_eq!(fired, vec![params::ATTACK]);
        assert!(!animator.was_triggered(params::ATTACK));
    }

    #[test]
    fn test_hit_reaction_plays_for_clip_duration() {
        let mut animator = AnimationParams::with_standard_clips();
        assert!(!animator.is_in_hit_reaction());

        animator.trigger(params::TAKE_HIT);
        assert!(animator.is_in_hit_reaction());

        animator.update(0.5);
        assert!(animator.is_in_hit_reaction());

        animator.update(0.2);
        assert!(!animator.is_in_hit_reaction());
        assert_eq!(animator.current_state(), None);
    }

    #[test]
    fn test_attack_does_not_interrupt_hit_reaction() {
        let mut animator = AnimationParams::with_standard_clips();
        animator.trigger(params::TAKE_HIT);
        animator.trigger(params::ATTACK);
        assert!(animator.is_in_hit_reaction());
    }

    #[test]
    fn test_unknown_trigger_has_no_state() {
        let mut animator = AnimationParams::new();
        animator.trigger("Wave");
        assert_eq!(animator.current_state(), None);
        assert!(animator.was_triggered("Wave"));
    }
}
