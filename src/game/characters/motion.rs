// Vertical motion state machine

use super::config::CharacterConfig;

/// Vertical movement phase of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionState {
    /// Standing or walking on the ground
    Grounded,
    /// Rising after a jump
    Jumping,
    /// Descending, either past the apex or off a ledge
    Falling,
    /// Just touched down; moving at reduced speed until the landing ends
    Landing,
}

impl Default for MotionState {
    fn default() -> Self {
        Self::Grounded
    }
}

impl MotionState {
    /// Check if the character is standing on something
    pub fn is_grounded(&self) -> bool {
        matches!(self, Self::Grounded | Self::Landing)
    }

    /// Check if the character is in the air
    pub fn is_airborne(&self) -> bool {
        matches!(self, Self::Jumping | Self::Falling)
    }

    /// Check if a jump may start from this state.
    /// A jump out of `Landing` cuts the landing short.
    pub fn can_jump(&self) -> bool {
        matches!(self, Self::Grounded | Self::Landing)
    }
}

/// Noteworthy transition produced by an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionEvent {
    /// Passed the apex or walked off a ledge
    StartedFalling,
    /// Touched down after a fall; the landing slowdown should start
    Landed,
}

/// State machine that classifies vertical motion and integrates vertical speed
#[derive(Debug)]
pub struct MotionStateMachine {
    current_state: MotionState,
    vertical_speed: f32,
    /// Whether horizontal input is honoured while airborne
    can_move_in_air: bool,
}

impl Default for MotionStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionStateMachine {
    pub fn new() -> Self {
        Self {
            current_state: MotionState::Grounded,
            vertical_speed: 0.0,
            can_move_in_air: false,
        }
    }

    /// Get the current state
    pub fn state(&self) -> MotionState {
        self.current_state
    }

    pub fn vertical_speed(&self) -> f32 {
        self.vertical_speed
    }

    /// Override vertical speed (external impulses, scripted scenarios)
    pub fn set_vertical_speed(&mut self, speed: f32) {
        self.vertical_speed = speed;
    }

    /// Whether horizontal input is honoured while airborne.
    /// Latched from the input present on the last grounded tick.
    pub fn can_move_in_air(&self) -> bool {
        self.can_move_in_air
    }

    fn transition(&mut self, new_state: MotionState) {
        if self.current_state != new_state {
            log::trace!("Motion {:?} -> {:?}", self.current_state, new_state);
            self.current_state = new_state;
        }
    }

    /// Classify this tick's motion after the motor has moved the body.
    ///
    /// `grounded` is the motor's contact flag, `has_input` whether any
    /// movement axis is non-zero.
    pub fn update(
        &mut self,
        dt: f32,
        grounded: bool,
        has_input: bool,
        config: &CharacterConfig,
    ) -> Option<MotionEvent> {
        if grounded {
            let event = match self.current_state {
                MotionState::Falling => {
                    self.transition(MotionState::Landing);
                    self.can_move_in_air = false;
                    Some(MotionEvent::Landed)
                }
                MotionState::Jumping => {
                    // Touched down before the apex (jumped onto a ledge)
                    self.transition(MotionState::Grounded);
                    None
                }
                MotionState::Grounded | MotionState::Landing => None,
            };

            self.vertical_speed = config.ground_stick_speed;
            if event.is_none() {
                self.can_move_in_air = has_input;
            }
            return event;
        }

        self.vertical_speed += config.gravity * dt;

        match self.current_state {
            MotionState::Jumping if self.vertical_speed < 0.0 => {
                self.transition(MotionState::Falling);
                Some(MotionEvent::StartedFalling)
            }
            MotionState::Grounded | MotionState::Landing
                if self.vertical_speed < config.fall_speed_threshold =>
            {
                // Walked off a ledge
                self.transition(MotionState::Falling);
                Some(MotionEvent::StartedFalling)
            }
            _ => None,
        }
    }

    /// Start a jump. Stamina is checked by the caller.
    pub fn jump(&mut self, jump_speed: f32) -> bool {
        if !self.current_state.can_jump() {
            return false;
        }
        self.vertical_speed = jump_speed;
        self.transition(MotionState::Jumping);
        true
    }

    /// End the landing slowdown
    pub fn finish_landing(&mut self) {
        if self.current_state == MotionState::Landing {
            self.transition(MotionState::Grounded);
        }
    }

    /// Back to a standing start (respawn)
    pub fn reset(&mut self) {
        self.transition(MotionState::Grounded);
        self.vertical_speed = 0.0;
        self.can_move_in_air = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::characters::config::BASE_CONFIG;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_initial_state() {
        let sm = MotionStateMachine::new();
        assert_eq!(sm.state(), MotionState::Grounded);
    }

    #[test]
    fn test_jump_from_grounded() {
        let mut sm = MotionStateMachine::new();
        assert!(sm.jump(5.0));
        assert_eq!(sm.state(), MotionState::Jumping);
        assert_eq!(sm.vertical_speed(), 5.0);
    }

    #[test]
    fn test_cannot_jump_while_airborne() {
        let mut sm = MotionStateMachine::new();
        sm.jump(5.0);
        assert!(!sm.jump(5.0));
    }

    #[test]
    fn test_jumping_to_falling_at_apex() {
        let mut sm = MotionStateMachine::new();
        sm.jump(0.1);
        let event = sm.update(DT, false, false, &BASE_CONFIG);
        assert_eq!(event, Some(MotionEvent::StartedFalling));
        assert_eq!(sm.state(), MotionState::Falling);
    }

    #[test]
    fn test_still_rising_stays_jumping() {
        let mut sm = MotionStateMachine::new();
        sm.jump(5.0);
        assert_eq!(sm.update(DT, false, false, &BASE_CONFIG), None);
        assert_eq!(sm.state(), MotionState::Jumping);
        assert!(sm.vertical_speed() < 5.0);
    }

    #[test]
    fn test_ledge_fall_within_one_tick() {
        let mut sm = MotionStateMachine::new();
        sm.set_vertical_speed(-2.5);
        sm.update(DT, false, false, &BASE_CONFIG);
        assert_eq!(sm.state(), MotionState::Falling);
    }

    #[test]
    fn test_brief_air_time_is_not_a_fall() {
        let mut sm = MotionStateMachine::new();
        sm.update(DT, true, false, &BASE_CONFIG);
        // Stick speed plus one tick of gravity is well above the fall threshold
        sm.update(DT, false, false, &BASE_CONFIG);
        assert_eq!(sm.state(), MotionState::Grounded);
    }

    #[test]
    fn test_falling_to_landing_to_grounded() {
        let mut sm = MotionStateMachine::new();
        sm.set_vertical_speed(-3.0);
        sm.update(DT, false, false, &BASE_CONFIG);

        let event = sm.update(DT, true, false, &BASE_CONFIG);
        assert_eq!(event, Some(MotionEvent::Landed));
        assert_eq!(sm.state(), MotionState::Landing);
        assert!(sm.state().is_grounded());

        sm.finish_landing();
        assert_eq!(sm.state(), MotionState::Grounded);
    }

    #[test]
    fn test_jump_out_of_landing() {
        let mut sm = MotionStateMachine::new();
        sm.set_vertical_speed(-3.0);
        sm.update(DT, false, false, &BASE_CONFIG);
        sm.update(DT, true, false, &BASE_CONFIG);
        assert_eq!(sm.state(), MotionState::Landing);

        assert!(sm.jump(5.0));
        assert_eq!(sm.state(), MotionState::Jumping);
        assert!(sm.vertical_speed() > 0.0);
    }

    #[test]
    fn test_grounded_holds_stick_speed() {
        let mut sm = MotionStateMachine::new();
        sm.update(DT, true, false, &BASE_CONFIG);
        assert_eq!(sm.vertical_speed(), BASE_CONFIG.ground_stick_speed);
    }

    #[test]
    fn test_air_control_latched_from_ground_input() {
        let mut sm = MotionStateMachine::new();
        sm.update(DT, true, true, &BASE_CONFIG);
        sm.jump(5.0);
        sm.update(DT, false, false, &BASE_CONFIG);
        assert!(sm.can_move_in_air());

        let mut sm = MotionStateMachine::new();
        sm.update(DT, true, false, &BASE_CONFIG);
        sm.jump(5.0);
        sm.update(DT, false, true, &BASE_CONFIG);
        assert!(!sm.can_move_in_air());
    }

    #[test]
    fn test_finish_landing_ignored_outside_landing() {
        let mut sm = MotionStateMachine::new();
        sm.jump(5.0);
        sm.finish_landing();
        assert_eq!(sm.state(), MotionState::Jumping);
    }

    #[test]
    fn test_reset() {
        let mut sm = MotionStateMachine::new();
        sm.set_vertical_speed(-8.0);
        sm.update(DT, false, false, &BASE_CONFIG);
        sm.reset();
        assert_eq!(sm.state(), MotionState::Grounded);
        assert_eq!(sm.vertical_speed(), 0.0);
    }

    #[test]
    fn test_state_helpers() {
        assert!(MotionState::Grounded.is_grounded());
        assert!(MotionState::Landing.is_grounded());
        assert!(MotionState::Jumping.is_airborne());
        assert!(MotionState::Falling.is_airborne());
        assert!(!MotionState::Falling.can_jump());
    }
}
