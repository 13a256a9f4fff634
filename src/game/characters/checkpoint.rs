// Last safe position and the respawn sequence

use glam::Vec3;

use super::effects::EffectScheduler;
use crate::engine::physics::PhysicalMotor;

/// Remembers where a character returns to after a knockback sequence
#[derive(Debug, Clone)]
pub struct RespawnController {
    last_checkpoint: Vec3,
    offset: Vec3,
    respawn_count: u32,
}

impl RespawnController {
    /// Start with the spawn point as the first checkpoint
    pub fn new(spawn: Vec3, offset: Vec3) -> Self {
        Self {
            last_checkpoint: spawn,
            offset,
            respawn_count: 0,
        }
    }

    pub fn set_checkpoint(&mut self, position: Vec3) {
        self.last_checkpoint = position;
    }

    pub fn last_checkpoint(&self) -> Vec3 {
        self.last_checkpoint
    }

    /// Where the next respawn places the body
    pub fn respawn_position(&self) -> Vec3 {
        self.last_checkpoint + self.offset
    }

    pub fn respawn_count(&self) -> u32 {
        self.respawn_count
    }

    /// Cancel every effect and move the body to the checkpoint.
    ///
    /// The motor loses authority during the teleport so the move cannot be
    /// swept through geometry. Returns the new position.
    pub fn respawn(&mut self, effects: &mut EffectScheduler, motor: &mut dyn PhysicalMotor) -> Vec3 {
        let cancelled = effects.cancel_all();
        if cancelled > 0 {
            log::trace!("Respawn cancelled {} effect(s)", cancelled);
        }

        let target = self.respawn_position();
        motor.set_enabled(false);
        motor.teleport(target);
        motor.set_enabled(true);

        self.respawn_count += 1;
        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::FlatGroundMotor;
    use crate::game::characters::effects::TimedEffect;

    #[test]
    fn test_respawn_position_adds_offset() {
        let mut controller = RespawnController::new(Vec3::ZERO, Vec3::new(0.0, -0.4, 0.0));
        controller.set_checkpoint(Vec3::new(5.0, 1.0, 2.0));
        assert_eq!(controller.respawn_position(), Vec3::new(5.0, 0.6, 2.0));
    }

    #[test]
    fn test_respawn_cancels_effects_and_teleports() {
        let mut controller = RespawnController::new(Vec3::ZERO, Vec3::new(0.0, -0.4, 0.0));
        controller.set_checkpoint(Vec3::new(3.0, 1.0, 0.0));
        let mut effects = EffectScheduler::new();
        effects.start(TimedEffect::slow(0.2, 5.0));
        effects.start(TimedEffect::stun(0.6));
        let mut motor = FlatGroundMotor::new(Vec3::new(20.0, 0.0, 0.0));

        let position = controller.respawn(&mut effects, &mut motor);

        assert!(effects.is_empty());
        assert_eq!(position, Vec3::new(3.0, 0.6, 0.0));
        assert_eq!(motor.position(), position);
        assert!(motor.is_enabled());
    }

    #[test]
    fn test_respawn_twice_is_same_as_once() {
        let mut controller = RespawnController::new(Vec3::ZERO, Vec3::new(0.0, -0.4, 0.0));
        let mut effects = EffectScheduler::new();
        let mut motor = FlatGroundMotor::new(Vec3::new(8.0, 0.0, 8.0));

        let first = controller.respawn(&mut effects, &mut motor);
        let second = controller.respawn(&mut effects, &mut motor);

        assert_eq!(first, second);
        assert_eq!(motor.position(), first);
        assert!(effects.is_empty());
        assert_eq!(controller.respawn_count(), 2);
    }
}
