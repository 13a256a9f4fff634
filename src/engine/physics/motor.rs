use glam::Vec3;

/// Character motor owned by the host engine
///
/// The motor resolves collisions and reports the outcome; gameplay code only
/// requests motion and reads back position, velocity and ground contact.
pub trait PhysicalMotor {
    /// Move with `velocity` for `dt` seconds, resolving collisions
    fn move_with(&mut self, velocity: Vec3, dt: f32);

    /// Whether the last move ended in contact with the ground
    fn is_grounded(&self) -> bool;

    /// Velocity actually achieved by the last move
    fn velocity(&self) -> Vec3;

    /// Current world position
    fn position(&self) -> Vec3;

    /// Place the body at `position` without sweeping
    fn teleport(&mut self, position: Vec3);

    /// Enable or disable motor authority. A disabled motor ignores moves.
    fn set_enabled(&mut self, enabled: bool);

    /// Whether the motor currently has authority over the body
    fn is_enabled(&self) -> bool;
}

/// Minimal kinematic motor over an optional horizontal floor plane
///
/// Stands in for the host's character controller in headless runs and tests.
/// With `floor = None` there is nothing to stand on and the body falls freely.
#[derive(Debug, Clone)]
pub struct FlatGroundMotor {
    position: Vec3,
    velocity: Vec3,
    grounded: bool,
    enabled: bool,
    floor: Option<f32>,
}

impl FlatGroundMotor {
    /// Create a motor standing on a floor at the spawn height
    pub fn new(spawn: Vec3) -> Self {
        Self {
            position: spawn,
            velocity: Vec3::ZERO,
            grounded: true,
            enabled: true,
            floor: Some(spawn.y),
        }
    }

    /// Create a motor with a custom floor (or none)
    pub fn with_floor(spawn: Vec3, floor: Option<f32>) -> Self {
        let grounded = floor.is_some_and(|h| spawn.y <= h);
        Self {
            position: spawn,
            velocity: Vec3::ZERO,
            grounded,
            enabled: true,
            floor,
        }
    }

    /// Change the floor plane; ground contact is re-evaluated on the next move
    pub fn set_floor(&mut self, floor: Option<f32>) {
        self.floor = floor;
    }

    /// Current floor height
    pub fn floor(&self) -> Option<f32> {
        self.floor
    }

}

impl PhysicalMotor for FlatGroundMotor {
    fn move_with(&mut self, velocity: Vec3, dt: f32) {
        if !self.enabled || dt <= 0.0 {
            self.velocity = Vec3::ZERO;
            return;
        }

        let start = self.position;
        let mut target = start + velocity * dt;

        self.grounded = match self.floor {
            Some(height) if target.y <= height => {
                target.y = height;
                true
            }
            _ => false,
        };

        self.position = target;
        self.velocity = (target - start) / dt;
    }

    fn is_grounded(&self) -> bool {
        self.grounded
    }

    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn teleport(&mut self, position: Vec3) {
        self.position = position;
        self.velocity = Vec3::ZERO;
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }
}
