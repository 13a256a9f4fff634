use glam::Vec3;
use std::collections::HashSet;

use crate::engine::input::PlayerSlot;

/// Spherical sensor volume that reports when a player enters it
///
/// Only the enter edge is reported: a player standing inside the volume
/// triggers once and has to leave before it can trigger again.
#[derive(Debug, Clone)]
pub struct TriggerVolume {
    center: Vec3,
    radius: f32,
    occupants: HashSet<PlayerSlot>,
}

impl TriggerVolume {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            center,
            radius,
            occupants: HashSet::new(),
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Check if a point lies inside the volume
    pub fn contains(&self, point: Vec3) -> bool {
        self.center.distance_squared(point) <= self.radius * self.radius
    }

    /// Update occupancy for a player, returns true on the enter edge
    pub fn update(&mut self, slot: PlayerSlot, position: Vec3) -> bool {
        if self.contains(position) {
            self.occupants.insert(slot)
        } else {
            self.occupants.remove(&slot);
            false
        }
    }

    /// Forget a player (e.g. after a teleport)
    pub fn clear(&mut self, slot: PlayerSlot) {
        self.occupants.remove(&slot);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains() {
        let trigger = TriggerVolume::new(Vec3::ZERO, 1.0);
        assert!(trigger.contains(Vec3::new(0.5, 0.5, 0.0)));
        assert!(trigger.contains(Vec3::new(1.0, 0.0, 0.0)));
        assert!(!trigger.contains(Vec3::new(1.0, 1.0, 0.0)));
    }

    #[test]
    fn test_enter_edge_only() {
        let mut trigger = TriggerVolume::new(Vec3::ZERO, 1.0);
        assert!(trigger.update(PlayerSlot::One, Vec3::ZERO));
        assert!(!trigger.update(PlayerSlot::One, Vec3::ZERO));

        // Leaving and re-entering fires again
        assert!(!trigger.update(PlayerSlot::One, Vec3::new(5.0, 0.0, 0.0)));
        assert!(trigger.update(PlayerSlot::One, Vec3::ZERO));
    }

    #[test]
    fn test_players_tracked_separately() {
        let mut trigger = TriggerVolume::new(Vec3::ZERO, 1.0);
        assert!(trigger.update(PlayerSlot::One, Vec3::ZERO));
        assert!(trigger.update(PlayerSlot::Two, Vec3::ZERO));
    }
}
