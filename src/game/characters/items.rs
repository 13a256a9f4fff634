// Mushroom pouch and thrown mushrooms

use glam::Vec3;

use crate::core::math;
use crate::engine::input::PlayerSlot;

/// Mushrooms carried by a character
#[derive(Debug, Clone)]
pub struct ItemPouch {
    held: u32,
    max: u32,
    selected: bool,
}

impl ItemPouch {
    pub fn new(max: u32) -> Self {
        Self {
            held: 0,
            max,
            selected: false,
        }
    }

    pub fn held(&self) -> u32 {
        self.held
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn is_full(&self) -> bool {
        self.held >= self.max
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Pick up one item. Returns false when the pouch is already full.
    pub fn collect(&mut self) -> bool {
        if self.is_full() {
            return false;
        }
        self.held += 1;
        true
    }

    /// Put the item in hand or away. Selecting needs a full pouch,
    /// deselecting always works. Returns true if the selection changed.
    pub fn toggle_selection(&mut self) -> bool {
        if !self.selected && !self.is_full() {
            return false;
        }
        self.selected = !self.selected;
        true
    }

    /// Whether a throw may start
    pub fn can_throw(&self) -> bool {
        self.selected && self.is_full()
    }

    /// Empty the pouch for a throw, returns how many items were held
    pub fn take_all(&mut self) -> u32 {
        self.selected = false;
        std::mem::take(&mut self.held)
    }
}

/// Result of advancing a thrown item by one tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArcStep {
    /// Still travelling, now at the given position
    InFlight(Vec3),
    /// Reached the target at the given position
    Arrived(Vec3),
    /// Target vanished mid-flight
    Aborted,
}

/// A mushroom flying toward the opposing player
///
/// The target is tracked by slot only. Its position is supplied fresh every
/// tick, so the arc bends toward a moving target instead of following the
/// curve computed at launch.
#[derive(Debug, Clone)]
pub struct ThrownItem {
    thrower: PlayerSlot,
    target: PlayerSlot,
    start: Vec3,
    position: Vec3,
    elapsed: f32,
    duration: f32,
    arc_height: f32,
}

impl ThrownItem {
    pub fn new(
        thrower: PlayerSlot,
        target: PlayerSlot,
        start: Vec3,
        duration: f32,
        arc_height: f32,
    ) -> Self {
        Self {
            thrower,
            target,
            start,
            position: start,
            elapsed: 0.0,
            duration,
            arc_height,
        }
    }

    pub fn thrower(&self) -> PlayerSlot {
        self.thrower
    }

    pub fn target(&self) -> PlayerSlot {
        self.target
    }

    pub fn start(&self) -> Vec3 {
        self.start
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Fraction of the flight completed, in 0.0..=1.0
    pub fn progress(&self) -> f32 {
        (self.elapsed / self.duration).min(1.0)
    }

    /// Point on the arc at fraction `t` toward `target_position`
    pub fn point_at(&self, t: f32, target_position: Vec3) -> Vec3 {
        math::arc_point(self.start, target_position, self.arc_height, t)
    }

    /// Advance the flight. `target_position` is `None` when the target is gone.
    pub fn advance(&mut self, dt: f32, target_position: Option<Vec3>) -> ArcStep {
        let Some(target_position) = target_position else {
            return ArcStep::Aborted;
        };

        self.elapsed += dt;
        let t = self.progress();
        if t >= 1.0 {
            // Snap onto the target
            self.position = target_position;
            return ArcStep::Arrived(target_position);
        }

        self.position = self.point_at(t, target_position);
        ArcStep::InFlight(self.position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn full_pouch() -> ItemPouch {
        let mut pouch = ItemPouch::new(3);
        while pouch.collect() {}
        pouch
    }

    #[test]
    fn test_collect_caps_at_max() {
        let mut pouch = ItemPouch::new(3);
        assert!(pouch.collect());
        assert!(pouch.collect());
        assert!(pouch.collect());
        assert!(!pouch.collect());
        assert_eq!(pouch.held(), 3);
    }

    #[test]
    fn test_cannot_select_without_full_pouch() {
        let mut pouch = ItemPouch::new(3);
        pouch.collect();
        pouch.collect();
        assert!(!pouch.toggle_selection());
        assert!(!pouch.is_selected());
        assert!(!pouch.can_throw());
    }

    #[test]
    fn test_select_and_deselect() {
        let mut pouch = full_pouch();
        assert!(pouch.toggle_selection());
        assert!(pouch.can_throw());
        assert!(pouch.toggle_selection());
        assert!(!pouch.is_selected());
    }

    #[test]
    fn test_take_all_empties_and_deselects() {
        let mut pouch = full_pouch();
        pouch.toggle_selection();
        assert_eq!(pouch.take_all(), 3);
        assert_eq!(pouch.held(), 0);
        assert!(!pouch.is_selected());
    }

    #[test]
    fn test_arc_starts_at_start() {
        let item = ThrownItem::new(PlayerSlot::One, PlayerSlot::Two, Vec3::ZERO, 0.75, 2.0);
        let p = item.point_at(0.0, Vec3::new(10.0, 0.0, 0.0));
        assert_eq!(p, Vec3::ZERO);
    }

    #[test]
    fn test_arc_rises_above_endpoints() {
        let item = ThrownItem::new(PlayerSlot::One, PlayerSlot::Two, Vec3::ZERO, 0.75, 2.0);
        let mid = item.point_at(0.5, Vec3::new(10.0, 0.0, 0.0));
        assert_abs_diff_eq!(mid.x, 5.0, epsilon = 1e-5);
        // Half of the control point height at the middle of a quadratic curve
        assert_abs_diff_eq!(mid.y, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_arrives_at_live_target_position() {
        let mut item = ThrownItem::new(PlayerSlot::One, PlayerSlot::Two, Vec3::ZERO, 0.75, 2.0);
        let mut target = Vec3::new(10.0, 0.0, 0.0);
        let dt = 1.0 / 60.0;

        let arrived = loop {
            target.z += 0.1;
            match item.advance(dt, Some(target)) {
                ArcStep::InFlight(_) => {}
                ArcStep::Arrived(at) => break at,
                ArcStep::Aborted => panic!("target never vanished"),
            }
        };

        // The moving target, not the launch-time position
        assert_eq!(arrived, target);
        assert_eq!(item.position(), target);
    }

    #[test]
    fn test_arc_tracks_target_each_tick() {
        let mut item = ThrownItem::new(PlayerSlot::One, PlayerSlot::Two, Vec3::ZERO, 1.0, 2.0);
        let step = item.advance(0.5, Some(Vec3::new(0.0, 0.0, 10.0)));
        let ArcStep::InFlight(a) = step else {
            panic!("expected in flight");
        };

        let mut other = ThrownItem::new(PlayerSlot::One, PlayerSlot::Two, Vec3::ZERO, 1.0, 2.0);
        let ArcStep::InFlight(b) = other.advance(0.5, Some(Vec3::new(10.0, 0.0, 0.0))) else {
            panic!("expected in flight");
        };
        assert_ne!(a, b);
    }

    #[test]
    fn test_missing_target_aborts() {
        let mut item = ThrownItem::new(PlayerSlot::One, PlayerSlot::Two, Vec3::ZERO, 0.75, 2.0);
        assert_eq!(item.advance(0.1, None), ArcStep::Aborted);
        assert_eq!(item.elapsed(), 0.0);
    }
}
