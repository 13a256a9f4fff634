// Timed effects - explicit resumable objects advanced by the tick driver
//
// Each effect owns its remaining time and what should happen when it runs
// out. At most one effect of a kind is active; a request for a kind that is
// already running is ignored.

use glam::Vec3;

/// Time left below which an effect counts as finished (seconds).
/// Absorbs f32 drift from summing many small steps.
const COMPLETION_TOLERANCE: f32 = 1e-4;

/// Kind of timed effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectKind {
    Knockback,
    Blink,
    Slow,
    Landing,
    Stun,
}

/// Action fired when an effect runs out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUp {
    None,
    StartBlink,
    Respawn,
    FinishLanding,
}

/// Per-kind state carried by an effect
#[derive(Debug, Clone, PartialEq)]
pub enum EffectPayload {
    /// Constant push, `direction * strength`
    Knockback { velocity: Vec3 },
    /// Visibility flicker
    Blink {
        interval: f32,
        elapsed: f32,
        visible: bool,
        visible_time: f32,
        hidden_time: f32,
    },
    /// Move speed multiplier
    SpeedFactor(f32),
    /// Movement lock, no extra state
    Stun,
}

/// One in-flight timed behaviour
#[derive(Debug, Clone, PartialEq)]
pub struct TimedEffect {
    kind: EffectKind,
    duration: f32,
    elapsed: f32,
    payload: EffectPayload,
    on_complete: FollowUp,
}

impl TimedEffect {
    fn new(kind: EffectKind, duration: f32, payload: EffectPayload, on_complete: FollowUp) -> Self {
        Self {
            kind,
            duration,
            elapsed: 0.0,
            payload,
            on_complete,
        }
    }

    /// Push along `direction` (flattened and normalized) at `strength` units/second,
    /// then blink
    pub fn knockback(direction: Vec3, strength: f32, duration: f32) -> Self {
        let direction = Vec3::new(direction.x, 0.0, direction.z).normalize_or_zero();
        Self::new(
            EffectKind::Knockback,
            duration,
            EffectPayload::Knockback {
                velocity: direction * strength,
            },
            FollowUp::StartBlink,
        )
    }

    /// Flicker visibility every `interval` seconds, then respawn
    pub fn blink(duration: f32, interval: f32) -> Self {
        Self::new(
            EffectKind::Blink,
            duration,
            EffectPayload::Blink {
                interval,
                elapsed: 0.0,
                visible: false,
                visible_time: 0.0,
                hidden_time: 0.0,
            },
            FollowUp::Respawn,
        )
    }

    /// Scale move speed by `factor`
    pub fn slow(factor: f32, duration: f32) -> Self {
        Self::new(
            EffectKind::Slow,
            duration,
            EffectPayload::SpeedFactor(factor),
            FollowUp::None,
        )
    }

    /// Post-landing slowdown, then back to grounded
    pub fn landing(factor: f32, duration: f32) -> Self {
        Self::new(
            EffectKind::Landing,
            duration,
            EffectPayload::SpeedFactor(factor),
            FollowUp::FinishLanding,
        )
    }

    /// Movement lock after a hit
    pub fn stun(duration: f32) -> Self {
        Self::new(EffectKind::Stun, duration, EffectPayload::Stun, FollowUp::None)
    }

    pub fn kind(&self) -> EffectKind {
        self.kind
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn remaining(&self) -> f32 {
        (self.duration - self.elapsed).max(0.0)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    pub fn payload(&self) -> &EffectPayload {
        &self.payload
    }

    pub fn on_complete(&self) -> FollowUp {
        self.on_complete
    }

    fn speed_factor(&self) -> f32 {
        match self.payload {
            EffectPayload::SpeedFactor(factor) => factor,
            _ => 1.0,
        }
    }

    /// Advance by `step` seconds (already capped to the remaining time)
    fn advance(&mut self, step: f32, out: &mut EffectTick) {
        match &mut self.payload {
            EffectPayload::Knockback { velocity } => {
                out.knockback = Some(KnockbackStep {
                    velocity: *velocity,
                    duration: step,
                });
            }
            EffectPayload::Blink {
                interval,
                elapsed,
                visible,
                visible_time,
                hidden_time,
            } => {
                // The step is spent in the state held when it began
                if *visible {
                    *visible_time += step;
                } else {
                    *hidden_time += step;
                }
                *elapsed += step;
                // Hidden on even phases, visible on odd ones
                let phase = (*elapsed / *interval).floor() as u32;
                *visible = phase % 2 == 1;
                out.visibility = Some(*visible);
            }
            EffectPayload::SpeedFactor(_) | EffectPayload::Stun => {}
        }

        self.elapsed += step;
        if self.elapsed >= self.duration - COMPLETION_TOLERANCE {
            self.elapsed = self.duration;
        }
    }
}

/// Knockback motion requested for this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KnockbackStep {
    pub velocity: Vec3,
    pub duration: f32,
}

/// Everything the owner has to apply after advancing its effects
#[derive(Debug, Default)]
pub struct EffectTick {
    pub knockback: Option<KnockbackStep>,
    /// Visibility the character should have after this tick
    pub visibility: Option<bool>,
    /// Effects that ran out this tick, in start order
    pub completed: Vec<TimedEffect>,
}

/// Set of concurrently running effects on one character
#[derive(Debug, Default)]
pub struct EffectScheduler {
    effects: Vec<TimedEffect>,
}

impl EffectScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start an effect. Ignored (returns false) when one of the same kind is active.
    pub fn start(&mut self, effect: TimedEffect) -> bool {
        if self.is_active(effect.kind) {
            log::trace!("{:?} already active, request ignored", effect.kind);
            return false;
        }
        self.effects.push(effect);
        true
    }

    pub fn is_active(&self, kind: EffectKind) -> bool {
        self.effects.iter().any(|effect| effect.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// Product of all active speed multipliers (1.0 when none)
    pub fn speed_factor(&self) -> f32 {
        self.effects.iter().map(TimedEffect::speed_factor).product()
    }

    /// Advance every effect by `dt`, removing and returning the ones that finished
    pub fn advance(&mut self, dt: f32) -> EffectTick {
        let mut out = EffectTick::default();

        for effect in &mut self.effects {
            let step = dt.min(effect.remaining());
            effect.advance(step, &mut out);
        }

        let (finished, running): (Vec<_>, Vec<_>) = self
            .effects
            .drain(..)
            .partition(TimedEffect::is_finished);
        self.effects = running;

        for effect in &finished {
            if effect.kind == EffectKind::Blink {
                out.visibility = Some(true);
            }
        }
        out.completed = finished;
        out
    }

    /// Drop the active effect of `kind` without firing its follow-up
    pub fn cancel(&mut self, kind: EffectKind) -> Option<TimedEffect> {
        let index = self.effects.iter().position(|effect| effect.kind == kind)?;
        Some(self.effects.remove(index))
    }

    /// Drop every effect without firing follow-ups. Returns how many were cancelled.
    pub fn cancel_all(&mut self) -> usize {
        let count = self.effects.len();
        self.effects.clear();
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const DT: f32 = 1.0 / 60.0;

    fn run_until_done(scheduler: &mut EffectScheduler, dt: f32) -> (u32, Vec<TimedEffect>) {
        let mut ticks = 0;
        loop {
            ticks += 1;
            let tick = scheduler.advance(dt);
            if !tick.completed.is_empty() {
                return (ticks, tick.completed);
            }
            assert!(ticks < 10_000, "effect never finished");
        }
    }

    #[test]
    fn test_same_kind_is_ignored() {
        let mut scheduler = EffectScheduler::new();
        assert!(scheduler.start(TimedEffect::slow(0.2, 5.0)));
        assert!(!scheduler.start(TimedEffect::slow(0.5, 1.0)));
        assert_eq!(scheduler.len(), 1);
        assert_abs_diff_eq!(scheduler.speed_factor(), 0.2);
    }

    #[test]
    fn test_different_kinds_run_concurrently() {
        let mut scheduler = EffectScheduler::new();
        scheduler.start(TimedEffect::slow(0.2, 5.0));
        scheduler.start(TimedEffect::landing(0.5, 0.3));
        scheduler.start(TimedEffect::stun(0.6));
        assert_eq!(scheduler.len(), 3);
        assert_abs_diff_eq!(scheduler.speed_factor(), 0.1);
    }

    #[test]
    fn test_speed_restored_exactly_after_overlap() {
        let mut scheduler = EffectScheduler::new();
        scheduler.start(TimedEffect::landing(0.5, 0.3));
        scheduler.start(TimedEffect::slow(0.2, 0.5));

        for _ in 0..60 {
            scheduler.advance(DT);
        }
        assert!(scheduler.is_empty());
        assert_eq!(scheduler.speed_factor(), 1.0);
    }

    #[test]
    fn test_slow_expires_after_duration() {
        let mut scheduler = EffectScheduler::new();
        scheduler.start(TimedEffect::slow(0.2, 5.0));
        let (ticks, completed) = run_until_done(&mut scheduler, 0.1);
        assert_eq!(ticks, 50);
        assert_eq!(completed[0].kind(), EffectKind::Slow);
        assert_eq!(completed[0].on_complete(), FollowUp::None);
    }

    #[test]
    fn test_durations_finish_on_the_expected_tick() {
        for (duration, dt, expected) in [(5.0, 0.1, 50), (0.3, DT, 18), (0.6, DT, 36), (0.5, 0.05, 10)] {
            let mut scheduler = EffectScheduler::new();
            scheduler.start(TimedEffect::stun(duration));
            let (ticks, completed) = run_until_done(&mut scheduler, dt);
            assert_eq!(ticks, expected, "{duration}s at dt {dt}");
            assert_eq!(completed[0].remaining(), 0.0);
        }
    }

    #[test]
    fn test_knockback_step_and_follow_up() {
        let mut scheduler = EffectScheduler::new();
        scheduler.start(TimedEffect::knockback(Vec3::new(0.0, 4.0, -2.0), 3.0, 0.5));

        let tick = scheduler.advance(DT);
        let step = tick.knockback.expect("knockback should push");
        // Vertical component is removed before normalizing
        assert_abs_diff_eq!(step.velocity.z, -3.0, epsilon = 1e-6);
        assert_eq!(step.velocity.y, 0.0);
        assert_abs_diff_eq!(step.duration, DT);

        let (_, completed) = run_until_done(&mut scheduler, DT);
        assert_eq!(completed[0].on_complete(), FollowUp::StartBlink);
    }

    #[test]
    fn test_knockback_total_displacement() {
        let mut scheduler = EffectScheduler::new();
        scheduler.start(TimedEffect::knockback(Vec3::X, 3.0, 0.5));

        let mut travelled = Vec3::ZERO;
        while !scheduler.is_empty() {
            if let Some(step) = scheduler.advance(0.07).knockback {
                travelled += step.velocity * step.duration;
            }
        }
        // The last step is capped to the remaining time
        assert_abs_diff_eq!(travelled.x, 1.5, epsilon = 1e-4);
    }

    #[test]
    fn test_blink_accounts_full_duration_and_ends_visible() {
        for dt in [DT, 0.05, 0.11] {
            let mut scheduler = EffectScheduler::new();
            scheduler.start(TimedEffect::blink(0.5, 0.3));

            let mut last_visibility = None;
            let completed = loop {
                let tick = scheduler.advance(dt);
                last_visibility = tick.visibility.or(last_visibility);
                if !tick.completed.is_empty() {
                    break tick.completed;
                }
            };

            assert_eq!(last_visibility, Some(true));
            match completed[0].payload() {
                EffectPayload::Blink {
                    visible_time,
                    hidden_time,
                    ..
                } => assert_abs_diff_eq!(visible_time + hidden_time, 0.5, epsilon = 1e-4),
                other => panic!("unexpected payload {other:?}"),
            }
            assert_eq!(completed[0].on_complete(), FollowUp::Respawn);
        }
    }

    #[test]
    fn test_blink_toggles_on_interval() {
        let mut scheduler = EffectScheduler::new();
        scheduler.start(TimedEffect::blink(1.0, 0.3));

        assert_eq!(scheduler.advance(0.1).visibility, Some(false));
        assert_eq!(scheduler.advance(0.25).visibility, Some(true));
        assert_eq!(scheduler.advance(0.3).visibility, Some(false));
    }

    #[test]
    fn test_cancel_all_drops_follow_ups() {
        let mut scheduler = EffectScheduler::new();
        scheduler.start(TimedEffect::knockback(Vec3::X, 3.0, 0.5));
        scheduler.start(TimedEffect::slow(0.2, 5.0));

        assert_eq!(scheduler.cancel_all(), 2);
        assert!(scheduler.is_empty());
        let tick = scheduler.advance(1.0);
        assert!(tick.completed.is_empty());
        assert!(tick.knockback.is_none());
    }

    #[test]
    fn test_cancel_single_kind() {
        let mut scheduler = EffectScheduler::new();
        scheduler.start(TimedEffect::landing(0.5, 0.3));
        scheduler.start(TimedEffect::slow(0.2, 5.0));

        let cancelled = scheduler.cancel(EffectKind::Landing).expect("landing was active");
        assert_eq!(cancelled.kind(), EffectKind::Landing);
        assert!(scheduler.cancel(EffectKind::Landing).is_none());
        assert_abs_diff_eq!(scheduler.speed_factor(), 0.2);
    }

    #[test]
    fn test_landing_follow_up() {
        let mut scheduler = EffectScheduler::new();
        scheduler.start(TimedEffect::landing(0.5, 0.3));
        let (_, completed) = run_until_done(&mut scheduler, DT);
        assert_eq!(completed[0].on_complete(), FollowUp::FinishLanding);
    }
}
