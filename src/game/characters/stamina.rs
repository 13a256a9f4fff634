// Stamina ledger - bounded pool gating jumps and attacks

use super::config::CharacterConfig;

/// Colour band of the stamina bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaminaTier {
    /// At least half of the pool (yellow bar)
    Nominal,
    /// At or above the critical threshold (orange bar)
    Warning,
    /// Below the critical threshold (red bar)
    Critical,
}

impl StaminaTier {
    pub fn name(self) -> &'static str {
        match self {
            Self::Nominal => "nominal",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

/// Snapshot of the ledger for the HUD
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaminaReading {
    pub value: f32,
    /// value / max, in 0.0..=1.0
    pub ratio: f32,
    pub tier: StaminaTier,
}

/// Stamina pool, always within `0..=max`
#[derive(Debug, Clone)]
pub struct StaminaLedger {
    current: f32,
    max: f32,
    regen_rate: f32,
    depletion_rate: f32,
    critical: f32,
}

impl StaminaLedger {
    pub fn new(config: &CharacterConfig) -> Self {
        Self {
            current: config.starting_stamina.clamp(0.0, config.max_stamina),
            max: config.max_stamina,
            regen_rate: config.stamina_regen_rate,
            depletion_rate: config.stamina_depletion_rate,
            critical: config.critical_stamina,
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Spend `amount` if the pool covers it.
    /// Returns false and leaves the pool untouched otherwise.
    pub fn debit(&mut self, amount: f32) -> bool {
        if self.current < amount {
            return false;
        }
        self.set(self.current - amount);
        true
    }

    /// Idle/airborne regeneration for `dt` seconds
    pub fn regenerate(&mut self, dt: f32) {
        self.set(self.current + self.regen_rate * dt);
    }

    /// Movement drain for `dt` seconds at the given input intensity (0..=1)
    pub fn deplete(&mut self, dt: f32, intensity: f32) {
        self.set(self.current - self.depletion_rate * intensity * dt);
    }

    /// Per-tick bookkeeping: moving on the ground drains, anything else regenerates
    pub fn tick(&mut self, dt: f32, intensity: f32, moving_on_ground: bool) {
        if moving_on_ground {
            self.deplete(dt, intensity);
        } else {
            self.regenerate(dt);
        }
    }

    /// Add stamina from a pickup
    pub fn restore(&mut self, amount: f32) {
        self.set(self.current + amount);
    }

    /// Refill to the starting amount
    pub fn reset(&mut self, value: f32) {
        self.set(value);
    }

    pub fn ratio(&self) -> f32 {
        self.current / self.max
    }

    /// Critical exactly when exhausted
    pub fn tier(&self) -> StaminaTier {
        if self.current >= self.max * 0.5 {
            StaminaTier::Nominal
        } else if !self.is_exhausted() {
            StaminaTier::Warning
        } else {
            StaminaTier::Critical
        }
    }

    /// Exhausted characters move at reduced speed
    pub fn is_exhausted(&self) -> bool {
        self.current < self.critical
    }

    pub fn reading(&self) -> StaminaReading {
        StaminaReading {
            value: self.current,
            ratio: self.ratio(),
            tier: self.tier(),
        }
    }

    fn set(&mut self, value: f32) {
        self.current = value.clamp(0.0, self.max);
        debug_assert!((0.0..=self.max).contains(&self.current));
    }
}
