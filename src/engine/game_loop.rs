/// Simulation tick driver
///
/// Implements a fixed timestep accumulator. The host hands in the measured
/// duration of each rendered frame and gets back how many fixed simulation
/// ticks to run, so gameplay logic advances at a consistent rate no matter
/// how irregular the frame times are.
use std::time::Duration;

/// Target simulation rate (60 ticks per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;
const FIXED_TIMESTEP_DURATION: Duration = Duration::from_micros(16_667); // ~1/60 second

/// Maximum number of simulation ticks per frame to prevent spiral of death
const MAX_TICKS_PER_FRAME: u32 = 5;

/// Fixed timestep state
#[derive(Debug)]
pub struct GameLoop {
    /// Accumulated time not yet consumed by fixed ticks
    accumulator: Duration,

    /// Whether the simulation is paused
    paused: bool,

    /// Current frame number
    frame_count: u64,

    /// Total ticks executed
    tick_count: u64,
}

impl GameLoop {
    /// Create a new game loop
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            paused: false,
            frame_count: 0,
            tick_count: 0,
        }
    }

    /// Feed an explicit frame duration, returns the number of fixed ticks to run
    pub fn advance(&mut self, frame_time: Duration) -> u32 {
        self.frame_count += 1;

        // If paused, don't accumulate time for updates
        if self.paused {
            return 0;
        }

        self.accumulator += frame_time;

        let mut ticks = 0;
        while self.accumulator >= FIXED_TIMESTEP_DURATION && ticks < MAX_TICKS_PER_FRAME {
            self.accumulator -= FIXED_TIMESTEP_DURATION;
            ticks += 1;
        }

        // Drop whatever could not be simulated this frame
        if ticks == MAX_TICKS_PER_FRAME && self.accumulator >= FIXED_TIMESTEP_DURATION {
            log::debug!(
                "Frame {} overran, dropping {:?} of simulation time",
                self.frame_count,
                self.accumulator
            );
            self.accumulator = Duration::ZERO;
        }

        self.tick_count += ticks as u64;
        ticks
    }

    /// Get the fixed timestep (in seconds)
    pub fn fixed_timestep(&self) -> f32 {
        FIXED_TIMESTEP
    }

    /// Get the interpolation alpha between the last two ticks
    pub fn alpha(&self) -> f32 {
        self.accumulator.as_secs_f32() / FIXED_TIMESTEP
    }

    /// Get total number of frames seen
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get total number of fixed ticks executed
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Simulated time covered by all ticks so far (in seconds)
    pub fn simulated_secs(&self) -> f32 {
        self.tick_count as f32 * FIXED_TIMESTEP
    }

    /// Check if the simulation is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause the simulation
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Simulation paused");
        }
    }

    /// Resume the simulation
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Reset accumulator to prevent a tick burst
            self.accumulator = Duration::ZERO;
            log::info!("Simulation resumed");
        }
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
