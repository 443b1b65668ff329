//! Wall-clock to simulation tick conversion
//!
//! The simulation only understands whole ticks; callers sample this clock once
//! per rendered frame and hand the result to `Game::update`.

use std::time::{Duration, Instant};

use crate::consts::TICKS_PER_SECOND;

/// Converts elapsed real time into a monotonically non-decreasing tick count
#[derive(Debug, Clone, Copy)]
pub struct TickClock {
    start: Instant,
    tick: Duration,
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new(TICKS_PER_SECOND)
    }
}

impl TickClock {
    /// Start a clock ticking `ticks_per_second` times a second
    pub fn new(ticks_per_second: u32) -> Self {
        Self::starting_at(Instant::now(), ticks_per_second)
    }

    pub fn starting_at(start: Instant, ticks_per_second: u32) -> Self {
        let ticks_per_second = ticks_per_second.max(1);
        Self {
            start,
            tick: Duration::from_secs(1) / ticks_per_second,
        }
    }

    /// Duration of a single tick
    pub fn tick_duration(&self) -> Duration {
        self.tick
    }

    /// Tick count at the given instant (0 before the clock started)
    pub fn tick_at(&self, at: Instant) -> u64 {
        let elapsed = at.saturating_duration_since(self.start);
        (elapsed.as_nanos() / self.tick.as_nanos()) as u64
    }

    /// Tick count right now
    pub fn now(&self) -> u64 {
        self.tick_at(Instant::now())
    }
}
