// Fixed-step gate separating the simulation rate from the display rate.

use std::time::{Duration, Instant};

/// One logic step every 1000/60 ms.
pub const STEP_INTERVAL: Duration = Duration::from_nanos(16_666_667);

/// Decides when a logic step is due. Rendering happens every frame
/// regardless; a frame callback asks `should_tick`, and runs at most one
/// step per pass. There is no catch-up: a display slower than the step rate
/// simply slows the simulation down.
#[derive(Debug, Clone, Copy)]
pub struct TickGate {
    interval: Duration,
    last: Instant,
}

impl TickGate {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self { interval, last: now }
    }

    pub fn at_step_rate(now: Instant) -> Self {
        Self::new(STEP_INTERVAL, now)
    }

    pub fn should_tick(&self, now: Instant) -> bool {
        now.duration_since(self.last) >= self.interval
    }

    pub fn reset(&mut self, now: Instant) {
        self.last = now;
    }
}
