//! Clock sources for the animation loop.

use std::time::Instant;

/// Monotonic elapsed time since the clock started.
pub trait Clock: Send {
    fn elapsed_secs(&self) -> f64;
}

#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::start()
    }
}

impl Clock for MonotonicClock {
    fn elapsed_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Clock frozen at a fixed time; useful for deterministic runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedClock(pub f64);

impl Clock for FixedClock {
    fn elapsed_secs(&self) -> f64 {
        self.0
    }
}
