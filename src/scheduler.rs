use std::time::{Duration, Instant};

use crate::config::{LEVEL_SPEEDUP_MS, MIN_TICK_INTERVAL_MS};

/// Fixed-interval tick clock shared by the render loop.
///
/// Rendering runs every frame; the simulation only advances when the tick
/// interval has elapsed, independent of the frame rate.
#[derive(Debug, Clone, Copy)]
pub struct TickScheduler {
    interval: Duration,
    last_tick: Instant,
}

impl TickScheduler {
    #[must_use]
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last_tick: now,
        }
    }

    /// Returns true when a tick should run at `now`.
    #[must_use]
    pub fn is_due(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.last_tick) >= self.interval
    }

    /// Records that a tick ran at `now`.
    pub fn mark(&mut self, now: Instant) {
        self.last_tick = now;
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }
}

/// Tick interval for `level`, shortened per level down to [`MIN_TICK_INTERVAL_MS`].
#[must_use]
pub fn tick_interval_for_level(base_ms: u64, level: u32) -> Duration {
    let speedup_ms = u64::from(level.saturating_sub(1)) * LEVEL_SPEEDUP_MS;
    let clamped_ms = base_ms
        .saturating_sub(speedup_ms)
        .max(MIN_TICK_INTERVAL_MS);
    Duration::from_millis(clamped_ms)
}
