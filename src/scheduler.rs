/// Real-time cadence for enemy waves, independent of the frame rate.

use std::time::{Duration, Instant};

/// Time between spawn waves.
pub const SPAWN_INTERVAL: Duration = Duration::from_millis(900);

/// A repeating timer polled from the frame loop.
///
/// Fires at most once per poll.  If the loop stalls for several intervals
/// the missed firings are dropped rather than replayed in a burst.
#[derive(Clone, Debug)]
pub struct SpawnTimer {
    interval: Duration,
    next_due: Instant,
}

impl SpawnTimer {
    pub fn new(interval: Duration, now: Instant) -> Self {
        SpawnTimer {
            interval,
            next_due: now + interval,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Returns `true` when a wave is due at `now`, and schedules the next one.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now < self.next_due {
            return false;
        }
        self.next_due += self.interval;
        if self.next_due <= now {
            self.next_due = now + self.interval;
        }
        true
    }
}
