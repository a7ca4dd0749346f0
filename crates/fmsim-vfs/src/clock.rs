//! Timestamp sources.

use std::cell::Cell;

/// Source of file timestamps (seconds since epoch).
pub trait Clock {
    fn now(&self) -> u64;
}

/// Wall-clock time.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        chrono::Utc::now().timestamp().max(0) as u64
    }
}

/// Deterministic clock for tests.
///
/// Every read returns the current value and advances it by one.
#[derive(Clone, Debug)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl ManualClock {
    pub fn new(start: u64) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Set the current timestamp.
    pub fn set_now(&self, timestamp: u64) {
        self.now.set(timestamp);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> u64 {
        let current = self.now.get();
        self.now.set(current + 1);
        current
    }
}
