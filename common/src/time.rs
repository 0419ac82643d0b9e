//! Time utilities and cache timing constants for ratepath.

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;

/// Cache timing constants.
pub mod constants {
    use super::Duration;

    /// Lifetime of the cached currency list (30 seconds).
    pub fn currency_cache_ttl() -> Duration {
        Duration::seconds(30)
    }

    /// Lifetime of the cached exchange edge list (60 seconds).
    pub fn exchange_cache_ttl() -> Duration {
        Duration::seconds(60)
    }
}

/// A timestamp (always UTC).
pub type Timestamp = DateTime<Utc>;

/// Get the current timestamp.
pub fn now() -> Timestamp {
    Utc::now()
}

/// Source of the current time, injectable so expiry can be tested without sleeping.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    current: RwLock<Timestamp>,
}

impl ManualClock {
    /// Create a clock frozen at the current wall time.
    pub fn new() -> Self {
        Self::starting_at(now())
    }

    /// Create a clock frozen at `start`.
    pub fn starting_at(start: Timestamp) -> Self {
        Self {
            current: RwLock::new(start),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        let mut current = self.current.write();
        *current += by;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.current.read()
    }
}
