//! Hand-driven Clock adapter
//!
//! Time only moves when told to. Used by tests to step a cycle through
//! its countdown without waiting.

use std::sync::{Arc, Mutex, PoisonError};

use crate::domain::foundation::Timestamp;
use crate::ports::Clock;

/// Clock whose time is set explicitly.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Timestamp>>,
}

impl ManualClock {
    /// Create a clock frozen at `start`
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// Move time forward by `secs` seconds
    pub fn advance_secs(&self, secs: u64) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now = now.plus_secs(secs);
    }

    /// Jump to an exact instant
    pub fn set(&self, at: Timestamp) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = at;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_moves_only_when_told() {
        let start = Timestamp::from_unix_secs(1_000);
        let clock = ManualClock::new(start);

        assert_eq!(clock.now(), start);

        clock.advance_secs(61);
        assert_eq!(clock.now(), start.plus_secs(61));

        clock.set(start);
        assert_eq!(clock.now(), start);
    }

    #[test]
    fn clones_share_time() {
        let clock = ManualClock::new(Timestamp::from_unix_secs(0));
        let other = clock.clone();

        clock.advance_secs(5);

        assert_eq!(other.now().as_unix_secs(), 5);
    }
}
