//! Countdown derivation for the active cycle.
//!
//! Pure arithmetic over a start date, a duration and a caller-supplied
//! "now", so it can be tested without waiting on a real clock.

use std::fmt;

use crate::domain::foundation::Timestamp;

/// Remaining time of a cycle at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    total_seconds: u64,
    elapsed_seconds: u64,
}

impl Countdown {
    /// Countdown for a cycle of `minutes_amount` that started at `start_date`.
    pub fn new(minutes_amount: u32, start_date: Timestamp, now: Timestamp) -> Self {
        Self::from_elapsed(minutes_amount, now.whole_seconds_since(&start_date))
    }

    /// Countdown from an already known elapsed-seconds value.
    pub fn from_elapsed(minutes_amount: u32, elapsed_seconds: u64) -> Self {
        Self {
            total_seconds: u64::from(minutes_amount) * 60,
            elapsed_seconds,
        }
    }

    pub fn total_seconds(&self) -> u64 {
        self.total_seconds
    }

    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    /// Seconds left, floored at zero.
    pub fn remaining_seconds(&self) -> u64 {
        self.total_seconds.saturating_sub(self.elapsed_seconds)
    }

    /// True once the full duration has elapsed.
    pub fn is_complete(&self) -> bool {
        self.elapsed_seconds >= self.total_seconds
    }

    /// Minutes part, zero-padded to two digits.
    pub fn minutes(&self) -> String {
        format!("{:02}", self.remaining_seconds() / 60)
    }

    /// Seconds part, zero-padded to two digits.
    pub fn seconds(&self) -> String {
        format!("{:02}", self.remaining_seconds() % 60)
    }

    /// `MM:SS`, as mirrored into the window title while a cycle runs.
    pub fn title(&self) -> String {
        format!("{}:{}", self.minutes(), self.seconds())
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}
