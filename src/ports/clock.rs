//! Clock Port - Source of "now" for state transitions.
//!
//! Transitions and countdowns take an explicit timestamp; this port is
//! where the application layer gets it, so tests can drive time by hand.

use crate::domain::foundation::Timestamp;

/// Port for reading the current wall-clock time.
pub trait Clock: Send + Sync {
    /// The current instant.
    fn now(&self) -> Timestamp;
}
