//! Cycle domain events.

use crate::domain::foundation::{CycleId, Timestamp};
use serde::{Deserialize, Serialize};

/// Events emitted by state transitions of the cycle list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CycleEvent {
    /// A new cycle was appended and became active.
    Started {
        cycle_id: CycleId,
        minutes_amount: u32,
        started_at: Timestamp,
    },

    /// The active cycle was stopped by the user.
    Interrupted {
        cycle_id: CycleId,
        interrupted_at: Timestamp,
    },

    /// The active cycle ran its full duration.
    Finished {
        cycle_id: CycleId,
        finished_at: Timestamp,
    },
}

impl CycleEvent {
    /// The cycle this event is about.
    pub fn cycle_id(&self) -> CycleId {
        match self {
            CycleEvent::Started { cycle_id, .. }
            | CycleEvent::Interrupted { cycle_id, .. }
            | CycleEvent::Finished { cycle_id, .. } => *cycle_id,
        }
    }
}
