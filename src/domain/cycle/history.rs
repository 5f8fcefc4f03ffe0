//! History view of the cycle list.

use crate::domain::foundation::CycleStatus;

use super::Cycle;

/// One row of the history list: a cycle plus its derived status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub cycle: Cycle,
    pub status: CycleStatus,
    /// Whether this cycle is the one the active pointer refers to.
    pub is_active: bool,
}

impl HistoryEntry {
    pub fn new(cycle: Cycle, is_active: bool) -> Self {
        let status = cycle.status();
        Self {
            cycle,
            status,
            is_active,
        }
    }
}
