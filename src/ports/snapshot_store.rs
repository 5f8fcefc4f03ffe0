//! Snapshot Store Port - Interface for persisting the whole cycle state.
//!
//! The state is saved as one blob under a fixed key after every
//! transition and read back once at startup. There is no incremental
//! format: every save overwrites the previous snapshot.

use std::collections::HashSet;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::cycle::{Cycle, CyclesState};
use crate::domain::foundation::{CycleId, DomainError, Timestamp};

/// Storage key of the cycle snapshot.
pub const DEFAULT_SNAPSHOT_KEY: &str = "@ignite-timer:cycles-state-1.0.0";

/// Errors that can occur during snapshot storage operations
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("Failed to serialize snapshot: {0}")]
    SerializationFailed(String),

    #[error("Failed to deserialize snapshot: {0}")]
    DeserializationFailed(String),

    #[error("Snapshot contains an invalid cycle: {0}")]
    InvalidCycle(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Persisted form of a single cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleRecord {
    pub id: CycleId,
    pub task: String,
    pub minutes_amount: u32,
    pub start_date: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interrupt_date: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_date: Option<Timestamp>,
}

impl From<&Cycle> for CycleRecord {
    fn from(cycle: &Cycle) -> Self {
        Self {
            id: cycle.id(),
            task: cycle.task().to_string(),
            minutes_amount: cycle.minutes_amount(),
            start_date: cycle.start_date(),
            interrupt_date: cycle.interrupt_date(),
            finished_date: cycle.finished_date(),
        }
    }
}

impl TryFrom<CycleRecord> for Cycle {
    type Error = DomainError;

    fn try_from(record: CycleRecord) -> Result<Self, Self::Error> {
        Cycle::reconstitute(
            record.id,
            record.task,
            record.minutes_amount,
            record.start_date,
            record.interrupt_date,
            record.finished_date,
        )
    }
}

/// Persisted form of the whole state: `{ cycles, activeCycleId }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CyclesSnapshot {
    pub cycles: Vec<CycleRecord>,
    #[serde(default)]
    pub active_cycle_id: Option<CycleId>,
}

impl CyclesSnapshot {
    /// Captures the current state.
    pub fn capture(state: &CyclesState) -> Self {
        Self {
            cycles: state.cycles().iter().map(CycleRecord::from).collect(),
            active_cycle_id: state.active_cycle_id(),
        }
    }

    /// Rebuilds state, failing on the first invalid cycle or repeated id.
    pub fn restore(self) -> Result<CyclesState, SnapshotError> {
        let mut seen = HashSet::with_capacity(self.cycles.len());
        if let Some(record) = self.cycles.iter().find(|record| !seen.insert(record.id)) {
            return Err(SnapshotError::InvalidCycle(format!(
                "Duplicate cycle id {}",
                record.id
            )));
        }

        let cycles = self
            .cycles
            .into_iter()
            .map(Cycle::try_from)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| SnapshotError::InvalidCycle(e.to_string()))?;

        Ok(CyclesState::from_parts(cycles, self.active_cycle_id))
    }

    /// Serializes to the JSON blob format.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string(self).map_err(|e| SnapshotError::SerializationFailed(e.to_string()))
    }

    /// Parses the JSON blob format.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(json).map_err(|e| SnapshotError::DeserializationFailed(e.to_string()))
    }
}

/// Port for the key-value snapshot collaborator
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Load the stored snapshot
    ///
    /// # Returns
    /// `Ok(None)` when nothing has been stored yet
    ///
    /// # Errors
    /// Returns `SnapshotError` if the blob cannot be read or parsed
    async fn load(&self) -> Result<Option<CyclesSnapshot>, SnapshotError>;

    /// Overwrite the stored snapshot
    ///
    /// # Errors
    /// Returns `SnapshotError` if save fails
    async fn save(&self, snapshot: &CyclesSnapshot) -> Result<(), SnapshotError>;
}
