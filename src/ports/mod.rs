//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SnapshotStore` - Key-value collaborator holding the persisted state
//! - `Clock` - Source of the current time

mod clock;
mod snapshot_store;

pub use clock::Clock;
pub use snapshot_store::{
    CycleRecord, CyclesSnapshot, SnapshotError, SnapshotStore, DEFAULT_SNAPSHOT_KEY,
};
