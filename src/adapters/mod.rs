//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - Snapshot stores (file, in-memory)
//! - `clock` - Time sources (system, manual)

pub mod clock;
pub mod storage;

pub use clock::{ManualClock, SystemClock};
pub use storage::{FileSnapshotStore, InMemorySnapshotStore};
