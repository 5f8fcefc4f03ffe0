//! Storage Adapters
//!
//! Implementations of the SnapshotStore port for persisting cycle state.
//!
//! ## Available Adapters
//!
//! - **FileSnapshotStore** - Stores the snapshot as a JSON file on disk
//! - **InMemorySnapshotStore** - Stores the snapshot in memory (testing/ephemeral)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{FileSnapshotStore, InMemorySnapshotStore};
//!
//! let store = FileSnapshotStore::new("./data", DEFAULT_SNAPSHOT_KEY);
//! let store = InMemorySnapshotStore::new();
//! ```

mod file_snapshot_store;
mod in_memory_snapshot_store;

pub use file_snapshot_store::FileSnapshotStore;
pub use in_memory_snapshot_store::InMemorySnapshotStore;
