//! In-Memory Snapshot Store Adapter
//!
//! Holds the serialized snapshot in memory, the way a browser's local
//! storage holds a string. Useful for testing and for sessions that do
//! not persist.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{CyclesSnapshot, SnapshotError, SnapshotStore};

/// In-memory storage for the cycle snapshot
#[derive(Debug, Clone, Default)]
pub struct InMemorySnapshotStore {
    blob: Arc<RwLock<Option<String>>>,
    unavailable: Arc<AtomicBool>,
    save_count: Arc<AtomicUsize>,
}

impl InMemorySnapshotStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-filled with a raw blob (may be malformed)
    pub fn with_raw(json: impl Into<String>) -> Self {
        Self {
            blob: Arc::new(RwLock::new(Some(json.into()))),
            ..Self::default()
        }
    }

    /// Make every load and save fail, as when storage is disabled
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// The raw blob currently stored
    pub async fn raw(&self) -> Option<String> {
        self.blob.read().await.clone()
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }

    fn check_available(&self) -> Result<(), SnapshotError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(SnapshotError::IoError("storage unavailable".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl SnapshotStore for InMemorySnapshotStore {
    async fn load(&self) -> Result<Option<CyclesSnapshot>, SnapshotError> {
        self.check_available()?;
        let blob = self.blob.read().await;
        blob.as_deref().map(CyclesSnapshot::from_json).transpose()
    }

    async fn save(&self, snapshot: &CyclesSnapshot) -> Result<(), SnapshotError> {
        self.check_available()?;
        let json = snapshot.to_json()?;
        *self.blob.write().await = Some(json);
        self.save_count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
