//! File-based Snapshot Store Adapter
//!
//! Keeps the snapshot as a single JSON file inside a base directory. The
//! file name is derived from the snapshot key, so several keys (for
//! example, format versions) can live side by side.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::ports::{CyclesSnapshot, SnapshotError, SnapshotStore};

/// File-based storage for the cycle snapshot
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    base_path: PathBuf,
    key: String,
}

impl FileSnapshotStore {
    /// Create a new file store for `key` under `base_path`
    ///
    /// # Example
    /// ```ignore
    /// let store = FileSnapshotStore::new("./data", DEFAULT_SNAPSHOT_KEY);
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P, key: impl Into<String>) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            key: key.into(),
        }
    }

    /// Path of the snapshot file.
    pub fn snapshot_path(&self) -> PathBuf {
        self.base_path.join(file_name_for_key(&self.key))
    }

    fn temp_path(&self) -> PathBuf {
        self.base_path
            .join(format!("{}.tmp", file_name_for_key(&self.key)))
    }

    /// Ensure directory exists
    async fn ensure_dir(&self) -> Result<(), SnapshotError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| SnapshotError::IoError(e.to_string()))
    }
}

/// Maps a storage key to a portable file name.
///
/// Anything outside `[A-Za-z0-9._-]` becomes `_`.
fn file_name_for_key(key: &str) -> String {
    let stem: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}.json", stem)
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn load(&self) -> Result<Option<CyclesSnapshot>, SnapshotError> {
        let file_path = self.snapshot_path();

        if !file_path.exists() {
            return Ok(None);
        }

        let json = fs::read_to_string(&file_path)
            .await
            .map_err(|e| SnapshotError::IoError(e.to_string()))?;

        if json.trim().is_empty() {
            return Ok(None);
        }

        CyclesSnapshot::from_json(&json).map(Some)
    }

    async fn save(&self, snapshot: &CyclesSnapshot) -> Result<(), SnapshotError> {
        self.ensure_dir().await?;

        let json = snapshot.to_json()?;

        // Write then rename so a crash never leaves half a snapshot
        let temp_path = self.temp_path();
        fs::write(&temp_path, json)
            .await
            .map_err(|e| SnapshotError::IoError(e.to_string()))?;
        fs::rename(&temp_path, self.snapshot_path())
            .await
            .map_err(|e| SnapshotError::IoError(e.to_string()))?;

        Ok(())
    }
}
