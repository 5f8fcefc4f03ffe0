//! Snapshot storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::ports::DEFAULT_SNAPSHOT_KEY;

/// Snapshot storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Persist state between runs
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Directory holding the snapshot file
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// Fixed application key the snapshot is stored under
    #[serde(default = "default_key")]
    pub key: String,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.key.trim().is_empty() {
            return Err(ValidationError::EmptySnapshotKey);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            directory: default_directory(),
            key: default_key(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_directory() -> PathBuf {
    PathBuf::from("./data")
}

fn default_key() -> String {
    DEFAULT_SNAPSHOT_KEY.to_string()
}
