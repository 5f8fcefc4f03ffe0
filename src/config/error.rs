//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Cycle duration bounds are invalid: min {min} must be at least 1 and not above max {max}")]
    InvalidDurationBounds { min: u32, max: u32 },

    #[error("Tick interval must be between 10ms and 60000ms")]
    InvalidTickInterval,

    #[error("Snapshot key cannot be empty")]
    EmptySnapshotKey,

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),
}
