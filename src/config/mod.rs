//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `FOCUS_TIMER` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use focus_timer::config::AppConfig;
//!
//! let config = AppConfig::load_and_validate().expect("Invalid configuration");
//!
//! println!("Cycles last {}..={} minutes", config.timer.min_minutes, config.timer.max_minutes);
//! ```

mod error;
mod logging;
mod storage;
mod timer;

pub use error::{ConfigError, ValidationError};
pub use logging::LoggingConfig;
pub use storage::StorageConfig;
pub use timer::TimerConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Every field has a default, so an empty environment yields a working
/// configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Cycle duration bounds and tick rate
    #[serde(default)]
    pub timer: TimerConfig,

    /// Snapshot persistence
    #[serde(default)]
    pub storage: StorageConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `FOCUS_TIMER` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `FOCUS_TIMER__TIMER__MIN_MINUTES=1` -> `timer.min_minutes = 1`
    /// - `FOCUS_TIMER__STORAGE__DIRECTORY=/tmp/t` -> `storage.directory = /tmp/t`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("FOCUS_TIMER")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Load configuration and validate it in one step
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::LoadError` if values cannot be parsed and
    /// `ConfigError::ValidationFailed` if any value is out of bounds.
    pub fn load_and_validate() -> Result<Self, ConfigError> {
        let config = Self::load()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.timer.validate()?;
        self.storage.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;
    use std::sync::Mutex;

    // Env vars are process-global
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn clear_env() {
        env::remove_var("FOCUS_TIMER__TIMER__MIN_MINUTES");
        env::remove_var("FOCUS_TIMER__TIMER__MAX_MINUTES");
        env::remove_var("FOCUS_TIMER__TIMER__TICK_INTERVAL_MS");
        env::remove_var("FOCUS_TIMER__STORAGE__ENABLED");
        env::remove_var("FOCUS_TIMER__STORAGE__DIRECTORY");
        env::remove_var("FOCUS_TIMER__LOGGING__JSON");
    }

    #[test]
    fn test_load_with_empty_environment_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.timer.min_minutes, 5);
        assert_eq!(config.timer.max_minutes, 60);
        assert!(config.storage.enabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_overrides_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("FOCUS_TIMER__TIMER__MIN_MINUTES", "1");
        env::set_var("FOCUS_TIMER__TIMER__TICK_INTERVAL_MS", "250");
        env::set_var("FOCUS_TIMER__STORAGE__DIRECTORY", "/tmp/focus-timer");
        env::set_var("FOCUS_TIMER__LOGGING__JSON", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.timer.min_minutes, 1);
        assert_eq!(config.timer.tick_interval_ms, 250);
        assert_eq!(config.storage.directory, PathBuf::from("/tmp/focus-timer"));
        assert!(config.logging.json);
    }

    #[test]
    fn test_load_and_validate_rejects_invalid_bounds() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("FOCUS_TIMER__TIMER__MIN_MINUTES", "30");
        env::set_var("FOCUS_TIMER__TIMER__MAX_MINUTES", "10");
        let result = AppConfig::load_and_validate();
        clear_env();

        assert!(matches!(
            result,
            Err(ConfigError::ValidationFailed(
                ValidationError::InvalidDurationBounds { min: 30, max: 10 }
            ))
        ));
    }

    #[test]
    fn test_validate_reports_first_invalid_section() {
        let mut config = AppConfig::default();
        config.timer.max_minutes = 1;

        assert!(matches!(
            config.validate(),
            Err(ValidationError::InvalidDurationBounds { .. })
        ));
    }
}
