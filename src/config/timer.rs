//! Timer configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::application::CycleDurationPolicy;

/// Timer configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TimerConfig {
    /// Shortest cycle the form accepts, in minutes
    #[serde(default = "default_min_minutes")]
    pub min_minutes: u32,

    /// Longest cycle the form accepts, in minutes
    #[serde(default = "default_max_minutes")]
    pub max_minutes: u32,

    /// How often the countdown is recomputed
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl TimerConfig {
    /// Inclusive duration bounds for new cycles
    pub fn duration_policy(&self) -> CycleDurationPolicy {
        CycleDurationPolicy::new(self.min_minutes, self.max_minutes)
    }

    /// Tick period as a Duration
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Validate timer configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.min_minutes == 0 || self.min_minutes > self.max_minutes {
            return Err(ValidationError::InvalidDurationBounds {
                min: self.min_minutes,
                max: self.max_minutes,
            });
        }
        if !(10..=60_000).contains(&self.tick_interval_ms) {
            return Err(ValidationError::InvalidTickInterval);
        }
        Ok(())
    }
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            min_minutes: default_min_minutes(),
            max_minutes: default_max_minutes(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

fn default_min_minutes() -> u32 {
    5
}

fn default_max_minutes() -> u32 {
    60
}

fn default_tick_interval_ms() -> u64 {
    1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_config_defaults() {
        let config = TimerConfig::default();
        assert_eq!(config.min_minutes, 5);
        assert_eq!(config.max_minutes, 60);
        assert_eq!(config.tick_interval(), Duration::from_secs(1));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_duration_policy_uses_bounds() {
        let config = TimerConfig {
            min_minutes: 1,
            ..Default::default()
        };
        let policy = config.duration_policy();
        assert_eq!(policy.min_minutes(), 1);
        assert_eq!(policy.max_minutes(), 60);
    }

    #[test]
    fn test_validation_rejects_inverted_bounds() {
        let config = TimerConfig {
            min_minutes: 30,
            max_minutes: 10,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidDurationBounds { min: 30, max: 10 })
        );
    }

    #[test]
    fn test_validation_rejects_zero_minimum() {
        let config = TimerConfig {
            min_minutes: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_tick_interval() {
        let config = TimerConfig {
            tick_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTickInterval));
    }
}
