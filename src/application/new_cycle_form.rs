//! New-cycle form boundary.
//!
//! Raw input from whatever collects it (terminal, UI) is checked here
//! before it becomes a [`StartCycleCommand`]. The cycle store trusts
//! commands built this way and does not validate again.

use serde::Deserialize;

use crate::domain::foundation::ValidationError;

/// Inclusive bounds on a cycle's duration, in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleDurationPolicy {
    min_minutes: u32,
    max_minutes: u32,
}

impl CycleDurationPolicy {
    pub fn new(min_minutes: u32, max_minutes: u32) -> Self {
        Self {
            min_minutes,
            max_minutes,
        }
    }

    pub fn min_minutes(&self) -> u32 {
        self.min_minutes
    }

    pub fn max_minutes(&self) -> u32 {
        self.max_minutes
    }

    pub fn contains(&self, minutes: i64) -> bool {
        (i64::from(self.min_minutes)..=i64::from(self.max_minutes)).contains(&minutes)
    }
}

impl Default for CycleDurationPolicy {
    fn default() -> Self {
        Self::new(5, 60)
    }
}

/// Raw form input.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCycleForm {
    pub task: String,
    pub minutes_amount: i64,
}

impl NewCycleForm {
    pub fn new(task: impl Into<String>, minutes_amount: i64) -> Self {
        Self {
            task: task.into(),
            minutes_amount,
        }
    }

    /// Checks the input against `policy`.
    ///
    /// The task is trimmed and must not be empty; the duration must be
    /// within the policy's bounds.
    pub fn validate(self, policy: &CycleDurationPolicy) -> Result<StartCycleCommand, ValidationError> {
        let task = self.task.trim();
        if task.is_empty() {
            return Err(ValidationError::empty_field("task"));
        }

        if !policy.contains(self.minutes_amount) {
            return Err(ValidationError::out_of_range(
                "minutes_amount",
                i64::from(policy.min_minutes()),
                i64::from(policy.max_minutes()),
                self.minutes_amount,
            ));
        }

        let minutes_amount = u32::try_from(self.minutes_amount)
            .map_err(|e| ValidationError::invalid_format("minutes_amount", e.to_string()))?;

        Ok(StartCycleCommand {
            task: task.to_string(),
            minutes_amount,
        })
    }
}

/// Validated request to start a cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartCycleCommand {
    pub task: String,
    pub minutes_amount: u32,
}
