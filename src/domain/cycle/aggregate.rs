//! Cycle entity - One attempted timer run.
//!
//! A Cycle starts running when created and ends in exactly one terminal
//! outcome: interrupted by the user or completed by the countdown.

use crate::domain::foundation::{
    CycleId, CycleStatus, DomainError, ErrorCode, StateMachine, Timestamp,
};

use super::Countdown;

/// A single timer cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    id: CycleId,
    task: String,
    minutes_amount: u32,
    start_date: Timestamp,
    interrupt_date: Option<Timestamp>,
    finished_date: Option<Timestamp>,
}

impl Cycle {
    /// Creates a running cycle that started at `start_date`.
    ///
    /// Input is expected to have passed the form boundary already.
    pub fn start(
        id: CycleId,
        task: impl Into<String>,
        minutes_amount: u32,
        start_date: Timestamp,
    ) -> Self {
        Self {
            id,
            task: task.into(),
            minutes_amount,
            start_date,
            interrupt_date: None,
            finished_date: None,
        }
    }

    /// Reconstitutes a cycle from persisted data.
    ///
    /// Rejects records that carry both terminal dates.
    pub fn reconstitute(
        id: CycleId,
        task: String,
        minutes_amount: u32,
        start_date: Timestamp,
        interrupt_date: Option<Timestamp>,
        finished_date: Option<Timestamp>,
    ) -> Result<Self, DomainError> {
        if interrupt_date.is_some() && finished_date.is_some() {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Cycle cannot be both interrupted and finished",
            )
            .with_detail("cycle_id", id.to_string()));
        }

        Ok(Self {
            id,
            task,
            minutes_amount,
            start_date,
            interrupt_date,
            finished_date,
        })
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn id(&self) -> CycleId {
        self.id
    }

    pub fn task(&self) -> &str {
        &self.task
    }

    pub fn minutes_amount(&self) -> u32 {
        self.minutes_amount
    }

    pub fn start_date(&self) -> Timestamp {
        self.start_date
    }

    pub fn interrupt_date(&self) -> Option<Timestamp> {
        self.interrupt_date
    }

    pub fn finished_date(&self) -> Option<Timestamp> {
        self.finished_date
    }

    /// Derives the display status from the terminal dates.
    pub fn status(&self) -> CycleStatus {
        if self.finished_date.is_some() {
            CycleStatus::Completed
        } else if self.interrupt_date.is_some() {
            CycleStatus::Interrupted
        } else {
            CycleStatus::Running
        }
    }

    /// Returns true once either terminal date is set.
    pub fn is_terminal(&self) -> bool {
        self.status().is_terminal()
    }

    /// Countdown for this cycle as seen at `now`.
    pub fn countdown(&self, now: Timestamp) -> Countdown {
        Countdown::new(self.minutes_amount, self.start_date, now)
    }

    // ───────────────────────────────────────────────────────────────
    // Transitions
    // ───────────────────────────────────────────────────────────────

    /// Stops the cycle before its countdown ran out.
    pub fn interrupt(&mut self, now: Timestamp) -> Result<(), DomainError> {
        self.ensure_can_become(CycleStatus::Interrupted)?;
        self.interrupt_date = Some(now);
        Ok(())
    }

    /// Marks the cycle as completed.
    pub fn finish(&mut self, now: Timestamp) -> Result<(), DomainError> {
        self.ensure_can_become(CycleStatus::Completed)?;
        self.finished_date = Some(now);
        Ok(())
    }

    fn ensure_can_become(&self, target: CycleStatus) -> Result<(), DomainError> {
        self.status().transition_to(target).map(|_| ()).map_err(|e| {
            DomainError::new(ErrorCode::InvalidStateTransition, e.to_string())
                .with_detail("cycle_id", self.id.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t0() -> Timestamp {
        Timestamp::from_unix_secs(1_700_000_000)
    }

    fn running_cycle() -> Cycle {
        Cycle::start(CycleId::new(), "write report", 25, t0())
    }

    #[test]
    fn new_cycle_is_running_without_terminal_dates() {
        let cycle = running_cycle();

        assert_eq!(cycle.status(), CycleStatus::Running);
        assert_eq!(cycle.task(), "write report");
        assert_eq!(cycle.minutes_amount(), 25);
        assert_eq!(cycle.start_date(), t0());
        assert!(cycle.interrupt_date().is_none());
        assert!(cycle.finished_date().is_none());
        assert!(!cycle.is_terminal());
    }

    #[test]
    fn interrupt_sets_date_and_status() {
        let mut cycle = running_cycle();
        let at = t0().plus_secs(90);

        cycle.interrupt(at).unwrap();

        assert_eq!(cycle.interrupt_date(), Some(at));
        assert_eq!(cycle.status(), CycleStatus::Interrupted);
        assert!(cycle.is_terminal());
    }

    #[test]
    fn finish_sets_date_and_status() {
        let mut cycle = running_cycle();
        let at = t0().plus_secs(25 * 60);

        cycle.finish(at).unwrap();

        assert_eq!(cycle.finished_date(), Some(at));
        assert_eq!(cycle.status(), CycleStatus::Completed);
    }

    #[test]
    fn terminal_cycle_rejects_second_transition() {
        let mut cycle = running_cycle();
        cycle.interrupt(t0().plus_secs(1)).unwrap();

        let err = cycle.finish(t0().plus_secs(2)).unwrap_err();

        assert_eq!(err.code, ErrorCode::InvalidStateTransition);
        assert!(cycle.finished_date().is_none());
        assert!(cycle.interrupt(t0().plus_secs(3)).is_err());
        assert_eq!(cycle.interrupt_date(), Some(t0().plus_secs(1)));
    }

    #[test]
    fn reconstitute_rejects_both_terminal_dates() {
        let result = Cycle::reconstitute(
            CycleId::new(),
            "task".to_string(),
            10,
            t0(),
            Some(t0().plus_secs(1)),
            Some(t0().plus_secs(2)),
        );

        assert!(result.is_err());
    }

    #[test]
    fn reconstitute_keeps_finished_cycle() {
        let cycle = Cycle::reconstitute(
            CycleId::new(),
            "task".to_string(),
            10,
            t0(),
            None,
            Some(t0().plus_secs(600)),
        )
        .unwrap();

        assert_eq!(cycle.status(), CycleStatus::Completed);
    }
}
