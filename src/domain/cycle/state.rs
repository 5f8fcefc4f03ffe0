//! Cycle list state and its transition function.
//!
//! `CyclesState` owns the append-only list of cycles and the optional
//! pointer to the active one. Every change goes through
//! [`CyclesState::apply`], a total match over [`CycleCommand`].

use crate::domain::foundation::{CycleId, Timestamp};

use super::{Cycle, CycleEvent, HistoryEntry};

/// Commands accepted by the cycle list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleCommand {
    /// Append a new cycle and make it active.
    Start {
        cycle_id: CycleId,
        task: String,
        minutes_amount: u32,
    },
    /// Stop the active cycle early.
    Interrupt,
    /// Mark the active cycle as having run its full duration.
    MarkFinished,
}

/// Authoritative list of cycles plus the active pointer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CyclesState {
    cycles: Vec<Cycle>,
    active_cycle_id: Option<CycleId>,
}

impl CyclesState {
    /// Empty state: no cycles, nothing active.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds state from persisted parts.
    ///
    /// An active pointer that names a missing or terminal cycle is dropped.
    pub fn from_parts(cycles: Vec<Cycle>, active_cycle_id: Option<CycleId>) -> Self {
        let active_cycle_id = active_cycle_id.filter(|id| {
            cycles
                .iter()
                .any(|cycle| cycle.id() == *id && !cycle.is_terminal())
        });

        Self {
            cycles,
            active_cycle_id,
        }
    }

    pub fn cycles(&self) -> &[Cycle] {
        &self.cycles
    }

    pub fn active_cycle_id(&self) -> Option<CycleId> {
        self.active_cycle_id
    }

    /// The cycle referenced by the active pointer, if any.
    pub fn active_cycle(&self) -> Option<&Cycle> {
        let id = self.active_cycle_id?;
        self.cycles.iter().find(|cycle| cycle.id() == id)
    }

    /// Every cycle in insertion order, with its derived status.
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.cycles
            .iter()
            .map(|cycle| HistoryEntry::new(cycle.clone(), Some(cycle.id()) == self.active_cycle_id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.cycles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }

    /// Applies a command at `now`.
    ///
    /// Returns the emitted event, or `None` when the command was a no-op
    /// (interrupt or finish with nothing active, or a start that reuses an
    /// existing id). A start while another cycle is active leaves the
    /// previous cycle untouched; callers that want to forbid that check
    /// [`CyclesState::active_cycle_id`] first.
    pub fn apply(&mut self, command: CycleCommand, now: Timestamp) -> Option<CycleEvent> {
        match command {
            CycleCommand::Start {
                cycle_id,
                task,
                minutes_amount,
            } => {
                if self.cycles.iter().any(|cycle| cycle.id() == cycle_id) {
                    return None;
                }
                self.cycles
                    .push(Cycle::start(cycle_id, task, minutes_amount, now));
                self.active_cycle_id = Some(cycle_id);
                Some(CycleEvent::Started {
                    cycle_id,
                    minutes_amount,
                    started_at: now,
                })
            }
            CycleCommand::Interrupt => {
                let cycle = self.take_active()?;
                cycle.interrupt(now).ok()?;
                Some(CycleEvent::Interrupted {
                    cycle_id: cycle.id(),
                    interrupted_at: now,
                })
            }
            CycleCommand::MarkFinished => {
                let cycle = self.take_active()?;
                cycle.finish(now).ok()?;
                Some(CycleEvent::Finished {
                    cycle_id: cycle.id(),
                    finished_at: now,
                })
            }
        }
    }

    /// Clears the active pointer and hands back the cycle it referenced.
    fn take_active(&mut self) -> Option<&mut Cycle> {
        let id = self.active_cycle_id.take()?;
        self.cycles.iter_mut().find(|cycle| cycle.id() == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::CycleStatus;

    fn t0() -> Timestamp {
        Timestamp::from_unix_secs(1_700_000_000)
    }

    fn start(task: &str, minutes_amount: u32) -> (CycleId, CycleCommand) {
        let cycle_id = CycleId::new();
        (
            cycle_id,
            CycleCommand::Start {
                cycle_id,
                task: task.to_string(),
                minutes_amount,
            },
        )
    }

    #[test]
    fn start_appends_and_activates() {
        let mut state = CyclesState::new();
        let (id, cmd) = start("write report", 25);

        let event = state.apply(cmd, t0());

        assert_eq!(
            event,
            Some(CycleEvent::Started {
                cycle_id: id,
                minutes_amount: 25,
                started_at: t0(),
            })
        );
        assert_eq!(state.len(), 1);
        assert_eq!(state.active_cycle_id(), Some(id));
        assert_eq!(state.active_cycle().map(|c| c.start_date()), Some(t0()));
    }

    #[test]
    fn start_then_interrupt_scenario() {
        let mut state = CyclesState::new();
        let (id, cmd) = start("write report", 25);
        state.apply(cmd, t0());

        let history = state.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status, CycleStatus::Running);
        assert!(history[0].is_active);

        let event = state.apply(CycleCommand::Interrupt, t0().plus_secs(10));

        assert_eq!(event.map(|e| e.cycle_id()), Some(id));
        let history = state.history();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status, CycleStatus::Interrupted);
        assert_eq!(history[0].cycle.interrupt_date(), Some(t0().plus_secs(10)));
        assert!(!history[0].is_active);
        assert!(state.active_cycle_id().is_none());
    }

    #[test]
    fn mark_finished_completes_active_cycle() {
        let mut state = CyclesState::new();
        let (_, cmd) = start("read", 1);
        state.apply(cmd, t0());

        let event = state.apply(CycleCommand::MarkFinished, t0().plus_secs(60));

        assert!(matches!(event, Some(CycleEvent::Finished { .. })));
        assert_eq!(state.cycles()[0].status(), CycleStatus::Completed);
        assert!(state.active_cycle().is_none());
    }

    #[test]
    fn interrupt_without_active_is_noop() {
        let mut state = CyclesState::new();
        let (_, cmd) = start("read", 1);
        state.apply(cmd, t0());
        state.apply(CycleCommand::MarkFinished, t0().plus_secs(60));
        let before = state.clone();

        assert!(state.apply(CycleCommand::Interrupt, t0().plus_secs(61)).is_none());
        assert!(state.apply(CycleCommand::MarkFinished, t0().plus_secs(62)).is_none());
        assert_eq!(state, before);
    }

    #[test]
    fn finish_after_interrupt_race_is_noop() {
        let mut state = CyclesState::new();
        let (_, cmd) = start("read", 1);
        state.apply(cmd, t0());

        state.apply(CycleCommand::Interrupt, t0().plus_secs(60));
        let second = state.apply(CycleCommand::MarkFinished, t0().plus_secs(60));

        assert!(second.is_none());
        let cycle = &state.cycles()[0];
        assert!(cycle.interrupt_date().is_some());
        assert!(cycle.finished_date().is_none());
    }

    #[test]
    fn start_while_active_leaves_previous_untouched() {
        let mut state = CyclesState::new();
        let (first, cmd) = start("first", 10);
        state.apply(cmd, t0());
        let (second, cmd) = start("second", 20);
        state.apply(cmd, t0().plus_secs(5));

        assert_eq!(state.len(), 2);
        assert_eq!(state.active_cycle_id(), Some(second));
        let previous = &state.cycles()[0];
        assert_eq!(previous.id(), first);
        assert_eq!(previous.status(), CycleStatus::Running);
    }

    #[test]
    fn start_with_duplicate_id_is_noop() {
        let mut state = CyclesState::new();
        let (id, cmd) = start("first", 10);
        state.apply(cmd.clone(), t0());
        state.apply(CycleCommand::Interrupt, t0().plus_secs(1));

        assert!(state.apply(cmd, t0().plus_secs(2)).is_none());
        assert_eq!(state.len(), 1);
        assert_ne!(state.active_cycle_id(), Some(id));
    }

    #[test]
    fn from_parts_drops_pointer_to_terminal_cycle() {
        let mut cycle = Cycle::start(CycleId::new(), "done", 5, t0());
        cycle.finish(t0().plus_secs(300)).unwrap();
        let id = cycle.id();

        let state = CyclesState::from_parts(vec![cycle], Some(id));

        assert!(state.active_cycle_id().is_none());
        assert_eq!(state.len(), 1);
    }

    #[test]
    fn from_parts_drops_pointer_to_unknown_cycle() {
        let state = CyclesState::from_parts(Vec::new(), Some(CycleId::new()));
        assert!(state.active_cycle_id().is_none());
        assert!(state.is_empty());
    }

    #[test]
    fn from_parts_keeps_pointer_to_running_cycle() {
        let cycle = Cycle::start(CycleId::new(), "doing", 5, t0());
        let id = cycle.id();

        let state = CyclesState::from_parts(vec![cycle], Some(id));

        assert_eq!(state.active_cycle_id(), Some(id));
    }
}
