//! CycleStatus enum for the lifecycle of a timer cycle.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::StateMachine;

/// Lifecycle status of a timer cycle.
///
/// Never stored: it is derived from which terminal date a cycle carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CycleStatus {
    #[default]
    Running,
    Interrupted,
    Completed,
}

impl CycleStatus {
    /// Portuguese label shown in the history table.
    pub fn label_pt_br(&self) -> &'static str {
        match self {
            CycleStatus::Running => "Em andamento",
            CycleStatus::Interrupted => "Interrompido",
            CycleStatus::Completed => "Concluído",
        }
    }
}

impl StateMachine for CycleStatus {
    fn valid_transitions(&self) -> Vec<Self> {
        match self {
            CycleStatus::Running => vec![CycleStatus::Interrupted, CycleStatus::Completed],
            CycleStatus::Interrupted | CycleStatus::Completed => vec![],
        }
    }
}

impl fmt::Display for CycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CycleStatus::Running => "Running",
            CycleStatus::Interrupted => "Interrupted",
            CycleStatus::Completed => "Completed",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_running() {
        assert_eq!(CycleStatus::default(), CycleStatus::Running);
    }

    #[test]
    fn running_can_reach_both_terminals() {
        assert!(CycleStatus::Running.can_transition_to(&CycleStatus::Interrupted));
        assert!(CycleStatus::Running.can_transition_to(&CycleStatus::Completed));
    }

    #[test]
    fn terminal_states_have_no_exits() {
        for status in [CycleStatus::Interrupted, CycleStatus::Completed] {
            assert!(status.is_terminal());
            assert!(status.transition_to(CycleStatus::Running).is_err());
        }
        assert!(!CycleStatus::Completed.can_transition_to(&CycleStatus::Interrupted));
    }

    #[test]
    fn display_works_correctly() {
        assert_eq!(format!("{}", CycleStatus::Running), "Running");
        assert_eq!(format!("{}", CycleStatus::Interrupted), "Interrupted");
        assert_eq!(format!("{}", CycleStatus::Completed), "Completed");
    }

    #[test]
    fn portuguese_labels_match_history_page() {
        assert_eq!(CycleStatus::Completed.label_pt_br(), "Concluído");
        assert_eq!(CycleStatus::Interrupted.label_pt_br(), "Interrompido");
        assert_eq!(CycleStatus::Running.label_pt_br(), "Em andamento");
    }

    #[test]
    fn serializes_to_snake_case_json() {
        assert_eq!(
            serde_json::to_string(&CycleStatus::Interrupted).unwrap(),
            "\"interrupted\""
        );
    }
}
